use uuid::Uuid;

/// Source of merchant reference numbers. Each value must be unique.
pub trait RefNumProvider: Send + Sync {
    fn next_ref_num(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRefNums;

impl RefNumProvider for UuidRefNums {
    fn next_ref_num(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_ref_nums_are_unique() {
        let provider = UuidRefNums;
        let refs: HashSet<String> = (0..64).map(|_| provider.next_ref_num()).collect();
        assert_eq!(refs.len(), 64);
        assert!(refs.iter().all(|r| Uuid::parse_str(r).is_ok()));
    }
}
