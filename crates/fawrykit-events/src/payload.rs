use serde_json::Value;
use std::fmt;

/// A payload as the SDK hands it over. Some platforms send JSON text, others
/// an already decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    Text(String),
    Structured(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedPayload {
    Structured(Value),
    /// Text that did not parse as JSON, unchanged.
    Text(String),
}

impl NormalizedPayload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            NormalizedPayload::Structured(value) => Some(value),
            NormalizedPayload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            NormalizedPayload::Text(text) => Some(text),
            NormalizedPayload::Structured(_) => None,
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            NormalizedPayload::Structured(value) => value,
            NormalizedPayload::Text(text) => Value::String(text),
        }
    }
}

impl fmt::Display for NormalizedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedPayload::Structured(value) => write!(f, "{}", value),
            NormalizedPayload::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for RawPayload {
    fn from(text: &str) -> Self {
        RawPayload::Text(text.to_string())
    }
}

impl From<String> for RawPayload {
    fn from(text: String) -> Self {
        RawPayload::Text(text)
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        RawPayload::Structured(value)
    }
}

/// Best-effort JSON decoding. Never fails: text that does not parse is
/// returned as-is.
pub fn normalize(raw: RawPayload) -> NormalizedPayload {
    match raw {
        RawPayload::Structured(value) => NormalizedPayload::Structured(value),
        RawPayload::Text(text) => match serde_json::from_str::<Value>(&text) {
            Ok(value) => NormalizedPayload::Structured(value),
            Err(err) => {
                tracing::debug!(error = %err, len = text.len(), "payload is not json, passing text through");
                NormalizedPayload::Text(text)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_text_is_parsed() {
        let out = normalize(r#"{"status":"ok","amount":300}"#.into());
        assert_eq!(out, NormalizedPayload::Structured(json!({"status": "ok", "amount": 300})));
    }

    #[test]
    fn plain_text_falls_back() {
        assert_eq!(normalize("timeout".into()), NormalizedPayload::Text("timeout".to_string()));
        assert_eq!(normalize("".into()), NormalizedPayload::Text(String::new()));
    }

    #[test]
    fn truncated_json_falls_back() {
        let text = r#"{"status":"ok""#;
        assert_eq!(normalize(text.into()), NormalizedPayload::Text(text.to_string()));
    }

    #[test]
    fn json_scalars_are_structured() {
        assert_eq!(normalize("300".into()), NormalizedPayload::Structured(json!(300)));
        assert_eq!(normalize(r#""quoted""#.into()), NormalizedPayload::Structured(json!("quoted")));
    }

    #[test]
    fn structured_passes_through() {
        let value = json!({"nested": {"list": [1, 2]}});
        assert_eq!(normalize(value.clone().into()), NormalizedPayload::Structured(value));
    }

    #[test]
    fn structured_string_is_not_reparsed() {
        let value = json!(r#"{"a":1}"#);
        assert_eq!(normalize(value.clone().into()), NormalizedPayload::Structured(value));
    }

    #[test]
    fn accessors_match_variant() {
        let structured = normalize(r#"{"a":1}"#.into());
        assert_eq!(structured.as_json(), Some(&json!({"a": 1})));
        assert_eq!(structured.as_text(), None);

        let text = normalize("declined".into());
        assert_eq!(text.as_text(), Some("declined"));
        assert_eq!(text.as_json(), None);
    }

    #[test]
    fn into_json_wraps_text() {
        assert_eq!(NormalizedPayload::Text("x".to_string()).into_json(), json!("x"));
        assert_eq!(NormalizedPayload::Text("x".to_string()).to_string(), "x");
    }
}
