use std::error::Error as StdError;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("config error: {0}")]
    Config(String),
    #[error("bill item {item_id}: {reason}")]
    BillItem { item_id: String, reason: String },
}

/// Messages of `error` and each `source()` below it, outermost first.
pub fn error_chain(error: &(dyn StdError + 'static)) -> Vec<String> {
    std::iter::successors(Some(error), |&err| err.source())
        .map(ToString::to_string)
        .collect()
}

pub fn format_error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut chain = error_chain(error).into_iter();
    let head = chain.next().unwrap_or_default();
    chain.fold(head, |mut out, cause| {
        out.push_str("\n  caused by: ");
        out.push_str(&cause);
        out
    })
}

pub fn log_error(context: &str, error: &(dyn StdError + 'static)) {
    let chain = error_chain(error);
    tracing::error!(
        context,
        depth = chain.len(),
        error = %format_error_chain(error),
        "operation failed"
    );
}
