use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_DIRECTIVE: &str = "info";

pub fn init_logging() {
    init_logging_with(DEFAULT_DIRECTIVE);
}

/// `RUST_LOG` wins over `default_directive` when it is set and parses.
pub fn init_logging_with(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
