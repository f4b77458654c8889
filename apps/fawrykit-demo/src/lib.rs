pub mod sandbox;
pub mod screen;
pub mod state;

pub use sandbox::SandboxSdk;
pub use screen::CheckoutScreen;
pub use state::{CardsState, PaymentState, ScreenState};

/// Env var holding the path of a JSON checkout config.
pub const CONFIG_ENV: &str = "FAWRYKIT_CONFIG";
