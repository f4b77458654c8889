pub mod config;
pub mod error;
pub mod logging;
pub mod refnum;
pub mod sdk;

pub use config::{BillItem, CheckoutConfig, CheckoutFlags, CheckoutRequest, CustomerInfo, Language, MerchantInfo, Platform};
pub use error::{error_chain, format_error_chain, log_error, CoreError, CoreResult};
pub use refnum::{RefNumProvider, UuidRefNums};
pub use sdk::PaymentSdk;
