use crate::config::{CheckoutRequest, CustomerInfo, Language, MerchantInfo};

/// Entry points of the native payment SDK.
///
/// Both calls are fire-and-forget. Success and failure are reported later
/// through the SDK's event source, never through a return value.
pub trait PaymentSdk: Send + Sync {
    fn start_payment(&self, request: &CheckoutRequest);

    fn open_cards_manager(
        &self,
        base_url: &str,
        language: Language,
        merchant: &MerchantInfo,
        customer: &CustomerInfo,
    );
}
