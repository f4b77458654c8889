use fawrykit_core::{CheckoutRequest, CustomerInfo, Language, MerchantInfo, PaymentSdk};
use crate::state::CARDS_NOTICE_KEY;
use fawrykit_events::{EventName, LocalEmitter, RawPayload};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

const DEFAULT_LATENCY: Duration = Duration::from_millis(150);

/// Offline stand-in for the native SDK. Outcomes are emitted on the
/// emitter from a tokio task after a short delay, like the real SDK returns
/// from its native screens.
pub struct SandboxSdk {
    emitter: LocalEmitter,
    runtime: Handle,
    latency: Duration,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl SandboxSdk {
    pub fn new(emitter: LocalEmitter, runtime: Handle) -> Self {
        Self {
            emitter,
            runtime,
            latency: DEFAULT_LATENCY,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Waits for every outcome scheduled so far to be emitted.
    pub async fn settle(&self) {
        let handles: Vec<_> = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        for handle in handles {
            if let Err(err) = handle.await {
                tracing::error!(error = %err, "sandbox delivery task failed");
            }
        }
    }

    fn schedule(&self, deliveries: Vec<(EventName, RawPayload)>) {
        let emitter = self.emitter.clone();
        let latency = self.latency;
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(latency).await;
            for (event, payload) in deliveries {
                let delivered = emitter.emit(event, payload);
                tracing::debug!(event = %event, delivered, "sandbox emitted");
            }
        });
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }
}

impl PaymentSdk for SandboxSdk {
    fn start_payment(&self, request: &CheckoutRequest) {
        let ref_num = request.merchant_info.merchant_ref_num.clone();
        let deliveries = match request.total_amount() {
            Ok(amount) if amount > Decimal::ZERO => {
                let completed = json!({
                    "merchantRefNumber": ref_num,
                    "paymentAmount": amount,
                    "orderStatus": "PAID",
                });
                let success = json!({ "status": "ok", "amount": amount });
                vec![
                    (EventName::PaymentCompleted, RawPayload::Text(completed.to_string())),
                    (EventName::OnSuccess, RawPayload::Text(success.to_string())),
                ]
            }
            Ok(_) => vec![(
                EventName::OnFail,
                RawPayload::Text("payment amount must be greater than zero".to_string()),
            )],
            Err(err) => vec![(EventName::OnFail, RawPayload::Text(err.to_string()))],
        };
        tracing::debug!(merchant_ref_num = %ref_num, "sandbox payment scheduled");
        self.schedule(deliveries);
    }

    fn open_cards_manager(
        &self,
        base_url: &str,
        language: Language,
        merchant: &MerchantInfo,
        customer: &CustomerInfo,
    ) {
        tracing::debug!(
            base_url,
            language = language.as_str(),
            merchant_code = %merchant.merchant_code,
            "sandbox cards manager opened"
        );
        let profile_id = customer
            .customer_profile_id
            .as_deref()
            .filter(|id| !id.trim().is_empty());
        let delivery = match profile_id {
            Some(profile_id) => {
                let notice = json!({
                    CARDS_NOTICE_KEY: "closed",
                    "customerProfileId": profile_id,
                });
                (EventName::OnSuccess, RawPayload::Text(notice.to_string()))
            }
            _ => (
                EventName::CardManagerFail,
                RawPayload::Text("customer profile id is required".to_string()),
            ),
        };
        self.schedule(vec![delivery]);
    }
}
