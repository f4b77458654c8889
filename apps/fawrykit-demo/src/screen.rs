use crate::state::{CardsState, PaymentState, ScreenState};
use fawrykit_core::{CheckoutConfig, PaymentSdk, Platform, RefNumProvider, UuidRefNums};
use fawrykit_events::{EventBridge, EventName, EventResult, EventSource, NormalizedPayload};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The checkout screen: two actions and one event bridge for as long as it
/// is mounted.
pub struct CheckoutScreen {
    bridge: EventBridge,
    sdk: Arc<dyn PaymentSdk>,
    ref_nums: Arc<dyn RefNumProvider>,
    config: CheckoutConfig,
    platform: Platform,
    state: Arc<Mutex<ScreenState>>,
}

impl CheckoutScreen {
    pub fn mount(
        source: Arc<dyn EventSource>,
        sdk: Arc<dyn PaymentSdk>,
        config: CheckoutConfig,
        platform: Platform,
    ) -> EventResult<Self> {
        Self::mount_with_ref_nums(source, sdk, Arc::new(UuidRefNums), config, platform)
    }

    pub fn mount_with_ref_nums(
        source: Arc<dyn EventSource>,
        sdk: Arc<dyn PaymentSdk>,
        ref_nums: Arc<dyn RefNumProvider>,
        config: CheckoutConfig,
        platform: Platform,
    ) -> EventResult<Self> {
        let state = Arc::new(Mutex::new(ScreenState::default()));
        let mut bridge = EventBridge::new(source);

        let sink = Arc::clone(&state);
        bridge.attach(move |event, payload| {
            log_event(event, &payload);
            lock(&sink).apply(event, payload);
        })?;

        tracing::info!(platform = ?platform, base_url = %config.base_url, "checkout screen mounted");
        Ok(Self {
            bridge,
            sdk,
            ref_nums,
            config,
            platform,
            state,
        })
    }

    /// Starts a checkout with a fresh merchant reference number.
    pub fn checkout(&self) -> String {
        let ref_num = self.ref_nums.next_ref_num();
        let request = self.config.launch_request(self.platform, ref_num.clone());
        lock(&self.state).payment = PaymentState::Pending {
            merchant_ref_num: ref_num.clone(),
        };
        tracing::info!(merchant_ref_num = %ref_num, items = request.items.len(), "starting payment");
        self.sdk.start_payment(&request);
        ref_num
    }

    pub fn manage_cards(&self) {
        lock(&self.state).cards = CardsState::Open;
        tracing::info!("opening cards manager");
        self.sdk.open_cards_manager(
            &self.config.base_url,
            self.config.language,
            self.config.merchant_for(self.platform),
            &self.config.customer_info,
        );
    }

    pub fn state(&self) -> ScreenState {
        lock(&self.state).clone()
    }

    pub fn is_listening(&self) -> bool {
        self.bridge.is_attached()
    }

    pub fn unmount(mut self) -> ScreenState {
        self.bridge.detach();
        tracing::info!("checkout screen unmounted");
        self.state()
    }
}

fn lock(state: &Mutex<ScreenState>) -> MutexGuard<'_, ScreenState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn log_event(event: EventName, payload: &NormalizedPayload) {
    if event.is_failure() {
        tracing::warn!(target: "fawry", event = %event, payload = %payload, "sdk event");
    } else {
        tracing::info!(target: "fawry", event = %event, payload = %payload, "sdk event");
    }
}
