use fawrykit_events::{EventName, NormalizedPayload};
use serde_json::Value;

/// Key that marks an `EVENT_ON_SUCCESS` payload as coming from the cards
/// manager rather than from a checkout.
pub const CARDS_NOTICE_KEY: &str = "cardsManager";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PaymentState {
    #[default]
    Idle,
    Pending {
        merchant_ref_num: String,
    },
    /// `confirmed` flips once `EVENT_ON_SUCCESS` follows the completion.
    Completed {
        merchant_ref_num: String,
        receipt: Value,
        confirmed: bool,
    },
    Failed {
        merchant_ref_num: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CardsState {
    #[default]
    Closed,
    Open,
    Succeeded {
        notice: Value,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScreenState {
    pub payment: PaymentState,
    pub cards: CardsState,
    pub events_seen: usize,
    /// Events that matched no flow in progress.
    pub ignored: usize,
}

impl ScreenState {
    pub fn apply(&mut self, event: EventName, payload: NormalizedPayload) {
        self.events_seen += 1;
        let handled = match event {
            EventName::PaymentCompleted => self.complete_payment(payload, false),
            EventName::OnSuccess if is_cards_notice(&payload) => self.cards_succeeded(payload),
            EventName::OnSuccess => self.confirm_payment(payload),
            EventName::OnFail => self.fail_payment(payload),
            EventName::CardManagerFail => {
                self.cards = CardsState::Failed {
                    reason: payload.to_string(),
                };
                true
            }
        };
        if !handled {
            self.ignored += 1;
            tracing::debug!(event = %event, "event matched no flow in progress");
        }
    }

    fn complete_payment(&mut self, payload: NormalizedPayload, confirmed: bool) -> bool {
        let PaymentState::Pending { merchant_ref_num } = &mut self.payment else {
            return false;
        };
        let merchant_ref_num = std::mem::take(merchant_ref_num);
        self.payment = PaymentState::Completed {
            merchant_ref_num,
            receipt: payload.into_json(),
            confirmed,
        };
        true
    }

    /// Unmarked successes go to the cards manager once no payment is
    /// waiting for confirmation.
    fn confirm_payment(&mut self, payload: NormalizedPayload) -> bool {
        if let PaymentState::Completed { confirmed, .. } = &mut self.payment {
            if !*confirmed {
                *confirmed = true;
                return true;
            }
        }
        if matches!(self.payment, PaymentState::Pending { .. }) {
            return self.complete_payment(payload, true);
        }
        self.cards_succeeded(payload)
    }

    fn cards_succeeded(&mut self, payload: NormalizedPayload) -> bool {
        if !matches!(self.cards, CardsState::Open) {
            return false;
        }
        self.cards = CardsState::Succeeded {
            notice: payload.into_json(),
        };
        true
    }

    fn fail_payment(&mut self, payload: NormalizedPayload) -> bool {
        let PaymentState::Pending { merchant_ref_num } = &mut self.payment else {
            return false;
        };
        let merchant_ref_num = std::mem::take(merchant_ref_num);
        self.payment = PaymentState::Failed {
            merchant_ref_num,
            reason: payload.to_string(),
        };
        true
    }
}

fn is_cards_notice(payload: &NormalizedPayload) -> bool {
    payload
        .as_json()
        .and_then(Value::as_object)
        .is_some_and(|object| object.contains_key(CARDS_NOTICE_KEY))
}
