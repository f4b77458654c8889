use crate::error::EventError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of events emitted by the payment SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventName {
    #[serde(rename = "EVENT_PAYMENT_COMPLETED")]
    PaymentCompleted,
    #[serde(rename = "EVENT_ON_SUCCESS")]
    OnSuccess,
    #[serde(rename = "EVENT_ON_FAIL")]
    OnFail,
    #[serde(rename = "EVENT_CardManager_FAIL")]
    CardManagerFail,
}

impl EventName {
    pub const ALL: [EventName; 4] = [
        EventName::PaymentCompleted,
        EventName::OnSuccess,
        EventName::OnFail,
        EventName::CardManagerFail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::PaymentCompleted => "EVENT_PAYMENT_COMPLETED",
            EventName::OnSuccess => "EVENT_ON_SUCCESS",
            EventName::OnFail => "EVENT_ON_FAIL",
            EventName::CardManagerFail => "EVENT_CardManager_FAIL",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, EventName::OnFail | EventName::CardManagerFail)
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| EventError::UnknownEvent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_parse_back() {
        for name in EventName::ALL {
            assert_eq!(name.as_str().parse::<EventName>().unwrap(), name);
        }
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&EventName::CardManagerFail).unwrap();
        assert_eq!(json, "\"EVENT_CardManager_FAIL\"");
        let back: EventName = serde_json::from_str("\"EVENT_ON_SUCCESS\"").unwrap();
        assert_eq!(back, EventName::OnSuccess);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "EVENT_REFUND".parse::<EventName>().unwrap_err();
        assert!(matches!(err, EventError::UnknownEvent(ref n) if n == "EVENT_REFUND"));
    }

    #[test]
    fn only_fail_events_are_failures() {
        let failures: Vec<_> = EventName::ALL.into_iter().filter(EventName::is_failure).collect();
        assert_eq!(failures, vec![EventName::OnFail, EventName::CardManagerFail]);
    }
}
