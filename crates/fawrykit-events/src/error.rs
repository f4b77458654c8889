use crate::name::EventName;
use thiserror::Error;

pub type EventResult<T> = Result<T, EventError>;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("event source is unavailable")]
    SourceUnavailable,
    #[error("event source rejected listener for {event}: {reason}")]
    Rejected { event: EventName, reason: String },
    #[error("failed to register listener for {event}")]
    Registration {
        event: EventName,
        #[source]
        source: Box<EventError>,
    },
    #[error("unknown event name: {0}")]
    UnknownEvent(String),
}
