use crate::error::EventResult;
use crate::name::EventName;
use crate::payload::RawPayload;
use std::sync::Arc;

pub type Listener = Arc<dyn Fn(RawPayload) + Send + Sync>;

/// Identifies one registration on an [`EventSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    id: u64,
    event: EventName,
}

impl ListenerHandle {
    pub fn new(id: u64, event: EventName) -> Self {
        Self { id, event }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn event(&self) -> EventName {
        self.event
    }
}

/// The SDK's shared event emitter.
///
/// Other subscribers may be registered on the same source, so callers only
/// remove the handles they were given.
pub trait EventSource: Send + Sync {
    fn add_listener(&self, event: EventName, listener: Listener) -> EventResult<ListenerHandle>;

    /// Returns `false` when the handle is unknown or already removed.
    fn remove_listener(&self, handle: ListenerHandle) -> bool;

    fn remove_all_listeners(&self, event: EventName) -> usize;
}
