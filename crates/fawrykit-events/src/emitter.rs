use crate::error::{EventError, EventResult};
use crate::name::EventName;
use crate::payload::RawPayload;
use crate::source::{EventSource, Listener, ListenerHandle};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-process [`EventSource`] that stands in for the SDK emitter.
#[derive(Clone, Default)]
pub struct LocalEmitter {
    inner: Arc<Mutex<EmitterState>>,
}

#[derive(Default)]
struct EmitterState {
    next_id: u64,
    closed: bool,
    max_listeners: Option<usize>,
    // registration order is delivery order
    listeners: Vec<(ListenerHandle, Listener)>,
}

impl LocalEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps how many listeners one event may hold at a time.
    pub fn with_max_listeners(max: usize) -> Self {
        let emitter = Self::new();
        emitter.state().max_listeners = Some(max);
        emitter
    }

    fn state(&self) -> MutexGuard<'_, EmitterState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Delivers `payload` to every listener registered for `event` when the
    /// call starts. Returns how many listeners ran.
    pub fn emit(&self, event: EventName, payload: impl Into<RawPayload>) -> usize {
        let payload = payload.into();
        let targets: Vec<Listener> = {
            let state = self.state();
            state
                .listeners
                .iter()
                .filter(|(handle, _)| handle.event() == event)
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };

        tracing::trace!(event = %event, listeners = targets.len(), "emit");
        for listener in &targets {
            listener(payload.clone());
        }
        targets.len()
    }

    pub fn listener_count(&self, event: EventName) -> usize {
        self.state()
            .listeners
            .iter()
            .filter(|(handle, _)| handle.event() == event)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.state().listeners.len()
    }

    /// Refuses further registrations. Existing listeners stay attached.
    pub fn close(&self) {
        self.state().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }
}

impl EventSource for LocalEmitter {
    fn add_listener(&self, event: EventName, listener: Listener) -> EventResult<ListenerHandle> {
        let mut state = self.state();
        if state.closed {
            return Err(EventError::SourceUnavailable);
        }
        if let Some(max) = state.max_listeners {
            let current = state.listeners.iter().filter(|(h, _)| h.event() == event).count();
            if current >= max {
                return Err(EventError::Rejected {
                    event,
                    reason: format!("already holds {} listeners", current),
                });
            }
        }
        let handle = ListenerHandle::new(state.next_id, event);
        state.next_id += 1;
        state.listeners.push((handle, listener));
        Ok(handle)
    }

    fn remove_listener(&self, handle: ListenerHandle) -> bool {
        let mut state = self.state();
        let before = state.listeners.len();
        state.listeners.retain(|(h, _)| *h != handle);
        state.listeners.len() != before
    }

    fn remove_all_listeners(&self, event: EventName) -> usize {
        let mut state = self.state();
        let before = state.listeners.len();
        state.listeners.retain(|(h, _)| h.event() != event);
        before - state.listeners.len()
    }
}
