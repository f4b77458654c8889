use crate::error::{EventError, EventResult};
use crate::name::EventName;
use crate::payload::{normalize, NormalizedPayload, RawPayload};
use crate::source::{EventSource, Listener, ListenerHandle};
use std::sync::Arc;

type EventHandler = Arc<dyn Fn(EventName, NormalizedPayload) + Send + Sync>;

/// The listeners one `attach` call registered, one per [`EventName`].
#[derive(Debug)]
pub struct Subscription {
    handles: Vec<ListenerHandle>,
}

impl Subscription {
    pub fn events(&self) -> impl Iterator<Item = EventName> + '_ {
        self.handles.iter().map(ListenerHandle::event)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Routes every SDK event to a single handler with its payload normalized.
///
/// A bridge holds at most one [`Subscription`]. Re-attaching releases the
/// previous one first, and dropping the bridge detaches it.
pub struct EventBridge {
    source: Arc<dyn EventSource>,
    subscription: Option<Subscription>,
}

impl EventBridge {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self {
            source,
            subscription: None,
        }
    }

    /// Registers one listener per event name. On failure every listener
    /// added by this call is removed again and the bridge is left detached.
    pub fn attach<F>(&mut self, on_event: F) -> EventResult<&Subscription>
    where
        F: Fn(EventName, NormalizedPayload) + Send + Sync + 'static,
    {
        self.detach();

        let handler: EventHandler = Arc::new(on_event);
        let mut handles = Vec::with_capacity(EventName::ALL.len());

        for event in EventName::ALL {
            let handler = Arc::clone(&handler);
            let listener: Listener = Arc::new(move |raw: RawPayload| handler(event, normalize(raw)));

            match self.source.add_listener(event, listener) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    self.release(&handles);
                    tracing::warn!(
                        event = %event,
                        error = %err,
                        rolled_back = handles.len(),
                        "event bridge attach failed"
                    );
                    return Err(EventError::Registration {
                        event,
                        source: Box::new(err),
                    });
                }
            }
        }

        tracing::debug!(listeners = handles.len(), "event bridge attached");
        Ok(&*self.subscription.insert(Subscription { handles }))
    }

    /// Safe to call any number of times, attached or not.
    pub fn detach(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        self.release(&subscription.handles);
        tracing::debug!(listeners = subscription.len(), "event bridge detached");
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_ref()
    }

    fn release(&self, handles: &[ListenerHandle]) {
        for handle in handles {
            if !self.source.remove_listener(*handle) {
                tracing::debug!(event = %handle.event(), id = handle.id(), "listener already removed");
            }
        }
    }
}

impl Drop for EventBridge {
    fn drop(&mut self) {
        self.detach();
    }
}
