pub mod bridge;
pub mod emitter;
pub mod error;
pub mod name;
pub mod payload;
pub mod source;

pub use bridge::{EventBridge, Subscription};
pub use emitter::LocalEmitter;
pub use error::{EventError, EventResult};
pub use name::EventName;
pub use payload::{normalize, NormalizedPayload, RawPayload};
pub use source::{EventSource, Listener, ListenerHandle};
