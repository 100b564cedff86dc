pub mod bus;
pub mod error;
pub mod model;
pub mod outcome;
pub mod publisher;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use bus::{GooglePubsub, MessageBus};
pub use error::{BackendError, BusError};
pub use outcome::{EnsureTopicOutcome, PublishOutcome};
pub use publisher::TopicPublisher;
