use std::sync::Arc;

use chrono::Utc;
use log::{error, info, warn};

use crate::{
    bus::MessageBus,
    error::BusError,
    model::{PubsubMessageToPublish, TopicName},
    outcome::{EnsureTopicOutcome, PublishOutcome},
};

/// Publishes payloads to a single topic, creating it on demand.
#[derive(Clone)]
pub struct TopicPublisher {
    bus: Arc<dyn MessageBus>,
    topic: TopicName,
}

impl TopicPublisher {
    pub fn new(bus: Arc<dyn MessageBus>, topic: TopicName) -> Self {
        Self { bus, topic }
    }

    /// Attempts to create the topic. Nothing is cached, so every call goes
    /// to the remote service.
    pub async fn ensure_topic(&self) -> EnsureTopicOutcome {
        match self.bus.create_topic(&self.topic).await {
            Ok(()) => {
                info!("Created topic {}", self.topic);
                EnsureTopicOutcome::Created
            }
            Err(BusError::AlreadyExists) => {
                info!("Topic {} already created ... continuing", self.topic);
                EnsureTopicOutcome::AlreadyPresent
            }
            Err(err) => {
                error!("Creating topic {} failed: {err}", self.topic);
                EnsureTopicOutcome::Failed(err)
            }
        }
    }

    /// Ensures the topic exists, then publishes `payload` once. A failed
    /// creation does not stop the publish attempt.
    pub async fn publish(&self, payload: String) -> PublishOutcome {
        if !self.ensure_topic().await.is_usable() {
            warn!("Publishing to {} without a confirmed topic", self.topic);
        }

        let message = PubsubMessageToPublish::new(payload);
        match self.bus.publish(&self.topic, message).await {
            Ok(message_id) => {
                info!("Published message {message_id} to {}", self.topic);
                PublishOutcome::Delivered {
                    message_id,
                    published_at: Utc::now(),
                }
            }
            Err(err) => {
                error!("Publishing to {} failed: {err}", self.topic);
                PublishOutcome::AttemptedButUnconfirmed {
                    reason: err.to_string(),
                }
            }
        }
    }
}
