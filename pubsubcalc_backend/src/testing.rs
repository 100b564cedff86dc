//! In-memory [`MessageBus`] for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    bus::MessageBus,
    error::BusError,
    model::{PubsubMessageToPublish, TopicName},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreateBehaviour {
    #[default]
    Create,
    AlreadyExists,
    Fail,
}

/// Records every call and answers according to its configured behaviour.
#[derive(Debug, Default)]
pub struct RecordingBus {
    create: CreateBehaviour,
    fail_publish: bool,
    create_calls: Mutex<Vec<TopicName>>,
    published: Mutex<Vec<(TopicName, String)>>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create(mut self, create: CreateBehaviour) -> Self {
        self.create = create;
        self
    }

    pub fn failing_publish(mut self) -> Self {
        self.fail_publish = true;
        self
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.lock().unwrap().len()
    }

    /// `(topic, base64 wire payload)` for every publish attempt.
    pub fn published(&self) -> Vec<(TopicName, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageBus for RecordingBus {
    async fn create_topic(&self, topic: &TopicName) -> Result<(), BusError> {
        self.create_calls.lock().unwrap().push(topic.clone());

        match self.create {
            CreateBehaviour::Create => Ok(()),
            CreateBehaviour::AlreadyExists => Err(BusError::AlreadyExists),
            CreateBehaviour::Fail => Err(BusError::Other("permission denied".into())),
        }
    }

    async fn publish(
        &self,
        topic: &TopicName,
        message: PubsubMessageToPublish,
    ) -> Result<String, BusError> {
        let mut published = self.published.lock().unwrap();
        published.push((topic.clone(), message.wire_data()));

        if self.fail_publish {
            return Err(BusError::Other("deadline exceeded".into()));
        }
        Ok(format!("message-{}", published.len()))
    }
}
