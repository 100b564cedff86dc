use async_trait::async_trait;
use google_cloud_gax::{conn::Environment, retry::RetrySetting};
use google_cloud_pubsub::{
    client::{Client, ClientConfig},
    publisher::PublisherConfig,
};
use log::{debug, info};

use crate::{
    error::{BackendError, BusError},
    model::{PubsubMessageToPublish, TopicName},
};

/// The remote publish/subscribe service, as seen by the publisher.
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Creates `topic`. An existing topic is reported as [`BusError::AlreadyExists`].
    async fn create_topic(&self, topic: &TopicName) -> Result<(), BusError>;

    /// Publishes one message and returns its server-assigned id.
    async fn publish(
        &self,
        topic: &TopicName,
        message: PubsubMessageToPublish,
    ) -> Result<String, BusError>;
}

pub struct GooglePubsub {
    client: Client,
}

impl GooglePubsub {
    /// Resolves ambient default credentials once and builds the client.
    pub async fn connect(emulator_project_id: Option<String>) -> Result<Self, BackendError> {
        let client = create_client(emulator_project_id).await?;
        Ok(Self { client })
    }
}

#[async_trait]
impl MessageBus for GooglePubsub {
    async fn create_topic(&self, topic: &TopicName) -> Result<(), BusError> {
        self.client
            .topic(topic.as_str())
            .create(None, Some(single_attempt()))
            .await
            .map_err(BusError::from)
    }

    async fn publish(
        &self,
        topic: &TopicName,
        message: PubsubMessageToPublish,
    ) -> Result<String, BusError> {
        debug!("Publishing {} to {topic}", message.wire_data());

        let topic = self.client.topic(topic.as_str());
        let mut publisher = topic.new_publisher(Some(PublisherConfig {
            retry_setting: Some(single_attempt()),
            ..Default::default()
        }));
        let awaiter = publisher.publish(message.into()).await;
        let result = awaiter.get().await;
        publisher.shutdown().await;

        result.map_err(BusError::from)
    }
}

/// One remote call per operation: no status code is retried.
fn single_attempt() -> RetrySetting {
    RetrySetting {
        take: 0,
        codes: vec![],
        ..Default::default()
    }
}

async fn create_client(emulator_project_id: Option<String>) -> Result<Client, BackendError> {
    let mut config = ClientConfig::default()
        .with_auth()
        .await
        .map_err(|e| BackendError::Auth(e.to_string()))?;

    if let (Environment::Emulator(host), Some(emulator_project_id)) =
        (&config.environment, emulator_project_id)
    {
        info!("Using Pub/Sub emulator at {host} with project {emulator_project_id}");
        config.project_id = Some(emulator_project_id);
    }

    Client::new(config)
        .await
        .map_err(|e| BackendError::Client(e.to_string()))
}
