use base64::{engine::general_purpose, Engine as _};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubsubMessageToPublish {
    data: String,
}

impl PubsubMessageToPublish {
    pub fn new(data: String) -> Self {
        Self { data }
    }

    /// The payload as it appears in a Pub/Sub JSON request body.
    pub fn wire_data(&self) -> String {
        general_purpose::STANDARD.encode(self.data.as_bytes())
    }
}

// gRPC carries `data` as raw bytes; the base64 form only exists on the JSON wire.
impl From<PubsubMessageToPublish> for google_cloud_googleapis::pubsub::v1::PubsubMessage {
    fn from(val: PubsubMessageToPublish) -> Self {
        Self {
            data: val.data.into(),
            ..Default::default()
        }
    }
}
