use google_cloud_gax::grpc::{Code, Status};
use thiserror::Error;

/// Failure of a single call against the message bus.
#[derive(Error, Debug)]
pub enum BusError {
    #[error("topic already exists")]
    AlreadyExists,

    #[error("pubsub request failed: {0}")]
    Status(Status),

    #[error("{0}")]
    Other(String),
}

impl From<Status> for BusError {
    fn from(status: Status) -> Self {
        match status.code() {
            Code::AlreadyExists => BusError::AlreadyExists,
            _ => BusError::Status(status),
        }
    }
}

/// Failure while setting up the Pub/Sub client at startup.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to resolve default credentials: {0}")]
    Auth(String),

    #[error("failed to create pubsub client: {0}")]
    Client(String),
}
