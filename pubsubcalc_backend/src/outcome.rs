use chrono::{DateTime, Utc};

use crate::error::BusError;

/// Result of making sure a topic exists before publishing to it.
#[derive(Debug)]
pub enum EnsureTopicOutcome {
    Created,
    AlreadyPresent,
    Failed(BusError),
}

impl EnsureTopicOutcome {
    pub fn is_usable(&self) -> bool {
        !matches!(self, EnsureTopicOutcome::Failed(_))
    }
}

/// Result of a best-effort publish. Failures never propagate as errors; the
/// caller decides whether an unconfirmed delivery is worth surfacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Delivered {
        message_id: String,
        published_at: DateTime<Utc>,
    },
    AttemptedButUnconfirmed {
        reason: String,
    },
}

impl PublishOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, PublishOutcome::Delivered { .. })
    }
}
