mod pubsub_message_to_publish;
pub use pubsub_message_to_publish::PubsubMessageToPublish;

use std::fmt;

/// Fully qualified topic name, `projects/<project>/topics/<topic>`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TopicName(String);

impl TopicName {
    /// Returns `None` when either part is empty.
    pub fn new(project: &str, topic: &str) -> Option<Self> {
        let (project, topic) = (project.trim(), topic.trim());
        if project.is_empty() || topic.is_empty() {
            return None;
        }

        Some(Self(fqrn("topics", project, topic)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn fqrn(resource: &str, project: &str, name: &str) -> String {
    format!("projects/{project}/{resource}/{name}")
}
