use clap::Parser;
use log::warn;
use pubsubcalc_backend::model::TopicName;

#[derive(Parser, Debug)]
#[command(about = "Adds two numbers and publishes the sum to a Pub/Sub topic")]
pub struct Config {
    /// Google Cloud project that owns the result topic.
    #[arg(long, env = "PROJECT_NAME")]
    pub project_name: Option<String>,

    /// Topic the sums are published to.
    #[arg(long, env = "RESULT_TOPIC")]
    pub result_topic: Option<String>,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Optional override for the Pub/Sub Emulator project ID.
    #[arg(long)]
    pub emulator_project_id: Option<String>,
}

impl Config {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The result topic, or `None` when publishing is not configured.
    pub fn topic(&self) -> Option<TopicName> {
        let (Some(project), Some(topic)) = (&self.project_name, &self.result_topic) else {
            warn!("PROJECT_NAME or RESULT_TOPIC not set, publishing disabled");
            return None;
        };

        let topic_name = TopicName::new(project, topic);
        if topic_name.is_none() {
            warn!("PROJECT_NAME or RESULT_TOPIC is blank, publishing disabled");
        }
        topic_name
    }
}
