use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use pubsubcalc_backend::{GooglePubsub, TopicPublisher};
use tokio::{net::TcpListener, signal};

use crate::{
    config::Config,
    error::ServerError,
    handlers::{add_handler, last_result_handler, root_handler},
};

/// Process-wide handles, built once at startup and shared read-only.
pub struct AppState {
    pub publisher: Option<TopicPublisher>,
}

impl AppState {
    /// Connects to Pub/Sub only when a result topic is configured.
    pub async fn new(config: &Config) -> Result<Arc<Self>, ServerError> {
        let publisher = match config.topic() {
            Some(topic) => {
                info!("Connecting to Pub/Sub, results go to {topic}");
                let bus = GooglePubsub::connect(config.emulator_project_id.clone()).await?;
                Some(TopicPublisher::new(Arc::new(bus), topic))
            }
            None => None,
        };

        Ok(Self::with_publisher(publisher))
    }

    pub fn with_publisher(publisher: Option<TopicPublisher>) -> Arc<Self> {
        Arc::new(Self { publisher })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/add", post(add_handler))
        .route("/getLastResult", get(last_result_handler))
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), ServerError> {
    info!("Initializing state...");
    let state = AppState::new(&config).await?;

    let address = config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
        response::Response,
    };
    use pubsubcalc_backend::{
        model::TopicName,
        testing::{CreateBehaviour, RecordingBus},
    };
    use tower::ServiceExt; // for oneshot

    fn topic() -> TopicName {
        TopicName::new("calculator-test", "calcfinished").unwrap()
    }

    fn app_with(bus: &Arc<RecordingBus>) -> Router {
        router(AppState::with_publisher(Some(TopicPublisher::new(
            bus.clone(),
            topic(),
        ))))
    }

    async fn post_add(app: Router, form: &str) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/add")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_owned()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn post_raw(app: Router, uri: &str, body: &str) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_renders_form() {
        let app = router(AppState::with_publisher(None));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(body_text(response).await.contains("<form"));
    }

    #[tokio::test]
    async fn test_add_publishes_sum() {
        let bus = Arc::new(RecordingBus::new());
        let response = post_add(app_with(&bus), "number1=1&number2=2").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"<p class="result">3</p>"#));
        assert_eq!(bus.published(), vec![(topic(), "Mw==".to_string())]);
    }

    #[tokio::test]
    async fn test_empty_field_is_rejected_without_publishing() {
        let bus = Arc::new(RecordingBus::new());
        let response = post_add(app_with(&bus), "number1=&number2=5").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("blank"));
        assert_eq!(bus.create_calls(), 0);
        assert!(bus.published().is_empty());
    }

    #[tokio::test]
    async fn test_absent_field_is_rejected_without_publishing() {
        let bus = Arc::new(RecordingBus::new());
        let response = post_add(app_with(&bus), "number2=5").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(bus.published().is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_field_is_rejected_without_publishing() {
        let bus = Arc::new(RecordingBus::new());
        let response = post_add(app_with(&bus), "number1=abc&number2=2").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("\"abc\""));
        assert_eq!(bus.create_calls(), 0);
        assert!(bus.published().is_empty());
    }

    #[tokio::test]
    async fn test_overflow_is_rejected_without_publishing() {
        let bus = Arc::new(RecordingBus::new());
        let form = format!("number1={}&number2=1", isize::MAX);
        let response = post_add(app_with(&bus), &form).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("does not fit"));
        assert_eq!(bus.create_calls(), 0);
        assert!(bus.published().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_field_uses_first_value() {
        let bus = Arc::new(RecordingBus::new());
        let response = post_add(app_with(&bus), "number1=1&number1=9&number2=2").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"<p class="result">3</p>"#));
        assert_eq!(bus.published(), vec![(topic(), "Mw==".to_string())]);
    }

    #[tokio::test]
    async fn test_body_without_form_content_type_is_blank() {
        let bus = Arc::new(RecordingBus::new());
        let response = post_raw(app_with(&bus), "/add", "number1=1&number2=2").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("blank"));
        assert!(bus.published().is_empty());
    }

    #[tokio::test]
    async fn test_query_string_fields_are_read() {
        let bus = Arc::new(RecordingBus::new());
        let response = post_raw(app_with(&bus), "/add?number1=4&number2=5", "").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"<p class="result">9</p>"#));
        assert_eq!(bus.published().len(), 1);
    }

    #[tokio::test]
    async fn test_body_takes_precedence_over_query_string() {
        let bus = Arc::new(RecordingBus::new());
        let app = app_with(&bus);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/add?number1=100")
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("number1=1&number2=2"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"<p class="result">3</p>"#));
    }

    #[tokio::test]
    async fn test_existing_topic_is_not_a_failure() {
        let bus = Arc::new(RecordingBus::new().with_create(CreateBehaviour::AlreadyExists));
        let response = post_add(app_with(&bus), "number1=40&number2=2").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Published at"));
        assert!(!body.contains("class=\"warning\""));
        assert_eq!(bus.published().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_publish_renders_warning() {
        let bus = Arc::new(RecordingBus::new().failing_publish());
        let response = post_add(app_with(&bus), "number1=1&number2=2").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("could not be confirmed as delivered"));
    }

    #[tokio::test]
    async fn test_disabled_publishing_still_renders_result() {
        let app = router(AppState::with_publisher(None));
        let response = post_add(app, "number1=-3&number2=10").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(r#"<p class="result">7</p>"#));
        assert!(body.contains("Publishing is disabled."));
    }

    #[tokio::test]
    async fn test_last_result_is_empty() {
        let app = router(AppState::with_publisher(None));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/getLastResult")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.is_empty());
    }
}
