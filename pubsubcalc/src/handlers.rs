use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    Form,
};
use log::{debug, warn};

use crate::{
    app::AppState,
    error::AppError,
    sum::{add, parse_operands},
    views::{Delivery, IndexView, ResultView},
};

type Pairs = Vec<(String, String)>;

#[derive(Debug)]
pub struct SumRequest {
    pub number1: String,
    pub number2: String,
}

impl SumRequest {
    /// Takes the first value of each field, body before query string. A body
    /// that is not a urlencoded form contributes no fields.
    fn from_parts(
        query: Result<Query<Pairs>, QueryRejection>,
        body: Result<Form<Pairs>, FormRejection>,
    ) -> Self {
        let body = body.map(|Form(pairs)| pairs).unwrap_or_else(|rejection| {
            debug!("Ignoring form body: {rejection}");
            Vec::new()
        });
        let query = query.map(|Query(pairs)| pairs).unwrap_or_else(|rejection| {
            debug!("Ignoring query string: {rejection}");
            Vec::new()
        });

        let first = |name: &str| {
            body.iter()
                .chain(query.iter())
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .unwrap_or_default()
        };

        Self {
            number1: first("number1"),
            number2: first("number2"),
        }
    }
}

pub async fn root_handler() -> Html<String> {
    Html(
        IndexView {
            title: "Main Index Page",
            page_heading: "Calculate Result",
        }
        .render(),
    )
}

pub async fn add_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Pairs>, QueryRejection>,
    body: Result<Form<Pairs>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let request = SumRequest::from_parts(query, body);
    let (a, b) = parse_operands(&request.number1, &request.number2)?;
    let result = add(a, b)?;
    debug!("{a} + {b} = {result}");

    let delivery = match &state.publisher {
        Some(publisher) => Delivery::Published(publisher.publish(result.to_string()).await),
        None => {
            warn!("Publishing disabled, result {result} not sent");
            Delivery::Disabled
        }
    };

    Ok(Html(
        ResultView {
            page_heading: "Result is!...",
            result,
            delivery: &delivery,
        }
        .render(),
    ))
}

pub async fn last_result_handler() -> impl IntoResponse {
    StatusCode::OK
}
