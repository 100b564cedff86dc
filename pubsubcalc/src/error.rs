use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pubsubcalc_backend::BackendError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    #[error("Number 1 or number 2 is blank: number1 - {number1:?}, number2 - {number2:?}")]
    MissingField { number1: String, number2: String },

    #[error("Error occurred converting to number: {0:?}")]
    Parse(String),

    #[error("Sum of {0} and {1} does not fit in an integer")]
    Overflow(isize, isize),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Failure that stops the server from starting or keeps it from serving.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
