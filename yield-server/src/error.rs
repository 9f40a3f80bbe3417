use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use yield_core::RepositoryError;
use yield_core::validation::{SubmissionError, ValidationError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Submission(#[from] SubmissionError),

    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("{} field(s) failed validation", .0.len())]
    Validation(Vec<ValidationError>),

    /// Storage failure; `message` is what the client sees.
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<ValidationError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Submission(e) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: e.title(),
                    message: e.to_string(),
                    errors: None,
                },
            ),
            ApiError::MalformedBody(reason) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Invalid request body",
                    message: reason,
                    errors: None,
                },
            ),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Validation failed",
                    message: "Please correct the highlighted fields".to_string(),
                    errors: Some(errors),
                },
            ),
            // The underlying cause is logged by the handler, never sent.
            ApiError::Storage { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Internal server error",
                    message: message.to_string(),
                    errors: None,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
