//! Mapping of service errors onto HTTP responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::error::FeedbackError;

/// JSON error body: `{error}` plus optional detail fields
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            submitted_at: None,
        }
    }
}

/// Error returned by route handlers
#[derive(Debug)]
pub enum ApiError {
    /// A service failure, with the operation it interrupted
    Feedback {
        source: FeedbackError,
        context: &'static str,
    },
    /// The body could not be decoded
    BadRequest(String),
}

impl ApiError {
    /// Wrap service errors from an operation described by `context`
    pub fn context(context: &'static str) -> impl Fn(FeedbackError) -> ApiError {
        move |source| ApiError::Feedback { source, context }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Status code for a service error
pub fn status_for(err: &FeedbackError) -> StatusCode {
    match err {
        FeedbackError::DuplicateSubmission { .. } => StatusCode::CONFLICT,
        FeedbackError::Unauthorized => StatusCode::UNAUTHORIZED,
        FeedbackError::NotFound(_) => StatusCode::NOT_FOUND,
        FeedbackError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
            }
            ApiError::Feedback { source, context } => {
                let status = status_for(&source);
                let body = match source {
                    FeedbackError::DuplicateSubmission { ref submitted_at } => ErrorBody {
                        submitted_at: Some(submitted_at.clone()),
                        ..ErrorBody::new(source.to_string())
                    },
                    FeedbackError::Storage(ref e) => {
                        error!("{}: {}", context, e);
                        ErrorBody {
                            message: Some(context.to_string()),
                            ..ErrorBody::new("Internal server error")
                        }
                    }
                    other => ErrorBody::new(other.to_string()),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
