use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::headers::no_store_headers;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("GitHub token is not configured")]
    MissingToken,

    #[error("GitHub query error: {0}")]
    Query(String),

    #[error("Upstream request failed with status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;

/// Response body for errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl FeedError {
    /// Status code and client-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            FeedError::MissingToken => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            FeedError::Query(message) => (StatusCode::BAD_REQUEST, message.clone()),
            FeedError::UpstreamStatus { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                message.clone(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
        }
    }
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        match &self {
            FeedError::MissingToken => error!("Pinned strategy selected without a GitHub token"),
            FeedError::Query(_) | FeedError::UpstreamStatus { .. } => {
                warn!("Upstream rejected feed request: {}", self)
            }
            other => error!("Failed to build repository feed: {}", other),
        }

        let (status, message) = self.status_and_message();
        (
            status,
            no_store_headers(),
            Json(ErrorResponse { error: message }),
        )
            .into_response()
    }
}
