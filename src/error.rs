use std::io;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure of a single API call. Callers that want the fail-soft behaviour
/// go through `ApiClient::friends_or_empty` / `ApiClient::ratings_or_empty`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {status}{}", comment_suffix(.comment))]
    HttpStatus {
        status: u16,
        comment: Option<String>,
    },

    #[error("API returned status {status}: {comment}")]
    Protocol { status: String, comment: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

fn comment_suffix(comment: &Option<String>) -> String {
    comment.as_deref().map(|c| format!(": {c}")).unwrap_or_default()
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Errors surfaced by the HTTP adapter.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Pin store unavailable: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
