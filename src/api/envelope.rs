use serde::Deserialize;

use crate::error::ApiError;

pub const STATUS_OK: &str = "OK";

/// Wrapper around every API response: `{status, result}` on success,
/// `{status, comment}` on failure.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    pub result: Option<T>,
    pub comment: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.status != STATUS_OK {
            return Err(ApiError::Protocol {
                status: self.status,
                comment: self.comment.unwrap_or_default(),
            });
        }
        self.result
            .ok_or_else(|| ApiError::Decode("status OK without a result".to_string()))
    }
}
