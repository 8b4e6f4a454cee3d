use quill_shared::ErrorResponse;
use thiserror::Error;

/// Failures surfaced by [`ApiClient`](crate::ApiClient) calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {}", body.message)]
    Api { status: u16, body: ErrorResponse },
}

impl ClientError {
    /// HTTP status of an API error, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}
