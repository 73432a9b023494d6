//! Typed error enum for the remote crate.

use repofeed_core::SyncError;
use thiserror::Error;

/// Errors from remote search calls.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl From<RemoteError> for SyncError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::HttpStatus { code, body } => {
                Self::RemoteRejection { status: code, message: body }
            },
            other => Self::Transport(other.to_string()),
        }
    }
}
