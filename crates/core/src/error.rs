//! Uniform failure cause reported by both coordinators.
//!
//! Crate-level errors (`RemoteError`, `StorageError`) are converted into this
//! taxonomy at the coordinator boundary so a failure can be cloned into every
//! subscriber of a result stream.

use thiserror::Error;

/// Why a fetch or merge did not complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Network or IO level failure, including undecodable response bodies.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The remote endpoint answered but signaled failure.
    #[error("remote rejected request (HTTP {status}): {message}")]
    RemoteRejection { status: u16, message: String },

    /// The durable store transaction could not complete.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl SyncError {
    /// Short stable label, used as a tracing field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match *self {
            Self::Transport(_) => "transport",
            Self::RemoteRejection { .. } => "remote_rejection",
            Self::Storage(_) => "storage",
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
