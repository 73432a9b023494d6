use serde::Serialize;

use crate::error::SyncError;
use crate::repo::Repo;

/// Result of one `PageSyncCoordinator::load` call. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was merged. An empty page means the end was reached.
    Success { more_data_available: bool },
    Failure(SyncError),
}

impl FetchOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// `Some(true)` while further pages exist, `None` on failure.
    #[must_use]
    pub const fn more_data_available(&self) -> Option<bool> {
        match *self {
            Self::Success { more_data_available } => Some(more_data_available),
            Self::Failure(_) => None,
        }
    }
}

/// Value published to result-stream subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum SearchResult {
    Success(Vec<Repo>),
    Failure(#[serde(serialize_with = "serialize_cause")] SyncError),
}

impl SearchResult {
    #[must_use]
    pub fn items(&self) -> Option<&[Repo]> {
        match self {
            Self::Success(items) => Some(items),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&SyncError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }
}

fn serialize_cause<S: serde::Serializer>(err: &SyncError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(err)
}
