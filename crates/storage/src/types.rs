//! Storage types shared across modules

use repofeed_core::Repo;
use serde::{Deserialize, Serialize};

/// Generic paginated result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Offset from the start.
    pub offset: u64,
    /// Maximum items per page.
    pub limit: u64,
}

/// Items to merge into the cache in one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageWrite {
    /// Delete every cached repo before inserting.
    pub clear_first: bool,
    pub items: Vec<Repo>,
}

impl PageWrite {
    /// Replace the whole cache with `items`.
    #[must_use]
    pub const fn replace(items: Vec<Repo>) -> Self {
        Self { clear_first: true, items }
    }

    /// Add `items` to the cache.
    #[must_use]
    pub const fn append(items: Vec<Repo>) -> Self {
        Self { clear_first: false, items }
    }
}
