//! Storage backend trait abstraction

use std::num::NonZeroU32;

use async_trait::async_trait;
use repofeed_core::{LoadedPage, Repo};

use crate::error::StorageError;
use crate::types::{PageWrite, PaginatedResult};

/// Durable, key-ordered cache of repositories.
#[async_trait]
pub trait RepoStore: Send + Sync {
    /// Apply `write` atomically. Returns the number of rows inserted.
    async fn merge_page(&self, write: PageWrite) -> Result<usize, StorageError>;

    /// Cached repos matching `query`, most popular first.
    async fn repos_by_name(
        &self,
        query: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PaginatedResult<Repo>, StorageError>;

    /// One anchored block of the cached view.
    async fn load_page(
        &self,
        query: &str,
        offset: u32,
        page_size: NonZeroU32,
    ) -> Result<LoadedPage, StorageError>;

    /// Number of cached repos.
    async fn count(&self) -> Result<u64, StorageError>;
}

#[async_trait]
impl<T: RepoStore + ?Sized> RepoStore for std::sync::Arc<T> {
    async fn merge_page(&self, write: PageWrite) -> Result<usize, StorageError> {
        (**self).merge_page(write).await
    }
    async fn repos_by_name(
        &self,
        query: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PaginatedResult<Repo>, StorageError> {
        (**self).repos_by_name(query, offset, limit).await
    }
    async fn load_page(
        &self,
        query: &str,
        offset: u32,
        page_size: NonZeroU32,
    ) -> Result<LoadedPage, StorageError> {
        (**self).load_page(query, offset, page_size).await
    }
    async fn count(&self) -> Result<u64, StorageError> {
        (**self).count().await
    }
}
