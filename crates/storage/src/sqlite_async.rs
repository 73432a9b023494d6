//! Async trait implementation for SQLite `Storage` via `spawn_blocking`.

use std::num::NonZeroU32;

use async_trait::async_trait;
use repofeed_core::{LoadedPage, Repo};

use crate::Storage;
use crate::error::StorageError;
use crate::traits::RepoStore;
use crate::types::{PageWrite, PaginatedResult};

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Join(e.to_string()))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@own arg`: move an owned value, pass as `&arg`
/// - `@str arg`: `.to_owned()` a `&str`, pass as `&arg`
/// - `@val arg`: move directly (Copy types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture own $arg:ident) => { };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture val $arg:ident) => { };
    (@pass own $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

#[async_trait]
impl RepoStore for Storage {
    async fn merge_page(&self, write: PageWrite) -> Result<usize, StorageError> {
        delegate!(self, merge_page, @own write)
    }
    async fn repos_by_name(
        &self,
        query: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PaginatedResult<Repo>, StorageError> {
        delegate!(self, repos_by_name, @str query, @val offset, @val limit)
    }
    async fn load_page(
        &self,
        query: &str,
        offset: u32,
        page_size: NonZeroU32,
    ) -> Result<LoadedPage, StorageError> {
        delegate!(self, load_page, @str query, @val offset, @val page_size)
    }
    async fn count(&self) -> Result<u64, StorageError> {
        delegate!(self, count)
    }
}
