use async_trait::async_trait;

use crate::api_types::RepoPage;
use crate::error::RemoteError;

/// Paged repository search against a remote source.
///
/// Must be safe to call repeatedly. A failed request is an `Err`; an empty or
/// short page is a successful `RepoPage`.
#[async_trait]
pub trait FetchClient: Send + Sync {
    async fn search_repos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<RepoPage, RemoteError>;
}

#[async_trait]
impl<T: FetchClient + ?Sized> FetchClient for std::sync::Arc<T> {
    async fn search_repos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<RepoPage, RemoteError> {
        (**self).search_repos(query, page, per_page).await
    }
}
