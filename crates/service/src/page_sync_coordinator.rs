//! Fetch-and-merge protocol between the remote search and the durable cache.

use std::num::NonZeroU32;

use repofeed_core::constants::scoped_query;
use repofeed_core::{FetchOutcome, LoadDirection, LoadedPage, SyncError, resolve_remote_page};
use repofeed_remote::FetchClient;
use repofeed_storage::{PageWrite, RepoStore};

/// Resolves a load request to a remote page and merges the result into the
/// store. `Refresh` replaces the store contents in the same transaction.
pub struct PageSyncCoordinator<C, S> {
    client: C,
    store: S,
    query: String,
}

impl<C: FetchClient, S: RepoStore> PageSyncCoordinator<C, S> {
    #[must_use]
    pub fn new(client: C, store: S, query: &str) -> Self {
        Self { client, store, query: query.to_owned() }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Loads one page in `direction` relative to `loaded_pages`.
    ///
    /// `page_size` must match the remote page size for the whole session.
    /// Every failure is returned as `FetchOutcome::Failure`; the store is
    /// only written on success.
    pub async fn load(
        &self,
        direction: LoadDirection,
        loaded_pages: &[LoadedPage],
        page_size: NonZeroU32,
    ) -> FetchOutcome {
        let page = resolve_remote_page(direction, loaded_pages, page_size);
        match self.fetch_and_merge(direction, page, page_size).await {
            Ok(more_data_available) => FetchOutcome::Success { more_data_available },
            Err(cause) => {
                tracing::warn!(
                    query = %self.query,
                    %direction,
                    page,
                    kind = cause.kind(),
                    error = %cause,
                    "page sync failed"
                );
                FetchOutcome::Failure(cause)
            },
        }
    }

    async fn fetch_and_merge(
        &self,
        direction: LoadDirection,
        page: u32,
        page_size: NonZeroU32,
    ) -> Result<bool, SyncError> {
        let fetched =
            self.client.search_repos(&scoped_query(&self.query), page, page_size.get()).await?;
        let more_data_available = !fetched.items.is_empty();

        let write = PageWrite { clear_first: direction == LoadDirection::Refresh, items: fetched.items };
        let inserted = self.store.merge_page(write).await?;

        tracing::info!(
            query = %self.query,
            %direction,
            page,
            inserted,
            end_reached = !more_data_available,
            "page merged"
        );
        Ok(more_data_available)
    }
}
