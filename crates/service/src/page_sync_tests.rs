#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;
    use std::sync::Arc;

    use repofeed_core::{FetchOutcome, LoadDirection, LoadedPage, PageAnchor, SyncError};
    use repofeed_storage::{PageWrite, Storage};
    use tempfile::TempDir;

    use crate::PageSyncCoordinator;
    use crate::test_support::{FakeClient, Step, names, repo};

    const SIZE: NonZeroU32 = match NonZeroU32::new(2) {
        Some(size) => size,
        None => unreachable!(),
    };

    fn setup(steps: Vec<Step>) -> (PageSyncCoordinator<Arc<FakeClient>, Storage>, Arc<FakeClient>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(&temp_dir.path().join("sync.db")).unwrap();
        let client = FakeClient::new(steps);
        let coordinator = PageSyncCoordinator::new(Arc::clone(&client), storage, "repo");
        (coordinator, client, temp_dir)
    }

    fn cached_names(storage: &Storage) -> Vec<String> {
        let page = storage.repos_by_name("", 0, 100).unwrap();
        names(&page.items).into_iter().map(ToOwned::to_owned).collect()
    }

    #[tokio::test]
    async fn refresh_replaces_store_and_requests_first_page() {
        let (coordinator, client, _dir) = setup(vec![Step::Page(vec![repo(10, "repo-new", 7)])]);
        coordinator.store().merge_page(&PageWrite::append(vec![repo(1, "repo-old", 1)])).unwrap();
        let stale = vec![LoadedPage::new(vec![repo(1, "repo-old", 1)], PageAnchor { prev_key: None, next_key: Some(2) })];

        let outcome = coordinator.load(LoadDirection::Refresh, &stale, SIZE).await;

        assert_eq!(outcome, FetchOutcome::Success { more_data_available: true });
        assert_eq!(client.pages(), vec![1]);
        assert_eq!(client.calls()[0].query, "repo in:name,description");
        assert_eq!(client.calls()[0].per_page, 2);
        assert_eq!(cached_names(coordinator.store()), vec!["repo-new"]);
    }

    #[tokio::test]
    async fn forward_appends_next_page_from_anchor() {
        let (coordinator, client, _dir) = setup(vec![
            Step::Page(vec![repo(1, "repo-a", 9), repo(2, "repo-b", 8)]),
            Step::Page(vec![repo(3, "repo-c", 7), repo(4, "repo-d", 6)]),
        ]);
        coordinator.load(LoadDirection::Refresh, &[], SIZE).await;
        let window = coordinator.store().load_page("repo", 0, SIZE).unwrap();
        assert_eq!(window.anchor.next_key, Some(2));

        let outcome = coordinator.load(LoadDirection::ExtendForward, &[window], SIZE).await;

        assert!(outcome.is_success());
        assert_eq!(client.pages(), vec![1, 2]);
        assert_eq!(cached_names(coordinator.store()), vec!["repo-a", "repo-b", "repo-c", "repo-d"]);
    }

    #[tokio::test]
    async fn empty_page_signals_end_without_touching_store() {
        let (coordinator, _client, _dir) = setup(vec![Step::Page(vec![repo(1, "repo-a", 9)]), Step::Page(vec![])]);
        coordinator.load(LoadDirection::Refresh, &[], SIZE).await;
        let window = coordinator.store().load_page("repo", 0, SIZE).unwrap();

        let outcome = coordinator.load(LoadDirection::ExtendForward, &[window], SIZE).await;

        assert_eq!(outcome, FetchOutcome::Success { more_data_available: false });
        assert_eq!(cached_names(coordinator.store()), vec!["repo-a"]);
    }

    #[tokio::test]
    async fn remote_rejection_leaves_store_untouched() {
        let (coordinator, _client, _dir) = setup(vec![Step::Reject(422)]);
        coordinator.store().merge_page(&PageWrite::append(vec![repo(1, "repo-old", 1)])).unwrap();

        let outcome = coordinator.load(LoadDirection::Refresh, &[], SIZE).await;

        assert_eq!(
            outcome,
            FetchOutcome::Failure(SyncError::RemoteRejection { status: 422, message: "status 422".to_owned() })
        );
        assert_eq!(cached_names(coordinator.store()), vec!["repo-old"]);
    }

    #[tokio::test]
    async fn storage_failure_during_refresh_rolls_back() {
        let (coordinator, _client, _dir) =
            setup(vec![Step::Page(vec![repo(5, "repo-fresh", 3), repo(6, "", 2)])]);
        coordinator
            .store()
            .merge_page(&PageWrite::append(vec![repo(1, "repo-old", 1), repo(2, "repo-older", 0)]))
            .unwrap();

        let outcome = coordinator.load(LoadDirection::Refresh, &[], SIZE).await;

        assert!(matches!(outcome, FetchOutcome::Failure(SyncError::Storage(_))));
        assert_eq!(cached_names(coordinator.store()), vec!["repo-old", "repo-older"]);
    }

    #[tokio::test]
    async fn backward_without_previous_key_uses_first_page() {
        let (coordinator, client, _dir) = setup(vec![Step::Page(vec![repo(1, "repo-a", 1)])]);
        let window = LoadedPage::new(vec![repo(1, "repo-a", 1)], PageAnchor { prev_key: None, next_key: None });

        let outcome = coordinator.load(LoadDirection::ExtendBackward, &[window], SIZE).await;

        assert!(outcome.is_success());
        assert_eq!(client.pages(), vec![1]);
    }
}
