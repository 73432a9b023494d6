use std::num::NonZeroU32;

use anyhow::Result;
use repofeed_core::env_config::RemoteConfig;
use repofeed_core::{FetchOutcome, LoadDirection, LoadedPage};
use repofeed_remote::GithubClient;
use repofeed_service::PageSyncCoordinator;
use repofeed_storage::Storage;

use crate::{ensure_db_dir, get_db_path};

/// Stops runaway reads of a very large cache.
const MAX_WINDOW_PAGES: usize = 1000;

/// Cached pages for `query`, in order, as a paging UI would hold them.
fn cached_window(storage: &Storage, query: &str, page_size: NonZeroU32) -> Result<Vec<LoadedPage>> {
    let mut pages = Vec::new();
    let mut offset = Some(0);
    while let Some(current) = offset {
        if pages.len() >= MAX_WINDOW_PAGES {
            break;
        }
        let page = storage.load_page(query, current, page_size)?;
        offset = page.anchor.next_key;
        pages.push(page);
    }
    Ok(pages)
}

pub(crate) async fn run(query: &str, direction: LoadDirection) -> Result<()> {
    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    let storage = Storage::new(&db_path)?;
    let config = RemoteConfig::from_env();
    let client = GithubClient::new(&config)?;

    let window = cached_window(&storage, query, config.page_size)?;
    let coordinator = PageSyncCoordinator::new(client, storage, query);
    let outcome = coordinator.load(direction, &window, config.page_size).await;

    let report = match &outcome {
        FetchOutcome::Success { more_data_available } => serde_json::json!({
            "direction": direction,
            "status": "success",
            "more_data_available": more_data_available,
            "cached": coordinator.store().count()?,
        }),
        FetchOutcome::Failure(cause) => serde_json::json!({
            "direction": direction,
            "status": "failure",
            "error": cause.to_string(),
        }),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let FetchOutcome::Failure(cause) = outcome {
        anyhow::bail!("sync failed: {cause}");
    }
    Ok(())
}
