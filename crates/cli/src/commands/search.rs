use anyhow::{Result, bail};
use repofeed_core::SearchResult;
use repofeed_core::env_config::RemoteConfig;
use repofeed_remote::GithubClient;
use repofeed_service::SearchCoordinator;

pub(crate) async fn run(query: &str, more: u32) -> Result<()> {
    let config = RemoteConfig::from_env();
    let client = GithubClient::new(&config)?;
    let coordinator = SearchCoordinator::new(client, config.page_size);

    let mut results = coordinator.start_query(query).await;
    // A failed page leaves the cursor in place, so the next request retries it.
    for _ in 0..more {
        coordinator.request_more(query).await;
    }

    let Some(latest) = results.next().await else {
        bail!("search session ended without a result");
    };
    println!("{}", serde_json::to_string_pretty(&latest)?);
    if let SearchResult::Failure(cause) = latest {
        bail!("search failed: {cause}");
    }
    Ok(())
}
