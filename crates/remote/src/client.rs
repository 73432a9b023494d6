use async_trait::async_trait;
use repofeed_core::env_config::RemoteConfig;

use crate::api_types::RepoPage;
use crate::error::RemoteError;
use crate::traits::FetchClient;

const USER_AGENT: &str = concat!("repofeed/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// Client for the GitHub repository search endpoint.
pub struct GithubClient {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl GithubClient {
    /// Creates a client from resolved configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RemoteError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            token: config.token.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl FetchClient for GithubClient {
    /// Fetches one page of repositories sorted by stars.
    ///
    /// # Errors
    /// Returns an error if the request fails, the API returns a non-success
    /// status, or the body cannot be parsed.
    async fn search_repos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<RepoPage, RemoteError> {
        tracing::debug!(query, page, per_page, "searching repositories");

        let mut request = self
            .client
            .get(format!("{}/search/repositories", self.base_url))
            .header(reqwest::header::ACCEPT, ACCEPT)
            .query(&[("q", query), ("sort", "stars")])
            .query(&[("page", page), ("per_page", per_page)]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_owned());
            tracing::warn!(status = status.as_u16(), page, "repository search rejected");
            return Err(RemoteError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let page_of_repos: RepoPage =
            serde_json::from_str(&body).map_err(|e| RemoteError::JsonParse {
                context: format!("search response (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        tracing::debug!(page, count = page_of_repos.items.len(), "repository page received");
        Ok(page_of_repos)
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
