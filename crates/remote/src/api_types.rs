use repofeed_core::Repo;
use serde::{Deserialize, Serialize};

/// One page of remote search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<Repo>,
}

impl RepoPage {
    #[must_use]
    pub fn new(items: Vec<Repo>) -> Self {
        Self { total_count: items.len() as u64, incomplete_results: false, items }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
