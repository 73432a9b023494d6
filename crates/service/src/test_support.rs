//! Scripted `FetchClient` for coordinator tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use repofeed_core::Repo;
use repofeed_remote::{FetchClient, RemoteError, RepoPage};
use tokio::sync::Notify;

pub enum Step {
    Page(Vec<Repo>),
    Reject(u16),
    /// Signal `entered`, then wait for the notify before answering.
    Hang(Arc<Notify>, Vec<Repo>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub query: String,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Default)]
pub struct FakeClient {
    script: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<Call>>,
    pub entered: Notify,
}

impl FakeClient {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self { script: Mutex::new(steps.into()), ..Self::default() })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn pages(&self) -> Vec<u32> {
        self.calls().iter().map(|c| c.page).collect()
    }
}

#[async_trait]
impl FetchClient for FakeClient {
    async fn search_repos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<RepoPage, RemoteError> {
        self.calls.lock().unwrap().push(Call { query: query.to_owned(), page, per_page });
        let step = self.script.lock().unwrap().pop_front();
        match step {
            None => Ok(RepoPage::default()),
            Some(Step::Page(items)) => Ok(RepoPage::new(items)),
            Some(Step::Reject(code)) => {
                Err(RemoteError::HttpStatus { code, body: format!("status {code}") })
            },
            Some(Step::Hang(release, items)) => {
                self.entered.notify_one();
                release.notified().await;
                Ok(RepoPage::new(items))
            },
        }
    }
}

pub fn repo(id: i64, name: &str, stars: u64) -> Repo {
    let mut repo = Repo::new(id, name, None, stars);
    repo.full_name = format!("owner/{name}");
    repo
}

pub fn names(items: &[Repo]) -> Vec<&str> {
    items.iter().map(|r| r.name.as_str()).collect()
}
