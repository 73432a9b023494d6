//! Remote search client for repofeed
//!
//! `FetchClient` is the capability both coordinators consume; `GithubClient`
//! implements it over the GitHub REST search API.

mod api_types;
mod client;
#[cfg(test)]
mod client_tests;
pub mod error;
mod traits;

pub use api_types::RepoPage;
pub use client::{GithubClient, truncate};
pub use error::RemoteError;
pub use traits::FetchClient;
