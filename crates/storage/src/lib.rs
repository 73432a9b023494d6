//! Storage layer for repofeed
//!
//! SQLite-backed repository cache. Page merges run in a single transaction
//! so readers never see a cleared-but-not-yet-refilled cache.

pub mod error;
mod migrations;
mod sqlite_async;
mod storage;
#[cfg(test)]
mod tests;
pub mod traits;
mod types;

pub use error::StorageError;
pub use storage::{RepoTx, Storage};
pub use traits::RepoStore;
pub use types::{PageWrite, PaginatedResult};
