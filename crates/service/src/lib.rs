//! Service layer for repofeed
//!
//! `PageSyncCoordinator` keeps the durable cache in step with the remote
//! search; `SearchCoordinator` serves an in-memory, continuously republished
//! view of one query.

#![allow(clippy::missing_errors_doc, reason = "Failures are values, not errors")]

pub mod latest_value;
mod page_sync_coordinator;
#[cfg(test)]
mod page_sync_tests;
mod search_coordinator;
#[cfg(test)]
mod test_support;

pub use latest_value::{Publisher, ResultPublisher, ResultSubscription, Subscription};
pub use page_sync_coordinator::PageSyncCoordinator;
pub use search_coordinator::SearchCoordinator;
