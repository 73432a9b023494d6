//! Shared constants for repofeed.

use std::num::NonZeroU32;

/// First key of the paging protocol. Remote pages are 1-based.
pub const STARTING_PAGE_INDEX: u32 = 1;

/// Default number of repositories requested per remote page.
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(30) {
    Some(size) => size,
    None => unreachable!(),
};

/// Search qualifier that scopes a free-text query to repository names and descriptions.
pub const IN_QUALIFIER: &str = "in:name,description";

/// Default remote base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default HTTP client timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default SQLite connection pool size.
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;

/// Appends the scoping qualifier to a user query.
#[must_use]
pub fn scoped_query(query: &str) -> String {
    format!("{} {IN_QUALIFIER}", query.trim())
}
