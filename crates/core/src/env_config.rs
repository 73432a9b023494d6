//! Environment variable parsing with warn-level logging for invalid values.

use std::fmt::Display;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::constants::{DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PAGE_SIZE};

pub const API_URL_ENV: &str = "REPOFEED_API_URL";
pub const GITHUB_TOKEN_ENV: &str = "REPOFEED_GITHUB_TOKEN";
pub const HTTP_TIMEOUT_ENV: &str = "REPOFEED_HTTP_TIMEOUT_SECS";
pub const PAGE_SIZE_ENV: &str = "REPOFEED_PAGE_SIZE";
pub const DB_POOL_SIZE_ENV: &str = "REPOFEED_DB_POOL_SIZE";
pub const DB_PATH_ENV: &str = "REPOFEED_DB_PATH";

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: FromStr + Display>(var: &str, default: T) -> T {
    parse_with_default(var, std::env::var(var).ok().as_deref(), default)
}

fn parse_with_default<T: FromStr + Display>(var: &str, raw: Option<&str>, default: T) -> T {
    match raw {
        Some(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}

/// Non-empty value of `var`, if set.
pub fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Settings for reaching the remote search endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub page_size: NonZeroU32,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            token: None,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RemoteConfig {
    /// Reads `REPOFEED_*` variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: env_non_empty(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
            token: env_non_empty(GITHUB_TOKEN_ENV),
            timeout_secs: env_parse_with_default(HTTP_TIMEOUT_ENV, DEFAULT_HTTP_TIMEOUT_SECS),
            page_size: env_parse_with_default(PAGE_SIZE_ENV, DEFAULT_PAGE_SIZE),
        }
    }
}
