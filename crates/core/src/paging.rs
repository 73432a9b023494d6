//! Paging policy: which remote page a load request maps to.
//!
//! Page anchors carry database offsets. The remote API counts pages from 1,
//! so an offset maps to `offset / page_size + 1`. This only holds while the
//! remote page size equals the caller's page size for the whole session.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::STARTING_PAGE_INDEX;
use crate::repo::Repo;

/// Keys needed to fetch the neighbours of a materialized block.
///
/// `None` means there is nothing further in that direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAnchor {
    pub prev_key: Option<u32>,
    pub next_key: Option<u32>,
}

/// A contiguous block of items the caller has already materialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedPage {
    pub items: Vec<Repo>,
    pub anchor: PageAnchor,
}

impl LoadedPage {
    #[must_use]
    pub const fn new(items: Vec<Repo>, anchor: PageAnchor) -> Self {
        Self { items, anchor }
    }
}

/// Which end of the materialized window to extend, or whether to restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadDirection {
    Refresh,
    #[serde(rename = "backward")]
    ExtendBackward,
    #[serde(rename = "forward")]
    ExtendForward,
}

impl LoadDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Refresh => "refresh",
            Self::ExtendBackward => "backward",
            Self::ExtendForward => "forward",
        }
    }
}

impl fmt::Display for LoadDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid load direction: {0} (expected refresh, backward or forward)")]
pub struct InvalidDirection(String);

impl FromStr for LoadDirection {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "refresh" => Ok(Self::Refresh),
            "backward" | "prepend" => Ok(Self::ExtendBackward),
            "forward" | "append" => Ok(Self::ExtendForward),
            other => Err(InvalidDirection(other.to_owned())),
        }
    }
}

/// Database offset a load in `direction` should start from.
///
/// Extensions use the anchor of the last page holding any items. A missing
/// page or a missing key falls back to the starting index.
#[must_use]
pub fn resolve_offset(direction: LoadDirection, loaded_pages: &[LoadedPage]) -> u32 {
    let last_non_empty = || loaded_pages.iter().rev().find(|page| !page.items.is_empty());
    match direction {
        LoadDirection::Refresh => STARTING_PAGE_INDEX,
        LoadDirection::ExtendBackward => last_non_empty()
            .and_then(|page| page.anchor.prev_key)
            .unwrap_or(STARTING_PAGE_INDEX),
        LoadDirection::ExtendForward => last_non_empty()
            .and_then(|page| page.anchor.next_key)
            .unwrap_or(STARTING_PAGE_INDEX),
    }
}

/// Converts a database offset into a 1-based remote page number.
#[must_use]
pub const fn remote_page_for_offset(offset: u32, page_size: NonZeroU32) -> u32 {
    (offset / page_size.get()).saturating_add(1)
}

/// Remote page to request for a load in `direction`.
#[must_use]
pub fn resolve_remote_page(
    direction: LoadDirection,
    loaded_pages: &[LoadedPage],
    page_size: NonZeroU32,
) -> u32 {
    remote_page_for_offset(resolve_offset(direction, loaded_pages), page_size)
}
