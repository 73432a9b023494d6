//! Projection of the accumulated cache into the published view.

use std::cmp::Ordering;

use crate::repo::Repo;

/// Most popular first; equal popularity ordered by name.
#[must_use]
pub fn by_popularity(a: &Repo, b: &Repo) -> Ordering {
    b.stars.cmp(&a.stars).then_with(|| a.name.cmp(&b.name))
}

/// Keeps the repos matching `query` and orders them by popularity.
///
/// Runs over the whole cache on every publish, not just the newest page.
/// Items are not de-duplicated by id.
#[must_use]
pub fn filter_and_sort(cache: &[Repo], query: &str) -> Vec<Repo> {
    let mut view: Vec<Repo> = cache.iter().filter(|repo| repo.matches(query)).cloned().collect();
    view.sort_by(by_popularity);
    view
}
