use std::num::NonZeroU32;

use repofeed_core::{LoadedPage, PageAnchor, Repo};
use rusqlite::{Transaction, params};

use super::{Storage, escape_like_pattern, get_conn};
use crate::error::StorageError;
use crate::types::{PageWrite, PaginatedResult};

const REPO_COLUMNS: &str = "id, name, full_name, description, url, stars, forks, language";
const NAME_FILTER: &str =
    "(name LIKE ?1 ESCAPE '\\' OR (description IS NOT NULL AND description LIKE ?1 ESCAPE '\\'))";

/// Writes available inside `Storage::transaction`.
///
/// Nothing is visible to other connections until the closure returns `Ok`;
/// an error rolls every write back.
pub struct RepoTx<'conn> {
    tx: Transaction<'conn>,
}

impl RepoTx<'_> {
    /// Delete every cached repo. Returns the number of rows removed.
    ///
    /// # Errors
    /// Returns error if the delete fails.
    pub fn clear_all(&self) -> Result<usize, StorageError> {
        Ok(self.tx.execute("DELETE FROM repos", [])?)
    }

    /// Insert repos in order. A repeated id replaces the earlier row.
    ///
    /// # Errors
    /// Returns error on the first row that violates the schema.
    pub fn insert_all(&self, repos: &[Repo]) -> Result<usize, StorageError> {
        let mut stmt = self.tx.prepare_cached(
            "INSERT OR REPLACE INTO repos (id, name, full_name, description, url, stars, forks, language)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for repo in repos {
            stmt.execute(params![
                repo.id,
                repo.name,
                repo.full_name,
                repo.description,
                repo.url,
                to_sql_count(repo.stars),
                to_sql_count(repo.forks),
                repo.language,
            ])?;
        }
        Ok(repos.len())
    }
}

fn to_sql_count(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn from_sql_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

fn row_to_repo(row: &rusqlite::Row<'_>) -> rusqlite::Result<Repo> {
    Ok(Repo {
        id: row.get(0)?,
        name: row.get(1)?,
        full_name: row.get(2)?,
        description: row.get(3)?,
        url: row.get(4)?,
        stars: from_sql_count(row.get(5)?),
        forks: from_sql_count(row.get(6)?),
        language: row.get(7)?,
    })
}

impl Storage {
    /// Run `body` inside one transaction, committing only if it succeeds.
    ///
    /// # Errors
    /// Returns the first error from `body` or from begin/commit; the store is
    /// left as it was before the call.
    pub fn transaction<T, F>(&self, body: F) -> Result<T, StorageError>
    where
        F: FnOnce(&RepoTx<'_>) -> Result<T, StorageError>,
    {
        let mut conn = get_conn(&self.pool)?;
        let repo_tx = RepoTx { tx: conn.transaction()? };
        let value = body(&repo_tx)?;
        repo_tx.tx.commit()?;
        Ok(value)
    }

    /// Atomically apply a page write: optional clear, then insert.
    ///
    /// # Errors
    /// Returns error if any statement fails; nothing is applied in that case.
    pub fn merge_page(&self, write: &PageWrite) -> Result<usize, StorageError> {
        let inserted = self.transaction(|tx| {
            if write.clear_first {
                let removed = tx.clear_all()?;
                tracing::debug!(removed, "cleared repo cache");
            }
            tx.insert_all(&write.items)
        })?;
        tracing::debug!(inserted, clear_first = write.clear_first, "merged repo page");
        Ok(inserted)
    }

    /// Cached repos matching `query`, most popular first.
    ///
    /// Matching uses SQLite `LIKE`, which folds case for ASCII letters only.
    /// A non-ASCII query matches case-sensitively here, unlike
    /// `Repo::matches`, which folds full Unicode case.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn repos_by_name(
        &self,
        query: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PaginatedResult<Repo>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let pattern = format!("%{}%", escape_like_pattern(query));

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM repos WHERE {NAME_FILTER}"),
            params![pattern],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {REPO_COLUMNS} FROM repos WHERE {NAME_FILTER}
             ORDER BY stars DESC, name ASC LIMIT ?2 OFFSET ?3"
        ))?;
        let items = stmt
            .query_map(params![pattern, limit, offset], row_to_repo)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult {
            items,
            total: from_sql_count(total),
            offset: u64::from(offset),
            limit: u64::from(limit),
        })
    }

    /// Materialize one block of the cached view with the keys of its neighbours.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn load_page(
        &self,
        query: &str,
        offset: u32,
        page_size: NonZeroU32,
    ) -> Result<LoadedPage, StorageError> {
        let size = page_size.get();
        let page = self.repos_by_name(query, offset, size)?;
        let full = page.items.len() as u64 == u64::from(size);
        let anchor = PageAnchor {
            prev_key: (offset > 0).then(|| offset.saturating_sub(size)),
            next_key: full.then(|| offset.saturating_add(size)),
        };
        Ok(LoadedPage::new(page.items, anchor))
    }

    /// Number of cached repos.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn count(&self) -> Result<u64, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM repos", [], |row| row.get(0))?;
        Ok(from_sql_count(count))
    }
}
