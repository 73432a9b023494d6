//! Test utilities and module declarations for storage tests.

use crate::Storage;
use repofeed_core::Repo;
use tempfile::TempDir;

pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn create_test_repo(id: i64, name: &str, stars: u64) -> Repo {
    let mut repo = Repo::new(id, name, Some("test description"), stars);
    repo.full_name = format!("owner/{name}");
    repo.url = format!("https://github.com/owner/{name}");
    repo.language = Some("Rust".to_owned());
    repo
}
