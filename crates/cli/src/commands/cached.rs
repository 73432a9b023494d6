use anyhow::Result;
use repofeed_core::env_config::{PAGE_SIZE_ENV, env_parse_with_default};
use repofeed_core::constants::DEFAULT_PAGE_SIZE;
use repofeed_storage::Storage;
use std::num::NonZeroU32;

use crate::{ensure_db_dir, get_db_path};

pub(crate) fn run(query: &str, offset: u32, limit: Option<u32>) -> Result<()> {
    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    let storage = Storage::new(&db_path)?;

    let page_size = limit
        .and_then(NonZeroU32::new)
        .unwrap_or_else(|| env_parse_with_default(PAGE_SIZE_ENV, DEFAULT_PAGE_SIZE));
    let page = storage.load_page(query, offset, page_size)?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
