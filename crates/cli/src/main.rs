use anyhow::Result;
use clap::{Parser, Subcommand};
use repofeed_core::LoadDirection;
use repofeed_core::env_config::{DB_PATH_ENV, env_non_empty};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "repofeed")]
#[command(about = "Incremental sync of GitHub repository search results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch pages into an in-memory session and print the sorted view
    Search {
        query: String,
        /// Extra `request_more` rounds after the first fetch
        #[arg(short, long, default_value = "0")]
        more: u32,
    },
    /// Load one remote page into the local cache
    Sync {
        query: String,
        #[arg(short, long, default_value = "refresh")]
        direction: LoadDirection,
    },
    /// Print one cached page with its paging keys
    Cached {
        query: String,
        #[arg(short, long, default_value = "0")]
        offset: u32,
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

pub(crate) fn get_db_path() -> PathBuf {
    env_non_empty(DB_PATH_ENV).map_or_else(
        || {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("repofeed")
                .join("repos.db")
        },
        PathBuf::from,
    )
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search { query, more } => commands::search::run(&query, more).await?,
        Commands::Sync { query, direction } => commands::sync::run(&query, direction).await?,
        Commands::Cached { query, offset, limit } => commands::cached::run(&query, offset, limit)?,
    }

    Ok(())
}
