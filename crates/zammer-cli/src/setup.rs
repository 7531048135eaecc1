//! CLI setup module
//!
//! Resolves the database location and opens the tracker over it.

use anyhow::{Context, Result};
use tracing::info;
use zammer_core::{LocalStorage, RecentlyViewed, Storage, TrackerConfig, paths};

use crate::config::CliConfig;

/// Database path priority: --db-path / ZAMMER_DB_PATH > config file > data dir
pub fn resolve_db_path(cli_db_path: Option<String>, config: &CliConfig) -> Result<String> {
    match cli_db_path.or_else(|| config.default.db_path.clone()) {
        Some(path) => Ok(path),
        None => paths::ensure_database_path_string(),
    }
}

/// Open local storage and load the recently-viewed tracker from it
pub fn open_tracker(
    db_path: &str,
    config: TrackerConfig,
) -> Result<RecentlyViewed<LocalStorage>> {
    let storage =
        Storage::new(db_path).with_context(|| format!("Failed to open database at {db_path}"))?;
    let tracker = RecentlyViewed::load(storage.local, config);
    info!(db_path, items = tracker.len(), "Loaded recently viewed products");
    Ok(tracker)
}
