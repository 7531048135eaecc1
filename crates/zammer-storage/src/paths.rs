//! Path utilities for Zammer directory resolution.
//!
//! Re-exported by zammer-core for convenience.

use anyhow::Result;
use std::path::PathBuf;

const ZAMMER_DIR: &str = ".zammer";
const DB_FILE: &str = "zammer.db";
const LOGS_DIR: &str = "logs";

/// Environment variable to override the Zammer directory.
const ZAMMER_DIR_ENV: &str = "ZAMMER_DIR";

/// Resolve the Zammer data directory.
/// Priority: ZAMMER_DIR env var > ~/.zammer/
pub fn resolve_zammer_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ZAMMER_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|h| h.join(ZAMMER_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}

/// Ensure the Zammer directory exists and return its path.
pub fn ensure_zammer_dir() -> Result<PathBuf> {
    let dir = resolve_zammer_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Ensure the data directory exists and return the database path as a string.
pub fn ensure_database_path_string() -> Result<String> {
    Ok(ensure_zammer_dir()?
        .join(DB_FILE)
        .to_string_lossy()
        .into_owned())
}

/// Get the logs directory: ~/.zammer/logs/
pub fn logs_dir() -> Result<PathBuf> {
    let dir = resolve_zammer_dir()?.join(LOGS_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
