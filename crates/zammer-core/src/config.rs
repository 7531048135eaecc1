//! Tracker configuration.

use serde::{Deserialize, Serialize};

// Default configuration constants
pub const DEFAULT_CAPACITY: usize = 12;
pub const DEFAULT_RETENTION_DAYS: u32 = 30;
pub const DEFAULT_STORAGE_KEY: &str = "zammer_recently_viewed";

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const MIN_CAPACITY: usize = 1;
const MIN_RETENTION_DAYS: u32 = 1;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("capacity must be at least {}", MIN_CAPACITY)]
    Capacity,

    #[error("retention must be at least {} day", MIN_RETENTION_DAYS)]
    Retention,

    #[error("storage key must not be empty")]
    StorageKey,
}

/// Recently-viewed tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Maximum number of items kept, most recent first.
    pub capacity: usize,
    /// Items viewed longer ago than this are dropped on load.
    pub retention_days: u32,
    /// Local storage key holding the JSON snapshot.
    pub storage_key: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            retention_days: DEFAULT_RETENTION_DAYS,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl TrackerConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity < MIN_CAPACITY {
            return Err(ConfigError::Capacity);
        }

        if self.retention_days < MIN_RETENTION_DAYS {
            return Err(ConfigError::Retention);
        }

        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::StorageKey);
        }

        Ok(())
    }

    /// Retention window in milliseconds.
    pub fn retention_ms(&self) -> i64 {
        i64::from(self.retention_days) * MS_PER_DAY
    }
}
