//! Zammer Storage - low-level persistence for device-local state
//!
//! This crate provides the byte-level key-value layer, using redb as the
//! embedded database. Typed wrappers (the recently-viewed tracker and its
//! JSON snapshot) live in zammer-core.
//!
//! # Tables
//!
//! - `local_storage` - namespaced string keys to opaque payloads

pub mod local_storage;
pub mod paths;
pub mod simple_storage;
pub mod time_utils;

use anyhow::Result;
use redb::Database;
use std::sync::Arc;
use tracing::debug;

pub use local_storage::LocalStorage;
pub use simple_storage::{KeyValueStore, SimpleStorage};

/// Central storage manager that opens the database and its tables.
pub struct Storage {
    pub local: LocalStorage,
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// This will create the database file if it doesn't exist and initialize
    /// all required tables.
    pub fn new(path: &str) -> Result<Self> {
        debug!(path, "Opening storage");
        let db = Arc::new(Database::create(path)?);
        let local = LocalStorage::new(db)?;

        Ok(Self { local })
    }
}
