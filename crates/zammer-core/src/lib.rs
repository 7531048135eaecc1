//! Zammer Core - typed recently-viewed tracking over device-local storage.
//!
//! [`RecentlyViewed`] keeps a capped, deduplicated, most-recent-first list of
//! catalog items a shopper has looked at, expires entries past a retention
//! window, and writes every change through to a [`KeyValueStore`].

pub mod config;
pub mod models;
pub mod recently_viewed;
pub mod snapshot;

pub use config::{ConfigError, TrackerConfig};
pub use models::{CatalogItem, ViewedItem};
pub use recently_viewed::RecentlyViewed;
pub use snapshot::SnapshotError;

// Re-export the storage layer so callers only need one dependency
pub use zammer_storage::{KeyValueStore, LocalStorage, Storage, paths, time_utils};
