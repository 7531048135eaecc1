//! Recently-viewed tracker.
//!
//! Holds the active list in memory and writes every change through to a
//! [`KeyValueStore`] under one namespaced key. The store is read once when
//! the tracker is constructed (and again on [`RecentlyViewed::reload`]).
//!
//! Several trackers sharing one store do not coordinate: each write replaces
//! the whole list, so the last writer wins.

use crate::config::TrackerConfig;
use crate::models::{CatalogItem, ViewedItem};
use crate::snapshot::{SnapshotError, read_snapshot, write_snapshot};
use std::collections::HashSet;
use tracing::{debug, warn};
use zammer_storage::KeyValueStore;
use zammer_storage::time_utils::now_ms;

pub struct RecentlyViewed<S: KeyValueStore> {
    store: S,
    config: TrackerConfig,
    items: Vec<ViewedItem>,
    persisted: bool,
}

impl<S: KeyValueStore> RecentlyViewed<S> {
    /// Load the tracker from `store` using the wall clock for expiry.
    pub fn load(store: S, config: TrackerConfig) -> Self {
        Self::load_at(store, config, now_ms())
    }

    /// Load the tracker, expiring entries relative to `now` (epoch ms).
    ///
    /// Never fails: unreadable or malformed state is deleted and the
    /// tracker starts empty.
    pub fn load_at(store: S, config: TrackerConfig, now: i64) -> Self {
        let mut tracker = Self {
            store,
            config,
            items: Vec::new(),
            persisted: true,
        };
        tracker.reload_at(now);
        tracker
    }

    /// Re-read the store, picking up writes from other trackers.
    pub fn reload(&mut self) {
        self.reload_at(now_ms());
    }

    pub fn reload_at(&mut self, now: i64) {
        let key = self.config.storage_key.as_str();

        let items = match read_snapshot(&self.store, key) {
            Ok(items) => items,
            Err(err) => {
                match &err {
                    SnapshotError::Storage(_) => {
                        warn!(key, error = %err, "Discarding unreadable recently-viewed state")
                    }
                    SnapshotError::Malformed(_) => {
                        warn!(key, error = %err, "Discarding malformed recently-viewed state")
                    }
                }
                if let Err(err) = self.store.delete(key) {
                    warn!(key, error = %err, "Failed to delete corrupt recently-viewed state");
                }
                Vec::new()
            }
        };

        let retention_ms = self.config.retention_ms();
        let total = items.len();
        let mut seen = HashSet::new();
        let active: Vec<ViewedItem> = items
            .into_iter()
            .filter(|item| !item.is_expired(now, retention_ms))
            // Stored order is most recent first, so the first copy of an id wins
            .filter(|item| seen.insert(item.id.clone()))
            .take(self.config.capacity)
            .collect();

        debug!(
            key,
            loaded = active.len(),
            dropped = total - active.len(),
            "Loaded recently-viewed items"
        );
        self.items = active;
    }

    /// Record a view of `item` at the current time.
    ///
    /// Returns `false` (and changes nothing) when the item has no identifier.
    pub fn record(&mut self, item: &CatalogItem) -> bool {
        self.record_at(item, now_ms())
    }

    pub fn record_at(&mut self, item: &CatalogItem, now: i64) -> bool {
        let Some(viewed) = ViewedItem::capture(item, now) else {
            debug!("Ignoring view of item without identifier");
            return false;
        };

        let id = viewed.id.clone();
        let next: Vec<ViewedItem> = std::iter::once(viewed)
            .chain(
                self.items
                    .iter()
                    .filter(|existing| existing.id != id)
                    .cloned(),
            )
            .take(self.config.capacity)
            .collect();

        debug!(id = %id, count = next.len(), "Recorded view");
        self.items = next;
        self.persist();
        true
    }

    /// Remove a single item. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return false;
        }

        debug!(id, "Removed viewed item");
        self.persist();
        true
    }

    /// Delete the stored list and empty the in-memory view.
    pub fn clear(&mut self) {
        self.items.clear();

        let key = self.config.storage_key.as_str();
        match self.store.delete(key) {
            Ok(_) => {
                debug!(key, "Cleared recently-viewed items");
                self.persisted = true;
            }
            Err(err) => {
                warn!(key, error = %err, "Failed to clear stored items, keeping memory-only state");
                self.persisted = false;
            }
        }
    }

    /// Most recent first.
    pub fn items(&self) -> &[ViewedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// `false` after a write failed; the in-memory view is then ahead of
    /// the store until the next successful write.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        let key = self.config.storage_key.as_str();
        match write_snapshot(&self.store, key, &self.items) {
            Ok(()) => self.persisted = true,
            Err(err) => {
                warn!(key, error = %err, "Failed to persist items, keeping memory-only state");
                self.persisted = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use tempfile::tempdir;
    use zammer_storage::{LocalStorage, Storage};

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;
    const NOW: i64 = 1_760_000_000_000;
    const KEY: &str = "zammer_recently_viewed";

    fn setup_test_storage() -> (LocalStorage, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let storage = Storage::new(db_path.to_str().unwrap()).unwrap();
        (storage.local, temp_dir)
    }

    fn load(store: LocalStorage) -> RecentlyViewed<LocalStorage> {
        RecentlyViewed::load_at(store, TrackerConfig::default(), NOW)
    }

    fn ids<S: KeyValueStore>(tracker: &RecentlyViewed<S>) -> Vec<&str> {
        tracker.items().iter().map(|item| item.id.as_str()).collect()
    }

    fn stored_ids(store: &LocalStorage) -> Vec<String> {
        read_snapshot(store, KEY)
            .unwrap()
            .into_iter()
            .map(|item| item.id)
            .collect()
    }

    /// In-memory store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        data: RefCell<HashMap<String, Vec<u8>>>,
        fail_reads: Cell<bool>,
        fail_writes: Cell<bool>,
    }

    impl KeyValueStore for FlakyStore {
        fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
            if self.fail_reads.get() {
                bail!("read failed");
            }
            Ok(self.data.borrow().get(key).cloned())
        }

        fn put_raw(&self, key: &str, data: &[u8]) -> Result<()> {
            if self.fail_writes.get() {
                bail!("disk full");
            }
            self.data.borrow_mut().insert(key.to_string(), data.to_vec());
            Ok(())
        }

        fn delete(&self, key: &str) -> Result<bool> {
            if self.fail_writes.get() {
                bail!("disk full");
            }
            Ok(self.data.borrow_mut().remove(key).is_some())
        }
    }

    #[test]
    fn test_starts_empty() {
        let (store, _temp_dir) = setup_test_storage();
        let tracker = load(store);
        assert!(tracker.is_empty());
        assert!(tracker.is_persisted());
    }

    #[test]
    fn test_repeat_view_moves_to_front() {
        let (store, _temp_dir) = setup_test_storage();
        let mut tracker = load(store);

        tracker.record_at(&CatalogItem::new("A"), NOW);
        tracker.record_at(&CatalogItem::new("B"), NOW + 1);
        tracker.record_at(&CatalogItem::new("A"), NOW + 2);

        assert_eq!(ids(&tracker), vec!["A", "B"]);
        assert_eq!(tracker.items()[0].viewed_at, NOW + 2);
        assert_eq!(stored_ids(tracker.store()), vec!["A", "B"]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let (store, _temp_dir) = setup_test_storage();
        let mut tracker = load(store);

        for i in 0..13 {
            tracker.record_at(&CatalogItem::new(format!("item-{i}")), NOW + i);
            assert!(tracker.len() <= 12);
        }

        assert_eq!(tracker.len(), 12);
        assert_eq!(tracker.items()[0].id, "item-12");
        assert_eq!(tracker.items()[11].id, "item-1");
        assert!(!tracker.contains("item-0"));
        assert_eq!(stored_ids(tracker.store()).len(), 12);
    }

    #[test]
    fn test_no_duplicates_under_mixed_views() {
        let (store, _temp_dir) = setup_test_storage();
        let mut tracker = load(store);

        for (i, id) in ["a", "b", "c", "a", "d", "b", "b", "e", "a"].iter().enumerate() {
            tracker.record_at(&CatalogItem::new(*id), NOW + i as i64);
        }

        assert_eq!(ids(&tracker), vec!["a", "e", "b", "d", "c"]);
    }

    #[test]
    fn test_missing_identifier_is_ignored() {
        let (store, _temp_dir) = setup_test_storage();
        let mut tracker = load(store);

        assert!(!tracker.record_at(&CatalogItem::default(), NOW));
        assert!(!tracker.record_at(&CatalogItem::new(""), NOW));
        assert!(tracker.is_empty());
        assert!(tracker.store().get_raw(KEY).unwrap().is_none());

        tracker.record_at(&CatalogItem::new("A"), NOW);
        assert!(!tracker.record_at(&CatalogItem::default(), NOW + 1));
        assert_eq!(ids(&tracker), vec!["A"]);
    }

    #[test]
    fn test_load_drops_expired_items() {
        let (store, _temp_dir) = setup_test_storage();
        let items: Vec<ViewedItem> = [
            ("fresh", NOW - DAY_MS),
            ("edge", NOW - 30 * DAY_MS),
            ("stale", NOW - 31 * DAY_MS),
        ]
        .iter()
        .filter_map(|(id, at)| ViewedItem::capture(&CatalogItem::new(*id), *at))
        .collect();
        write_snapshot(&store, KEY, &items).unwrap();

        let tracker = load(store);
        assert_eq!(ids(&tracker), vec!["fresh", "edge"]);
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let (store, _temp_dir) = setup_test_storage();
        store
            .put_raw(
                KEY,
                format!(
                    r#"[{{"_id":"A","name":"new","viewedAt":{}}},{{"_id":"A","name":"old","viewedAt":{}}}]"#,
                    NOW - 1,
                    NOW - 2
                )
                .as_bytes(),
            )
            .unwrap();

        let mut tracker = load(store);
        assert_eq!(ids(&tracker), vec!["A"]);
        assert_eq!(tracker.items()[0].name.as_deref(), Some("new"));

        tracker.record_at(&CatalogItem::new("B"), NOW);
        assert_eq!(ids(&tracker), vec!["B", "A"]);
        assert_eq!(stored_ids(tracker.store()), vec!["B", "A"]);
    }

    #[test]
    fn test_load_truncates_to_capacity() {
        let (store, _temp_dir) = setup_test_storage();
        let items: Vec<ViewedItem> = (0..5)
            .filter_map(|i| ViewedItem::capture(&CatalogItem::new(format!("p{i}")), NOW))
            .collect();
        write_snapshot(&store, KEY, &items).unwrap();

        let config = TrackerConfig {
            capacity: 3,
            ..Default::default()
        };
        let tracker = RecentlyViewed::load_at(store, config, NOW);
        assert_eq!(ids(&tracker), vec!["p0", "p1", "p2"]);
    }

    #[test]
    fn test_malformed_state_is_deleted() {
        let (store, _temp_dir) = setup_test_storage();
        store.put_raw(KEY, b"not-json").unwrap();

        let tracker = load(store);
        assert!(tracker.is_empty());
        assert!(tracker.store().get_raw(KEY).unwrap().is_none());
    }

    #[test]
    fn test_null_images_keep_history() {
        let (store, _temp_dir) = setup_test_storage();
        store
            .put_raw(
                KEY,
                format!(
                    r#"[{{"_id":"A","viewedAt":{now}}},{{"_id":"B","images":null,"viewedAt":{now}}}]"#,
                    now = NOW
                )
                .as_bytes(),
            )
            .unwrap();

        let tracker = load(store);
        assert_eq!(ids(&tracker), vec!["A", "B"]);
        assert!(tracker.items()[1].images.is_empty());
        assert!(tracker.store().get_raw(KEY).unwrap().is_some());
    }

    #[test]
    fn test_unreadable_state_is_treated_as_empty() {
        let store = FlakyStore::default();
        store.put_raw(KEY, b"[]").unwrap();
        store.fail_reads.set(true);

        let tracker = RecentlyViewed::load_at(store, TrackerConfig::default(), NOW);
        assert!(tracker.is_empty());
        assert!(tracker.store().data.borrow().get(KEY).is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (store, _temp_dir) = setup_test_storage();
        let mut tracker = load(store);
        tracker.record_at(&CatalogItem::new("A"), NOW);

        tracker.clear();
        assert!(tracker.is_empty());
        assert!(tracker.store().get_raw(KEY).unwrap().is_none());

        tracker.clear();
        assert!(tracker.is_empty());
        assert!(tracker.is_persisted());
    }

    #[test]
    fn test_remove() {
        let (store, _temp_dir) = setup_test_storage();
        let mut tracker = load(store);
        tracker.record_at(&CatalogItem::new("A"), NOW);
        tracker.record_at(&CatalogItem::new("B"), NOW + 1);

        assert!(tracker.remove("A"));
        assert!(!tracker.remove("missing"));
        assert_eq!(ids(&tracker), vec!["B"]);
        assert_eq!(stored_ids(tracker.store()), vec!["B"]);
    }

    #[test]
    fn test_state_survives_reload() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_path = db_path.to_str().unwrap();

        {
            let storage = Storage::new(db_path).unwrap();
            let mut tracker = load(storage.local);
            tracker.record_at(&CatalogItem::new("A"), NOW);
            tracker.record_at(&CatalogItem::new("B"), NOW + 1);
        }

        let storage = Storage::new(db_path).unwrap();
        let tracker =
            RecentlyViewed::load_at(storage.local, TrackerConfig::default(), NOW + DAY_MS);
        assert_eq!(ids(&tracker), vec!["B", "A"]);
    }

    #[test]
    fn test_last_writer_wins_across_trackers() {
        let (store, _temp_dir) = setup_test_storage();
        let mut first = load(store.clone());
        let mut second = load(store.clone());

        first.record_at(&CatalogItem::new("A"), NOW);
        second.record_at(&CatalogItem::new("B"), NOW + 1);
        assert_eq!(stored_ids(&store), vec!["B"]);

        first.reload_at(NOW + 2);
        assert_eq!(ids(&first), vec!["B"]);
    }

    #[test]
    fn test_write_failure_degrades_to_memory() {
        let store = FlakyStore::default();
        let mut tracker = RecentlyViewed::load_at(store, TrackerConfig::default(), NOW);

        tracker.store().fail_writes.set(true);
        assert!(tracker.record_at(&CatalogItem::new("A"), NOW));
        assert_eq!(ids(&tracker), vec!["A"]);
        assert!(!tracker.is_persisted());

        tracker.store().fail_writes.set(false);
        tracker.record_at(&CatalogItem::new("B"), NOW + 1);
        assert!(tracker.is_persisted());
        assert_eq!(ids(&tracker), vec!["B", "A"]);
        assert!(tracker.store().data.borrow().contains_key(KEY));
    }

    #[test]
    fn test_clear_failure_still_empties_memory() {
        let store = FlakyStore::default();
        let mut tracker = RecentlyViewed::load_at(store, TrackerConfig::default(), NOW);
        tracker.record_at(&CatalogItem::new("A"), NOW);

        tracker.store().fail_writes.set(true);
        tracker.clear();
        assert!(tracker.is_empty());
        assert!(!tracker.is_persisted());
    }
}
