//! JSON snapshot of the recently-viewed list under a single storage key.

use crate::models::ViewedItem;
use anyhow::Result;
use zammer_storage::KeyValueStore;

/// Why a stored snapshot could not be read.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot from storage: {0}")]
    Storage(anyhow::Error),

    #[error("malformed snapshot payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Read the list stored under `key`. A missing key is an empty list.
pub fn read_snapshot<S>(store: &S, key: &str) -> Result<Vec<ViewedItem>, SnapshotError>
where
    S: KeyValueStore + ?Sized,
{
    let Some(bytes) = store.get_raw(key).map_err(SnapshotError::Storage)? else {
        return Ok(Vec::new());
    };

    Ok(serde_json::from_slice(&bytes)?)
}

/// Replace the list stored under `key`.
pub fn write_snapshot<S>(store: &S, key: &str, items: &[ViewedItem]) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    let json_bytes = serde_json::to_vec(items)?;
    store.put_raw(key, &json_bytes)
}
