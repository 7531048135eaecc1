//! Snapshot of a catalog item taken at view time.

use super::CatalogItem;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Number of image references kept per snapshot.
pub const MAX_SNAPSHOT_IMAGES: usize = 2;

/// A viewed catalog item as persisted in local storage.
///
/// `viewed_at` is epoch milliseconds. Entries persisted without it default
/// to `0` and therefore fall outside any retention window on the next load.
/// Only `_id` is strict: any other field that is `null` or of the wrong type
/// falls back to its default instead of failing the whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewedItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub images: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub zammer_price: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub mrp: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub brand: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub average_rating: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_reviews: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_limited_edition: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub is_trending: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub viewed_at: i64,
}

/// Deserialize `T`, or `T::default()` when the value does not fit.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl ViewedItem {
    /// Snapshot `item` at `now`. Returns `None` if the item has no identifier.
    pub fn capture(item: &CatalogItem, now: i64) -> Option<Self> {
        let id = item.identifier()?;

        Some(Self {
            id: id.to_string(),
            name: item.name.clone(),
            images: item
                .images
                .iter()
                .take(MAX_SNAPSHOT_IMAGES)
                .cloned()
                .collect(),
            zammer_price: item.zammer_price,
            mrp: item.mrp,
            brand: item.brand.clone(),
            average_rating: item.average_rating,
            num_reviews: item.num_reviews,
            is_limited_edition: item.is_limited_edition.unwrap_or(false),
            is_trending: item.is_trending.unwrap_or(false),
            viewed_at: now,
        })
    }

    /// Age in milliseconds relative to `now`. Negative for future timestamps.
    pub fn age_ms(&self, now: i64) -> i64 {
        now.saturating_sub(self.viewed_at)
    }

    /// Whether the item is older than the retention window.
    pub fn is_expired(&self, now: i64, retention_ms: i64) -> bool {
        self.age_ms(now) > retention_ms
    }
}
