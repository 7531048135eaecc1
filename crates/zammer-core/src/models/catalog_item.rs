//! Catalog item as handed over by the storefront when a product is viewed.

use serde::{Deserialize, Serialize};

/// A product as supplied by calling code.
///
/// Only the identifier is required for an item to be tracked; everything
/// else is optional and copied into the snapshot when present. Unknown
/// fields are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub zammer_price: Option<f64>,
    #[serde(default)]
    pub mrp: Option<f64>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub num_reviews: Option<u32>,
    #[serde(default)]
    pub is_limited_edition: Option<bool>,
    #[serde(default)]
    pub is_trending: Option<bool>,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// The identifier, or `None` when it is missing or blank.
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }
}
