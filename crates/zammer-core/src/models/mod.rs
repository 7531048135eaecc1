pub mod catalog_item;
pub mod viewed_item;

pub use catalog_item::CatalogItem;
pub use viewed_item::{MAX_SNAPSHOT_IMAGES, ViewedItem};
