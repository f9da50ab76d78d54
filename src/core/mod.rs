pub mod engine;
pub mod map_view;
pub mod matcher;
pub mod query_codec;
pub mod sorter;

pub use crate::domain::filter::{FilterPatch, FilterState, ListingType, PropertyTypeFilter, SortOrder};
pub use crate::domain::inventory::Inventory;
pub use crate::domain::model::{Property, PropertyType};
pub use crate::domain::ports::{ConfigProvider, InventorySource, Notifier};
pub use crate::utils::error::Result;
