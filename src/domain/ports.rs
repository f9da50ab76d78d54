use crate::domain::inventory::Inventory;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the static catalog comes from.
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn load(&self) -> Result<Inventory>;

    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Receives short summaries such as "4 properties found".
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_path(&self) -> Option<&str>;
    fn page_size(&self) -> usize;
    fn featured_limit(&self) -> usize;
}
