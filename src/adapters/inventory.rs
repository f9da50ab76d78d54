use crate::core::{Inventory, InventorySource, Property, Result};
use async_trait::async_trait;
use std::path::PathBuf;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// The sample catalog compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct BuiltinInventory;

#[async_trait]
impl InventorySource for BuiltinInventory {
    async fn load(&self) -> Result<Inventory> {
        parse_catalog(BUILTIN_CATALOG)
    }

    fn describe(&self) -> String {
        "built-in catalog".to_string()
    }
}

/// A JSON array of properties on disk.
#[derive(Debug, Clone)]
pub struct JsonFileInventory {
    path: PathBuf,
}

impl JsonFileInventory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl InventorySource for JsonFileInventory {
    async fn load(&self) -> Result<Inventory> {
        tracing::debug!("Reading catalog file {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        parse_catalog(&content)
    }

    fn describe(&self) -> String {
        format!("catalog file {}", self.path.display())
    }
}

pub fn parse_catalog(json: &str) -> Result<Inventory> {
    let properties: Vec<Property> = serde_json::from_str(json)?;
    Inventory::new(properties)
}

/// Picks the file source when a path is configured, otherwise the built-in catalog.
pub fn source_for(catalog_path: Option<&str>) -> Box<dyn InventorySource> {
    match catalog_path {
        Some(path) => Box::new(JsonFileInventory::new(path)),
        None => Box::new(BuiltinInventory),
    }
}
