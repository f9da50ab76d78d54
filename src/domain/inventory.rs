use crate::domain::model::Property;
use crate::utils::error::{DiscoveryError, Result};
use std::collections::HashSet;
use std::sync::Arc;

/// The validated, immutable property catalog. Cloning shares the same storage.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    properties: Arc<[Property]>,
}

impl Inventory {
    /// Rejects duplicate ids and out-of-range coordinates.
    pub fn new(properties: Vec<Property>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(properties.len());
        for property in &properties {
            if !seen.insert(property.id.as_str()) {
                return Err(DiscoveryError::CatalogError {
                    message: format!("duplicate property id '{}'", property.id),
                });
            }
            if let Some(coordinates) = property.coordinates {
                if !coordinates.is_valid() {
                    return Err(DiscoveryError::CatalogError {
                        message: format!(
                            "property '{}' has coordinates out of range: [{}, {}]",
                            property.id, coordinates.latitude, coordinates.longitude
                        ),
                    });
                }
            }
        }

        Ok(Self {
            properties: properties.into(),
        })
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Property> {
        self.properties.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }
}
