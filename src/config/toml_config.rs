use crate::core::map_view::{BaseLayer, DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::core::ConfigProvider;
use crate::domain::model::Coordinates;
use crate::utils::error::{DiscoveryError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_FEATURED_LIMIT: usize = 6;
const MAX_ZOOM: u8 = 19;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog on disk; the built-in catalog is used when absent.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub page_size: Option<usize>,
    pub featured_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapConfig {
    pub center_lat: Option<f64>,
    pub center_lng: Option<f64>,
    pub zoom: Option<u8>,
    pub default_layer: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl DiscoveryConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR_NAME}` with the environment value. Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DiscoveryError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = &self.catalog.path {
            validation::validate_path("catalog.path", path)?;
        }

        if let Some(page_size) = self.search.page_size {
            validation::validate_positive_number("search.page_size", page_size, 1)?;
        }

        if let Some(lat) = self.map.center_lat {
            validation::validate_range("map.center_lat", lat, -90.0, 90.0)?;
        }
        if let Some(lng) = self.map.center_lng {
            validation::validate_range("map.center_lng", lng, -180.0, 180.0)?;
        }
        if let Some(zoom) = self.map.zoom {
            validation::validate_range("map.zoom", zoom, 0, MAX_ZOOM)?;
        }
        if let Some(layer) = &self.map.default_layer {
            layer
                .parse::<BaseLayer>()
                .map_err(|reason| DiscoveryError::InvalidConfigValueError {
                    field: "map.default_layer".to_string(),
                    value: layer.clone(),
                    reason,
                })?;
        }

        if let Some(level) = &self.logging.level {
            validation::validate_non_empty_string("logging.level", level)?;
        }
        if let Some(format) = &self.logging.format {
            validation::validate_one_of("logging.format", format, &["compact", "json"])?;
        }

        Ok(())
    }

    pub fn page_size(&self) -> usize {
        self.search.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn featured_limit(&self) -> usize {
        self.search.featured_limit.unwrap_or(DEFAULT_FEATURED_LIMIT)
    }

    pub fn map_center(&self) -> Coordinates {
        Coordinates::new(
            self.map.center_lat.unwrap_or(DEFAULT_CENTER.latitude),
            self.map.center_lng.unwrap_or(DEFAULT_CENTER.longitude),
        )
    }

    pub fn map_zoom(&self) -> u8 {
        self.map.zoom.unwrap_or(DEFAULT_ZOOM)
    }

    /// Falls back to the standard layer; [`DiscoveryConfig::validate_config`]
    /// rejects unknown names before this is reached.
    pub fn map_layer(&self) -> BaseLayer {
        self.map
            .default_layer
            .as_deref()
            .and_then(|layer| layer.parse().ok())
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format.as_deref() == Some("json")
    }
}

impl ConfigProvider for DiscoveryConfig {
    fn catalog_path(&self) -> Option<&str> {
        self.catalog.path.as_deref()
    }

    fn page_size(&self) -> usize {
        self.page_size()
    }

    fn featured_limit(&self) -> usize {
        self.featured_limit()
    }
}

impl Validate for DiscoveryConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
