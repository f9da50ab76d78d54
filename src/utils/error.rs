use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("No listing with id '{id}'")]
    ListingNotFound { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DiscoveryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DiscoveryError::IoError(_) => ErrorCategory::Io,
            DiscoveryError::SerializationError(_) | DiscoveryError::CsvError(_) => {
                ErrorCategory::Data
            }
            DiscoveryError::TomlError(_)
            | DiscoveryError::ConfigError { .. }
            | DiscoveryError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DiscoveryError::CatalogError { .. } | DiscoveryError::ListingNotFound { .. } => {
                ErrorCategory::Catalog
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Catalog => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DiscoveryError::IoError(e) => format!("Could not read or write a file: {}", e),
            DiscoveryError::SerializationError(e) => {
                format!("The catalog is not valid JSON: {}", e)
            }
            DiscoveryError::TomlError(e) => format!("The config file is not valid TOML: {}", e),
            DiscoveryError::CsvError(e) => format!("Could not write CSV output: {}", e),
            DiscoveryError::ConfigError { message } => message.clone(),
            DiscoveryError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Setting '{}' has an invalid value '{}': {}", field, value, reason),
            DiscoveryError::CatalogError { message } => {
                format!("The property catalog could not be loaded: {}", message)
            }
            DiscoveryError::ListingNotFound { id } => {
                format!("There is no listing with id '{}' in the catalog", id)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        if let DiscoveryError::ListingNotFound { .. } = self {
            return "Run a search to see the ids available in the catalog";
        }
        match self.category() {
            ErrorCategory::Io => "Check that the file exists and is readable",
            ErrorCategory::Data => "Check the catalog file against the documented JSON layout",
            ErrorCategory::Configuration => "Fix the config file or the command-line flags",
            ErrorCategory::Catalog => {
                "Make property ids unique and keep coordinates within valid ranges"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
