use crate::config::toml_config::DiscoveryConfig;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "property-discovery")]
#[command(about = "Search, sort and map a static catalog of property listings")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// JSON catalog to search instead of the built-in listings
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Results per page (overrides the config file)
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,

    /// Settings loaded from `--config`; flags above take precedence.
    #[arg(skip)]
    pub file: DiscoveryConfig,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Filter and sort listings from a shareable query string
    Search {
        /// Query string, e.g. "type=rent&priceRange=1000-6000"
        #[arg(short, long, default_value = "")]
        query: String,

        /// 1-based result page
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Project geocoded listings onto map markers
    Map {
        #[arg(long, default_value = "all")]
        property_type: String,

        /// Minimum price as typed, e.g. "$250,000"
        #[arg(long, default_value = "")]
        min_price: String,

        #[arg(long, default_value = "")]
        max_price: String,

        /// City or state substring
        #[arg(long, default_value = "")]
        location: String,

        /// standard or satellite; defaults to the configured layer
        #[arg(long)]
        layer: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show a single listing
    Show {
        id: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Landing-page picks filtered by listing type
    Featured {
        /// all, sale or rent
        #[arg(short, long, default_value = "all")]
        tab: String,

        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl CliConfig {
    /// Reads `--config` into [`CliConfig::file`] when one was given.
    ///
    /// Runs before logging is configured, so it does not log itself.
    pub fn load_file(&mut self) -> Result<()> {
        if let Some(path) = &self.config {
            self.file = DiscoveryConfig::from_file(path)?;
        }
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn catalog_path(&self) -> Option<&str> {
        self.catalog.as_deref().or(self.file.catalog_path())
    }

    fn page_size(&self) -> usize {
        self.page_size.unwrap_or_else(|| self.file.page_size())
    }

    fn featured_limit(&self) -> usize {
        self.file.featured_limit()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.file.validate()?;
        if let Some(path) = &self.catalog {
            validation::validate_path("--catalog", path)?;
        }
        if let Some(page_size) = self.page_size {
            validation::validate_positive_number("--page-size", page_size, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::DEFAULT_PAGE_SIZE;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_file_settings() {
        let mut cli = CliConfig::parse_from([
            "property-discovery",
            "--catalog",
            "listings.json",
            "search",
            "--query",
            "type=rent",
        ]);
        cli.file = DiscoveryConfig::from_toml_str(
            "[catalog]\npath = \"other.json\"\n[search]\npage_size = 4\nfeatured_limit = 2",
        )
        .unwrap();

        assert_eq!(cli.catalog_path(), Some("listings.json"));
        assert_eq!(cli.page_size(), 4);
        assert_eq!(cli.featured_limit(), 2);
        assert!(cli.validate().is_ok());
        assert!(matches!(
            cli.command,
            Command::Search { ref query, page: 1, .. } if query == "type=rent"
        ));
    }

    #[test]
    fn test_load_file_reads_config_path() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[search]\npage_size = 2\n[logging]\nformat = \"json\"\n")
            .unwrap();
        let path = temp_file.path().to_string_lossy().to_string();

        let mut cli = CliConfig::parse_from(["property-discovery", "--config", &path, "show", "1"]);
        assert_eq!(cli.page_size(), DEFAULT_PAGE_SIZE);
        cli.load_file().unwrap();
        assert_eq!(cli.page_size(), 2);
        assert!(cli.file.json_logs());

        let mut missing =
            CliConfig::parse_from(["property-discovery", "--config", "/nonexistent.toml", "show", "1"]);
        assert!(missing.load_file().is_err());
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let cli = CliConfig::parse_from(["property-discovery", "--page-size", "0", "show", "1"]);
        assert!(cli.validate().is_err());
    }
}
