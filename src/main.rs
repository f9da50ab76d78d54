use clap::Parser;
use property_discovery::adapters::inventory::source_for;
use property_discovery::app::render::{self, write_csv, write_json};
use property_discovery::app::session::TracingNotifier;
use property_discovery::config::{Command, OutputFormat};
use property_discovery::core::map_view::MapFilter;
use property_discovery::core::{ConfigProvider, Inventory, ListingType, PropertyTypeFilter};
use property_discovery::utils::error::{DiscoveryError, ErrorSeverity};
use property_discovery::utils::{logger, validation::Validate};
use property_discovery::{CliConfig, DiscoveryEngine, MapView, Result, SearchSession};
use std::io::Write;
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();
    let loaded = config.load_file();

    if config.file.json_logs() {
        logger::init_json_logger(config.file.log_level());
    } else {
        logger::init_cli_logger(config.verbose, config.file.log_level());
    }

    tracing::info!("Starting property-discovery CLI");
    if let Some(path) = &config.config {
        tracing::info!("Loading configuration from {}", path);
    }
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = loaded.and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let source = source_for(config.catalog_path());
    tracing::info!("Loading listings from {}", source.describe());

    let outcome = match source.load().await {
        Ok(inventory) => {
            tracing::info!("Loaded {} listings", inventory.len());
            execute(&config, inventory)
        }
        Err(e) => Err(e),
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn execute(config: &CliConfig, inventory: Inventory) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &config.command {
        Command::Search {
            query,
            page,
            format,
        } => {
            let engine = DiscoveryEngine::new(inventory);
            let mut session = SearchSession::from_query(
                engine,
                query,
                config.page_size(),
                Arc::new(TracingNotifier),
            );
            session.set_page(*page);
            let link = session.apply().to_string();
            let current = session.current_page();

            match format {
                OutputFormat::Table => {
                    render::write_page_table(&mut out, &current)?;
                    if !link.is_empty() {
                        writeln!(out, "Share: ?{}", link)?;
                    }
                }
                OutputFormat::Json => write_json(&mut out, &current)?,
                OutputFormat::Csv => write_csv(&mut out, &current.items)?,
            }
        }
        Command::Map {
            property_type,
            min_price,
            max_price,
            location,
            layer,
            format,
        } => {
            let mut filter = MapFilter::default();
            filter.set_property_type(parse_flag::<PropertyTypeFilter>(
                "--property-type",
                property_type,
            )?);
            filter.set_min_price_text(min_price);
            filter.set_max_price_text(max_price);
            filter.set_location(location.as_str());

            let layer = match layer {
                Some(name) => parse_flag("--layer", name)?,
                None => config.file.map_layer(),
            };

            let mut view = MapView::with_viewport(
                inventory,
                config.file.map_center(),
                config.file.map_zoom(),
                layer,
            );
            view.apply_filter(filter);

            match format {
                OutputFormat::Table => render::write_map_table(&mut out, &view)?,
                OutputFormat::Json => write_json(&mut out, view.markers())?,
                OutputFormat::Csv => render::write_marker_csv(&mut out, view.markers())?,
            }
        }
        Command::Show { id, format } => {
            let engine = DiscoveryEngine::new(inventory);
            let property = engine
                .find(id)
                .ok_or_else(|| DiscoveryError::ListingNotFound { id: id.clone() })?;

            match format {
                OutputFormat::Table => render::write_detail(&mut out, property)?,
                OutputFormat::Json => write_json(&mut out, property)?,
                OutputFormat::Csv => write_csv(&mut out, &[property])?,
            }
        }
        Command::Featured { tab, limit } => {
            let listing_type = parse_flag::<ListingType>("--tab", tab)?;
            let limit = limit.unwrap_or_else(|| config.featured_limit());
            let engine = DiscoveryEngine::new(inventory);

            let picks = engine.featured(listing_type, limit);
            writeln!(out, "Featured ({} of {})", picks.len(), limit)?;
            for property in picks {
                writeln!(out, "  {}", render::property_line(property))?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn parse_flag<T>(field: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|reason| DiscoveryError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason,
        })
}
