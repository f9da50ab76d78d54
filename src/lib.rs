pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::session::SearchSession;
pub use config::DiscoveryConfig;
pub use core::{engine::DiscoveryEngine, map_view::MapView};
pub use utils::error::{DiscoveryError, Result};
