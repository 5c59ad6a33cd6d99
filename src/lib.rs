pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpFetcher, LocalStorage};
pub use config::toml_config::TomlConfig;
pub use crate::core::{etl::HarvestEngine, harvester::Harvester, pipeline::HarvestPipeline};
pub use domain::model::Record;
pub use utils::error::{HarvestError, Result};
