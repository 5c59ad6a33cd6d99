use crate::config::defaults::{self, *};
use crate::core::ConfigProvider;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "diamond-harvest")]
#[command(about = "Harvest loose-diamond listings into a CSV file")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value_t = DEFAULT_FIRST_PAGE)]
    pub first_page: u32,

    #[arg(long, default_value_t = DEFAULT_LAST_PAGE)]
    pub last_page: u32,

    #[arg(long, default_value = DEFAULT_PAGE_PARAMETER)]
    pub page_parameter: String,

    #[arg(long, default_value = DEFAULT_PAYLOAD_KEY)]
    pub payload_key: String,

    /// Override or add a search filter, e.g. --param currency=USD
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query_parameters(&self) -> Vec<(String, String)> {
        defaults::merge_parameters(default_query(), &self.params)
    }

    fn page_parameter(&self) -> &str {
        &self.page_parameter
    }

    fn page_range(&self) -> RangeInclusive<u32> {
        self.first_page..=self.last_page
    }

    fn payload_key(&self) -> &str {
        &self.payload_key
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        crate::config::validate_provider(self)
    }
}
