#[cfg(feature = "cli")]
pub mod cli;
pub mod defaults;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_page_range, validate_path, validate_positive_number,
    validate_url,
};

/// 所有設定來源共用的檢查，在送出任何請求前執行
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_url("endpoint", config.endpoint())?;

    let pages = config.page_range();
    validate_page_range("page_range", *pages.start(), *pages.end())?;

    validate_non_empty_string("page_parameter", config.page_parameter())?;
    validate_non_empty_string("payload_key", config.payload_key())?;
    validate_path("output_path", config.output_path())?;
    validate_non_empty_string("output_file", config.output_file())?;
    validate_positive_number("timeout_seconds", config.timeout_seconds(), 1)?;

    Ok(())
}
