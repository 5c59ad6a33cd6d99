use crate::config::defaults::{self, *};
use crate::core::ConfigProvider;
use crate::utils::error::{HarvestError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

/// Harvest settings loaded from a TOML file. Every section and key is
/// optional and falls back to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub harvest: HarvestSection,
    pub source: SourceSection,
    pub load: LoadSection,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestSection {
    pub name: String,
    pub first_page: u32,
    pub last_page: u32,
}

impl Default for HarvestSection {
    fn default() -> Self {
        Self {
            name: "diamond-harvest".to_string(),
            first_page: DEFAULT_FIRST_PAGE,
            last_page: DEFAULT_LAST_PAGE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSection {
    pub endpoint: String,
    pub page_parameter: String,
    pub payload_key: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    /// 完整取代內建搜尋條件
    pub parameters: Option<Vec<(String, String)>>,
    /// 只覆寫或追加個別條件
    pub overrides: Option<Vec<(String, String)>>,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_parameter: DEFAULT_PAGE_PARAMETER.to_string(),
            payload_key: DEFAULT_PAYLOAD_KEY.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            parameters: None,
            overrides: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadSection {
    pub output_path: String,
    pub filename: String,
}

impl Default for LoadSection {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            filename: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HarvestError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SID})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HarvestError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .map(|format| format == "json")
            .unwrap_or(false)
    }

    pub fn page_count(&self) -> usize {
        self.page_range().count()
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn query_parameters(&self) -> Vec<(String, String)> {
        let base = self
            .source
            .parameters
            .clone()
            .unwrap_or_else(default_query);
        match &self.source.overrides {
            Some(overrides) => defaults::merge_parameters(base, overrides),
            None => base,
        }
    }

    fn page_parameter(&self) -> &str {
        &self.source.page_parameter
    }

    fn page_range(&self) -> RangeInclusive<u32> {
        self.harvest.first_page..=self.harvest.last_page
    }

    fn payload_key(&self) -> &str {
        &self.source.payload_key
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_file(&self) -> &str {
        &self.load.filename
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::config::validate_provider(self)?;

        if let Some(format) = self
            .monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
        {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format) {
                return Err(HarvestError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}
