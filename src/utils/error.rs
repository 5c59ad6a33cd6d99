use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Page {page} returned HTTP status {status}")]
    HttpStatusError { page: u32, status: u16 },

    #[error("Page {page} is not ready: payload marker \"{marker}\" not found in body")]
    PageNotReadyError { page: u32, marker: String },

    #[error("Page {page} payload is malformed: {message}")]
    MalformedPayloadError { page: u32, message: String },

    #[error("Page {page} payload has no \"{key}\" array")]
    MissingPayloadKeyError { page: u32, key: String },

    #[error("Page {page} entry {index} cannot be projected: {source}")]
    InvalidEntryError {
        page: u32,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// 錯誤分類，對應抓取流程的各個階段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Render,
    Payload,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl HarvestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HarvestError::HttpError(_) | HarvestError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            HarvestError::PageNotReadyError { .. } => ErrorCategory::Render,
            HarvestError::MalformedPayloadError { .. }
            | HarvestError::MissingPayloadKeyError { .. }
            | HarvestError::InvalidEntryError { .. }
            | HarvestError::SerializationError(_) => ErrorCategory::Payload,
            HarvestError::CsvError(_) | HarvestError::IoError(_) => ErrorCategory::Output,
            HarvestError::UrlError(_)
            | HarvestError::ConfigError { .. }
            | HarvestError::ConfigValidationError { .. }
            | HarvestError::InvalidConfigValueError { .. }
            | HarvestError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路與渲染問題重跑通常就會好
            ErrorCategory::Network | ErrorCategory::Render => ErrorSeverity::Medium,
            ErrorCategory::Payload | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HarvestError::HttpError(_) => {
                "Check network connectivity and that the listing endpoint is reachable, then rerun"
            }
            HarvestError::HttpStatusError { .. } => {
                "The listing site rejected the request; verify the endpoint and filters or try again later"
            }
            HarvestError::PageNotReadyError { .. } => {
                "The page did not contain the listing payload; the site may have served a challenge or changed its API"
            }
            HarvestError::MalformedPayloadError { .. }
            | HarvestError::MissingPayloadKeyError { .. }
            | HarvestError::SerializationError(_) => {
                "Verify --payload-key matches the top-level key of the listing JSON"
            }
            HarvestError::InvalidEntryError { .. } => {
                "A listing entry is missing one of price, shape, carat, cut, color, clarity, table, depth"
            }
            HarvestError::CsvError(_) | HarvestError::IoError(_) => {
                "Check that the output directory is writable and has free space"
            }
            HarvestError::UrlError(_) => "Check the endpoint URL format",
            HarvestError::ConfigError { .. }
            | HarvestError::ConfigValidationError { .. }
            | HarvestError::InvalidConfigValueError { .. }
            | HarvestError::MissingConfigError { .. } => {
                "Review the command-line flags or TOML configuration"
            }
        }
    }

    /// 對應 CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// 寫檔階段失敗時，輸出檔可能只寫了一部分
    pub fn output_untouched(&self) -> bool {
        self.category() != ErrorCategory::Output
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not download a listing page: {}", self),
            ErrorCategory::Render => format!("A listing page was not ready: {}", self),
            ErrorCategory::Payload => format!("Unexpected listing data: {}", self),
            ErrorCategory::Output => format!("Could not write the output file: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = HarvestError::HttpStatusError {
            page: 3,
            status: 503,
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = HarvestError::MissingPayloadKeyError {
            page: 1,
            key: "diamonds".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Payload);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("diamonds"));

        let err = HarvestError::IoError(std::io::Error::other("disk full"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert!(!err.output_untouched());
    }

    #[test]
    fn test_exit_codes_follow_severity() {
        let network = HarvestError::HttpStatusError {
            page: 1,
            status: 429,
        };
        assert_eq!(network.exit_code(), 2);
        assert!(network.output_untouched());

        let config = HarvestError::MissingConfigError {
            field: "endpoint".to_string(),
        };
        assert_eq!(config.exit_code(), 1);
        assert!(config.output_untouched());
    }

    #[test]
    fn test_user_friendly_message_mentions_page() {
        let err = HarvestError::PageNotReadyError {
            page: 42,
            marker: "diamonds".to_string(),
        };
        let message = err.user_friendly_message();
        assert!(message.starts_with("A listing page was not ready"));
        assert!(message.contains("Page 42"));
    }
}
