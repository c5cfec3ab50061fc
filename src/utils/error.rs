use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, RecError>;

/// 錯誤分類，用於日誌與監控
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Config,
    Input,
}

/// 錯誤嚴重程度，決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RecError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RecError::IoError(_) => ErrorCategory::Io,
            RecError::CsvError(_) | RecError::SerializationError(_) => ErrorCategory::Data,
            RecError::ConfigError { .. }
            | RecError::ConfigValidationError { .. }
            | RecError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            RecError::InvalidArgument { .. }
            | RecError::ProcessingError { .. }
            | RecError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RecError::IoError(_) => ErrorSeverity::Critical,
            RecError::CsvError(_)
            | RecError::SerializationError(_)
            | RecError::ProcessingError { .. } => ErrorSeverity::High,
            RecError::ConfigError { .. }
            | RecError::ConfigValidationError { .. }
            | RecError::InvalidConfigValueError { .. }
            | RecError::InvalidArgument { .. }
            | RecError::ValidationError { .. } => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RecError::IoError(_) => {
                "Check that the data files exist and are readable".to_string()
            }
            RecError::CsvError(_) => {
                "Check the CSV export for missing columns or malformed rows".to_string()
            }
            RecError::SerializationError(_) => {
                "Check that the JSON dataset matches the expected schema".to_string()
            }
            RecError::ConfigError { .. }
            | RecError::ConfigValidationError { .. }
            | RecError::InvalidConfigValueError { .. } => {
                "Review the configuration file or command line arguments".to_string()
            }
            RecError::InvalidArgument { .. } | RecError::ValidationError { .. } => {
                "Correct the input values and try again".to_string()
            }
            RecError::ProcessingError { .. } => {
                "Inspect the purchase history data for inconsistencies".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RecError::IoError(e) => format!("Could not read data files: {}", e),
            RecError::CsvError(e) => format!("CSV data could not be processed: {}", e),
            RecError::SerializationError(e) => format!("JSON data could not be parsed: {}", e),
            RecError::ConfigError { message } => format!("Configuration problem: {}", message),
            RecError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            RecError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
            RecError::InvalidArgument { message } => format!("Invalid input: {}", message),
            RecError::ProcessingError { message } => {
                format!("Recommendation could not be computed: {}", message)
            }
            RecError::ValidationError { message } => format!("Validation failed: {}", message),
        }
    }
}
