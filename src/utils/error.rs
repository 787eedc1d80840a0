use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid field path '{path}': {reason}")]
    InvalidPathError { path: String, reason: String },

    #[error("Missing field: {path}")]
    MissingFieldError { path: String },

    #[error("Field '{path}' has unexpected type: {message}")]
    InvalidTypeError { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IntegrationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IntegrationError::IoError(_) => ErrorCategory::Io,
            IntegrationError::ConfigError { .. }
            | IntegrationError::InvalidConfigValueError { .. }
            | IntegrationError::InvalidPathError { .. } => ErrorCategory::Configuration,
            IntegrationError::SerializationError(_)
            | IntegrationError::MissingFieldError { .. }
            | IntegrationError::InvalidTypeError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 缺少欄位只是「沒有值」，呼叫端通常會當作空值處理
            IntegrationError::MissingFieldError { .. } => ErrorSeverity::Low,
            IntegrationError::InvalidTypeError { .. }
            | IntegrationError::SerializationError(_) => ErrorSeverity::Medium,
            IntegrationError::ConfigError { .. }
            | IntegrationError::InvalidConfigValueError { .. }
            | IntegrationError::InvalidPathError { .. } => ErrorSeverity::High,
            IntegrationError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            IntegrationError::IoError(_) => {
                "Check that the file exists and is readable".to_string()
            }
            IntegrationError::SerializationError(_) => {
                "Verify the source document is valid JSON".to_string()
            }
            IntegrationError::ConfigError { .. } => {
                "Fix the mapping configuration file and try again".to_string()
            }
            IntegrationError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the configuration", field)
            }
            IntegrationError::InvalidPathError { .. } => {
                "Use dot-separated keys with optional [index], [-index] or [*] suffixes"
                    .to_string()
            }
            IntegrationError::MissingFieldError { path } => {
                format!("Make sure the source document provides '{}'", path)
            }
            IntegrationError::InvalidTypeError { path, .. } => {
                format!("Check the type of '{}' in the source document", path)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read input: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Could not parse entity: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntegrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_low_severity_data_error() {
        let err = IntegrationError::MissingFieldError {
            path: "tender.value".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.to_string(), "Missing field: tender.value");
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = IntegrationError::InvalidPathError {
            path: "a..b".to_string(),
            reason: "empty segment".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.severity() > ErrorSeverity::Medium);
        assert!(err.user_friendly_message().starts_with("Invalid configuration"));
    }
}
