use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitmentError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Catalog endpoint returned HTTP {status}")]
    CatalogFetchError { status: u16 },

    #[error("Compatibility catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },

    #[error("Invalid year range '{input}': {reason}")]
    InvalidYearRange { input: String, reason: String },

    #[error("Invalid compatibility query: {message}")]
    InvalidQuery { message: String },

    #[error("Invalid product record: {message}")]
    InvalidRecord { message: String },

    #[error("Product not found: {id}")]
    ProductNotFound { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FitmentError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FitmentError::ApiError(_)
            | FitmentError::CatalogFetchError { .. }
            | FitmentError::CatalogUnavailable { .. } => ErrorCategory::Network,
            FitmentError::ConfigError { .. }
            | FitmentError::ConfigValidationError { .. }
            | FitmentError::InvalidConfigValueError { .. }
            | FitmentError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FitmentError::SerializationError(_)
            | FitmentError::InvalidYearRange { .. }
            | FitmentError::InvalidQuery { .. }
            | FitmentError::InvalidRecord { .. }
            | FitmentError::ProductNotFound { .. } => ErrorCategory::Data,
            FitmentError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FitmentError::InvalidYearRange { .. } => ErrorSeverity::Low,
            FitmentError::ApiError(_)
            | FitmentError::CatalogFetchError { .. }
            | FitmentError::CatalogUnavailable { .. } => ErrorSeverity::Medium,
            FitmentError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Whether retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FitmentError::ApiError(e) => e.is_timeout() || e.is_connect(),
            FitmentError::CatalogFetchError { status } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FitmentError::ApiError(_) | FitmentError::CatalogFetchError { .. } => {
                "Could not reach the vehicle catalog service".to_string()
            }
            FitmentError::CatalogUnavailable { .. } => {
                "Compatibility data is unavailable right now".to_string()
            }
            FitmentError::IoError(e) => format!("File access failed: {}", e),
            FitmentError::SerializationError(e) => format!("Malformed JSON data: {}", e),
            FitmentError::InvalidYearRange { input, .. } => {
                format!("'{}' is not a valid year or year range", input)
            }
            FitmentError::InvalidQuery { message } => format!("Invalid search: {}", message),
            FitmentError::ProductNotFound { id } => format!("No product with id '{}'", id),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the catalog endpoint and network connectivity, then retry"
            }
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
            ErrorCategory::Data => {
                "Check the input data; years must be written as YYYY or YYYY-YYYY"
            }
            ErrorCategory::System => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, FitmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_and_severity() {
        let err = FitmentError::CatalogFetchError { status: 503 };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.is_retryable());

        let err = FitmentError::CatalogFetchError { status: 404 };
        assert!(!err.is_retryable());

        let err = FitmentError::MissingConfigError {
            field: "catalog.endpoint".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_user_friendly_message() {
        let err = FitmentError::InvalidYearRange {
            input: "20-10".to_string(),
            reason: "expected four digits".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "'20-10' is not a valid year or year range"
        );
        assert!(err.recovery_suggestion().contains("YYYY"));
    }
}
