use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is unset or empty
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnv(String),
    /// A configuration value or file could not be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Network request failed or timed out
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The API answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },
    /// Response body was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
}

impl AppError {
    /// Whether the error belongs to the fatal startup class.
    ///
    /// Configuration errors abort the run before any request is sent; every
    /// other kind is logged and the run carries on.
    pub fn is_config_error(&self) -> bool {
        matches!(self, AppError::MissingEnv(_) | AppError::InvalidConfig(_))
    }
}

// Conversion implementations for common errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::ParseError(err.to_string())
        } else {
            AppError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::InvalidConfig(format!("Failed to parse config: {err}"))
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn test_missing_env_display_names_variable() {
        let err = AppError::MissingEnv("API_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Environment variable 'API_URL' is required but not set"
        );
    }

    #[test]
    fn test_http_status_display() {
        let err = AppError::HttpStatus {
            status: 404,
            url: "https://api.example.com/ects/inf".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("/ects/inf"));
    }

    #[test]
    fn test_network_error_display() {
        let err = AppError::NetworkError("Connection timeout".to_string());
        assert!(err.to_string().contains("Network error"));
        assert!(err.to_string().contains("Connection timeout"));
    }

    #[test]
    fn test_config_errors_are_fatal_class() {
        assert!(AppError::MissingEnv("ACCESS_KEY".into()).is_config_error());
        assert!(AppError::InvalidConfig("bad timeout".into()).is_config_error());
        assert!(!AppError::NetworkError("refused".into()).is_config_error());
        assert!(!AppError::IoError("disk full".into()).is_config_error());
        assert!(!AppError::ParseError("eof".into()).is_config_error());
    }

    #[test]
    fn test_toml_error_converts_to_invalid_config() {
        let err: AppError = toml::from_str::<toml::Table>("[broken").unwrap_err().into();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_app_error_implements_error_trait() {
        use std::error::Error;
        let err: Box<dyn Error> = Box::new(AppError::IoError("test".to_string()));
        assert!(!err.to_string().is_empty());
    }
}
