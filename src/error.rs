//! Unified error handling for the cattery CLI

use thiserror::Error;

/// Unified Result type for all cattery operations
pub type Result<T> = std::result::Result<T, CatteryError>;

/// Main error type for all cattery operations
#[derive(Error, Debug)]
pub enum CatteryError {
    /// HTTP/Network error
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Client-side validation failure, no network call was made
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// File or IO error
    #[error("{context}: {message}")]
    Io {
        context: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<config::ConfigError>,
    },

    /// JSON serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Internal/Unexpected error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CatteryError {
    /// Create an API error carrying the remote status code
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error with context
    pub fn io(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            context: context.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this is a network-level error (as opposed to a rejected call)
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Api { .. })
    }

    /// Check if the error was raised before any request went out
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// The HTTP status of a rejected call, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CatteryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<std::io::Error> for CatteryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            context: "IO operation".to_string(),
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for CatteryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<config::ConfigError> for CatteryError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<dialoguer::Error> for CatteryError {
    fn from(err: dialoguer::Error) -> Self {
        Self::internal(format!("Prompt error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = CatteryError::api(404, "Not Found");
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not Found"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_validation_error_is_not_network() {
        let err = CatteryError::validation("Wrong file type selected");
        assert!(err.is_validation_error());
        assert!(!err.is_network_error());
        assert_eq!(err.status(), None);
    }
}
