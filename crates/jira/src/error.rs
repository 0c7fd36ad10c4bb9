//! Error types for Jira API operations.

use thiserror::Error;

/// Errors that can occur during Jira API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A field expected in instance metadata is missing.
    /// The Sprint membership field is instance-specific; installations
    /// without Jira Software will not expose it.
    #[error("Field not found in instance metadata: {0}")]
    MissingField(String),
}

impl Error {
    /// Whether the failure is worth retrying.
    ///
    /// Covers connection-level failures and the status codes Jira returns
    /// under rate limiting or temporary outage.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(Error::Api {
            status: 429,
            message: "rate limited".to_string(),
        }
        .is_transient());
        assert!(Error::Api {
            status: 503,
            message: "maintenance".to_string(),
        }
        .is_transient());
        assert!(!Error::Api {
            status: 400,
            message: "bad request".to_string(),
        }
        .is_transient());
        assert!(!Error::NotFound("filter 10042".to_string()).is_transient());
        assert!(!Error::Config("missing base URL".to_string()).is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = Error::Api {
            status: 403,
            message: "Insufficient permissions".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 403 - Insufficient permissions");

        let err = Error::MissingField("Sprint".to_string());
        assert_eq!(
            err.to_string(),
            "Field not found in instance metadata: Sprint"
        );
    }
}
