//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Failed to send the request or read the reply.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Could not connect to the server.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// Status code of an HTTP error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the request never got an HTTP answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::RequestError(_) | FetchError::Connect(_) | FetchError::Timeout
        )
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_http_errors() {
        let err = FetchError::HttpError {
            status: 409,
            message: "conflict".into(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(FetchError::Timeout.status(), None);
    }

    #[test]
    fn test_is_transport() {
        assert!(FetchError::Timeout.is_transport());
        assert!(FetchError::Connect("refused".into()).is_transport());
        assert!(!FetchError::ParseError("bad".into()).is_transport());
    }

    #[test]
    fn test_error_display() {
        let err = FetchError::HttpError {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }
}
