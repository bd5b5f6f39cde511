//! Error types for the HTTP/JSON transport
//!
//! [`TransportError`] is what the raw callables fail with. The long-running
//! client passes it through untouched, so the classification helpers here are
//! what a poller uses to decide whether to try again.
//!
//! # Example
//!
//! ```rust
//! use lro_httpjson::TransportError;
//!
//! let err = TransportError::Http {
//!     status: 503,
//!     message: "backend unavailable".to_string(),
//! };
//! assert!(err.is_server_error());
//! assert!(err.is_retryable());
//! assert!(!err.is_not_found());
//! ```

use lro_core::StatusCode;
use thiserror::Error;

/// Failure of a single raw HTTP/JSON call
#[derive(Error, Debug)]
pub enum TransportError {
    /// The service answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (connect, TLS, timeout, ...)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the expected JSON message
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The operation name did not yield a usable URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The operation name cannot be addressed without changing its meaning
    #[error("Invalid operation name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
}

/// Result type alias for raw transport calls
pub type Result<T> = std::result::Result<T, TransportError>;

impl TransportError {
    /// Canonical status code for this failure
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            TransportError::Http { status, .. } => StatusCode::from_http_status(*status),
            TransportError::Request(e) if e.is_timeout() => StatusCode::DeadlineExceeded,
            TransportError::Request(e) if e.is_connect() => StatusCode::Unavailable,
            TransportError::Request(_) => StatusCode::Unknown,
            TransportError::Decode(_) => StatusCode::Internal,
            TransportError::InvalidUrl(_) | TransportError::InvalidName { .. } => {
                StatusCode::InvalidArgument
            }
        }
    }

    /// HTTP status of the response, when there was one
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            TransportError::Http { status, .. } => Some(*status),
            TransportError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.http_status() == Some(404)
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.http_status(), Some(401 | 403))
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.http_status(), Some(500..=599))
    }

    /// Returns true if this is a rate limiting error (429)
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.http_status() == Some(429)
    }

    /// Returns true if the request or the gateway timed out
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Request(e) => e.is_timeout(),
            _ => matches!(self.http_status(), Some(408 | 504)),
        }
    }

    /// Returns true if issuing the same call again might succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Request(e) => e.is_timeout() || e.is_connect(),
            TransportError::Http { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            TransportError::Decode(_)
            | TransportError::InvalidUrl(_)
            | TransportError::InvalidName { .. } => false,
        }
    }
}

/// Errors that can occur while loading transport configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config from {path}: {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
