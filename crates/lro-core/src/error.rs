//! Error handling for lro-core
//!
//! Failures of the underlying transport never pass through here: a
//! [`TranslatingCallable`](crate::TranslatingCallable) hands the raw error back
//! to the caller untouched. [`ClientError`] only covers misuse detected while
//! a client is being put together, before any call is issued.

use thiserror::Error;

/// Errors raised while assembling a long-running client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// One of the raw get / cancel / delete callables was never supplied
    #[error("No raw callable configured for {method}")]
    MissingCallable { method: &'static str },
}

/// Result type alias for client construction
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Returns the name of the method whose raw callable was missing
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            ClientError::MissingCallable { method } => method,
        }
    }
}
