//! Point-in-time view of a long-running operation
//!
//! A snapshot never changes once built. When the operation moves forward the
//! poller fetches it again and gets a new snapshot.

use crate::name::OperationName;
use crate::status::StatusCode;
use serde_json::Value;

/// Error reported by an operation that finished unsuccessfully
#[derive(Debug, Clone, PartialEq)]
pub struct OperationError {
    pub code: StatusCode,
    pub message: String,
}

impl OperationError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Pending,
    Succeeded(Value),
    Failed(OperationError),
}

/// Transport-agnostic state of one long-running operation
///
/// Exactly one of [`response`](Self::response) and
/// [`error_code`](Self::error_code) is set when the operation is done, and
/// neither while it is still running.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSnapshot {
    name: OperationName,
    metadata: Option<Value>,
    state: State,
}

impl OperationSnapshot {
    /// Snapshot of an operation that has not finished yet
    pub fn pending(name: impl Into<OperationName>, metadata: Option<Value>) -> Self {
        Self {
            name: name.into(),
            metadata,
            state: State::Pending,
        }
    }

    /// Snapshot of an operation that finished with a response payload
    pub fn succeeded(
        name: impl Into<OperationName>,
        metadata: Option<Value>,
        response: Value,
    ) -> Self {
        Self {
            name: name.into(),
            metadata,
            state: State::Succeeded(response),
        }
    }

    /// Snapshot of an operation that finished with an error
    pub fn failed(
        name: impl Into<OperationName>,
        metadata: Option<Value>,
        error: OperationError,
    ) -> Self {
        Self {
            name: name.into(),
            metadata,
            state: State::Failed(error),
        }
    }

    #[must_use]
    pub fn name(&self) -> &OperationName {
        &self.name
    }

    /// Transport-defined progress metadata, if the service sent any
    #[must_use]
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    /// Whether the operation reached a terminal state
    #[must_use]
    pub fn is_done(&self) -> bool {
        !matches!(self.state, State::Pending)
    }

    /// Success payload of a finished operation
    #[must_use]
    pub fn response(&self) -> Option<&Value> {
        match &self.state {
            State::Succeeded(response) => Some(response),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&OperationError> {
        match &self.state {
            State::Failed(error) => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> Option<StatusCode> {
        self.error().map(|e| e.code)
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error().map(|e| e.message.as_str())
    }
}
