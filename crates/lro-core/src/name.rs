//! Operation names

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a long-running operation, assigned by the remote service
///
/// The name is opaque: nothing in this crate looks inside it or validates its
/// shape. A malformed name is rejected by the service and shows up as a
/// transport error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationName(String);

impl OperationName {
    /// Wrap a service-assigned identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OperationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for OperationName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for OperationName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<OperationName> for String {
    fn from(name: OperationName) -> Self {
        name.0
    }
}
