//! JSON wire messages of the long-running operations REST surface
//!
//! These follow the proto3 JSON mapping of `google.longrunning`: every field
//! is optional on the wire and names are camelCase.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A long-running operation as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    #[serde(default)]
    pub done: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Status>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

/// Error status attached to a failed operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default)]
    pub code: Option<i32>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetOperationRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOperationRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOperationRequest {
    pub name: String,
}

/// Empty success payload of cancel and delete
///
/// Unknown fields are accepted and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

/// Requests addressed at a single operation
pub trait OperationRequest {
    /// Name of the operation the request targets
    fn operation_name(&self) -> &str;
}

impl OperationRequest for GetOperationRequest {
    fn operation_name(&self) -> &str {
        &self.name
    }
}

impl OperationRequest for CancelOperationRequest {
    fn operation_name(&self) -> &str {
        &self.name
    }
}

impl OperationRequest for DeleteOperationRequest {
    fn operation_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_parses_sparse_json() {
        let op: Operation = serde_json::from_value(json!({"name": "operations/1"})).unwrap();
        assert_eq!(op.name.as_deref(), Some("operations/1"));
        assert!(!op.done);
        assert!(op.error.is_none());
        assert!(op.response.is_none());
    }

    #[test]
    fn test_operation_parses_failed_operation() {
        let op: Operation = serde_json::from_value(json!({
            "name": "operations/2",
            "done": true,
            "metadata": {"@type": "type.googleapis.com/example.Progress", "percent": 100},
            "error": {"code": 5, "message": "bucket missing", "details": [{"reason": "gone"}]}
        }))
        .unwrap();

        let error = op.error.unwrap();
        assert_eq!(error.code, Some(5));
        assert_eq!(error.message.as_deref(), Some("bucket missing"));
        assert_eq!(error.details.len(), 1);
        assert_eq!(op.metadata.unwrap()["percent"], 100);
    }

    #[test]
    fn test_empty_ignores_unknown_fields() {
        let empty: Empty = serde_json::from_value(json!({"status": "partial"})).unwrap();
        assert_eq!(empty, Empty {});
    }
}
