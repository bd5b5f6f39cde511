//! Operation snapshot factory for the HTTP/JSON transport
//!
//! Conversion never fails. Ill-formed but parseable operations resolve to a
//! deterministic snapshot; stricter validation belongs to a higher layer.

use crate::types::{Operation, Status};
use lro_core::{OperationError, OperationName, OperationSnapshot, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Convert a wire [`Operation`] into a transport-agnostic snapshot
///
/// - done with an error: failed, even if a response is also present
/// - an error whose code is `0` (OK) is not an error and is dropped
/// - done with a response: succeeded
/// - done with neither: succeeded with an empty payload (`{}`)
/// - not done: pending, stray error/response fields are ignored
pub fn snapshot_from_operation(operation: Operation) -> OperationSnapshot {
    let Operation {
        name,
        metadata,
        done,
        error,
        response,
    } = operation;
    let name = OperationName::from(name.unwrap_or_default());
    let error = error.filter(|status| status.code != Some(StatusCode::Ok.code()));

    if !done {
        if error.is_some() || response.is_some() {
            debug!(operation = %name, "ignoring result fields on an unfinished operation");
        }
        return OperationSnapshot::pending(name, metadata);
    }

    match (error, response) {
        (Some(status), response) => {
            if response.is_some() {
                warn!(
                    operation = %name,
                    "operation reports both error and response, keeping the error"
                );
            }
            OperationSnapshot::failed(name, metadata, operation_error(status))
        }
        (None, Some(response)) => OperationSnapshot::succeeded(name, metadata, response),
        (None, None) => {
            debug!(
                operation = %name,
                "finished operation carries no response, using empty payload"
            );
            OperationSnapshot::succeeded(name, metadata, Value::Object(Map::new()))
        }
    }
}

fn operation_error(status: Status) -> OperationError {
    let code = status
        .code
        .map_or(StatusCode::Unknown, StatusCode::from_code);
    OperationError::new(code, status.message.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn operation(value: Value) -> Operation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_completed_with_response() {
        let snapshot = snapshot_from_operation(operation(json!({
            "name": "operations/abc123",
            "done": true,
            "response": {"value": "ok"}
        })));

        assert_eq!(
            snapshot,
            OperationSnapshot::succeeded("operations/abc123", None, json!({"value": "ok"}))
        );
        assert!(snapshot.is_done());
        assert!(snapshot.error_code().is_none());
    }

    #[test]
    fn test_completed_with_error() {
        let snapshot = snapshot_from_operation(operation(json!({
            "name": "operations/failed",
            "done": true,
            "error": {"code": 9, "message": "quota precondition"}
        })));

        assert!(snapshot.is_done());
        assert_eq!(snapshot.error_code(), Some(StatusCode::FailedPrecondition));
        assert_eq!(snapshot.error_message(), Some("quota precondition"));
        assert!(snapshot.response().is_none());
    }

    #[test]
    fn test_in_progress() {
        let snapshot = snapshot_from_operation(operation(json!({
            "name": "operations/running",
            "metadata": {"percent": 25}
        })));

        assert!(!snapshot.is_done());
        assert!(snapshot.error_code().is_none());
        assert!(snapshot.response().is_none());
        assert_eq!(snapshot.metadata(), Some(&json!({"percent": 25})));
    }

    #[test]
    fn test_error_preferred_over_response() {
        let snapshot = snapshot_from_operation(operation(json!({
            "name": "operations/confused",
            "done": true,
            "error": {"code": 13, "message": "boom"},
            "response": {"value": "ok"}
        })));

        assert_eq!(snapshot.error_code(), Some(StatusCode::Internal));
        assert!(snapshot.response().is_none());
    }

    #[test]
    fn test_done_without_result_gets_empty_payload() {
        let snapshot = snapshot_from_operation(operation(json!({
            "name": "operations/bare",
            "done": true
        })));

        assert!(snapshot.is_done());
        assert_eq!(snapshot.response(), Some(&json!({})));
        assert!(snapshot.error().is_none());
    }

    #[test]
    fn test_unfinished_ignores_stray_result_fields() {
        let snapshot = snapshot_from_operation(operation(json!({
            "name": "operations/early",
            "done": false,
            "error": {"code": 2},
            "response": {"value": "too soon"}
        })));

        assert!(!snapshot.is_done());
        assert!(snapshot.error().is_none());
        assert!(snapshot.response().is_none());
    }

    #[test]
    fn test_ok_error_code_is_not_a_failure() {
        let snapshot = snapshot_from_operation(operation(json!({
            "name": "operations/ok-status",
            "done": true,
            "error": {"code": 0},
            "response": {"value": "ok"}
        })));

        assert!(snapshot.error().is_none());
        assert_eq!(snapshot.response(), Some(&json!({"value": "ok"})));

        let snapshot = snapshot_from_operation(operation(json!({
            "name": "operations/ok-status-bare",
            "done": true,
            "error": {"code": 0, "message": ""}
        })));

        assert!(snapshot.error().is_none());
        assert_eq!(snapshot.response(), Some(&json!({})));
    }

    #[test]
    fn test_error_without_code_or_message() {
        let snapshot = snapshot_from_operation(operation(json!({
            "name": "operations/vague",
            "done": true,
            "error": {}
        })));

        assert_eq!(snapshot.error_code(), Some(StatusCode::Unknown));
        assert_eq!(snapshot.error_message(), Some(""));
    }
}
