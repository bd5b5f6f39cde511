//! Request builders
//!
//! Each builder places the operation name, as-is, in the request's `name`
//! field. Name format is the service's business.

use crate::types::{CancelOperationRequest, DeleteOperationRequest, GetOperationRequest};
use lro_core::OperationName;

pub fn build_get_request(name: OperationName) -> GetOperationRequest {
    GetOperationRequest {
        name: name.into_inner(),
    }
}

pub fn build_cancel_request(name: OperationName) -> CancelOperationRequest {
    CancelOperationRequest {
        name: name.into_inner(),
    }
}

pub fn build_delete_request(name: OperationName) -> DeleteOperationRequest {
    DeleteOperationRequest {
        name: name.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_carry_name_unchanged() {
        for raw in ["operations/abc123", "", "not a/valid//name?", "operations/ünïcode"] {
            let name = OperationName::from(raw);
            assert_eq!(build_get_request(name.clone()).name, raw);
            assert_eq!(build_cancel_request(name.clone()).name, raw);
            assert_eq!(build_delete_request(name).name, raw);
        }
    }
}
