//! Canonical status codes for failed operations
//!
//! Operations that finish with an error report a numeric code from the
//! canonical RPC code space (`google.rpc.Code`). Transports that speak plain
//! HTTP can map their response status onto the same space with
//! [`StatusCode::from_http_status`].

use std::fmt;

/// Canonical status code carried by a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

impl StatusCode {
    /// Map a numeric RPC code, falling back to `Unknown` for values outside the
    /// canonical range
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => StatusCode::Ok,
            1 => StatusCode::Cancelled,
            3 => StatusCode::InvalidArgument,
            4 => StatusCode::DeadlineExceeded,
            5 => StatusCode::NotFound,
            6 => StatusCode::AlreadyExists,
            7 => StatusCode::PermissionDenied,
            8 => StatusCode::ResourceExhausted,
            9 => StatusCode::FailedPrecondition,
            10 => StatusCode::Aborted,
            11 => StatusCode::OutOfRange,
            12 => StatusCode::Unimplemented,
            13 => StatusCode::Internal,
            14 => StatusCode::Unavailable,
            15 => StatusCode::DataLoss,
            16 => StatusCode::Unauthenticated,
            _ => StatusCode::Unknown,
        }
    }

    /// Numeric RPC code
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::Cancelled => 1,
            StatusCode::Unknown => 2,
            StatusCode::InvalidArgument => 3,
            StatusCode::DeadlineExceeded => 4,
            StatusCode::NotFound => 5,
            StatusCode::AlreadyExists => 6,
            StatusCode::PermissionDenied => 7,
            StatusCode::ResourceExhausted => 8,
            StatusCode::FailedPrecondition => 9,
            StatusCode::Aborted => 10,
            StatusCode::OutOfRange => 11,
            StatusCode::Unimplemented => 12,
            StatusCode::Internal => 13,
            StatusCode::Unavailable => 14,
            StatusCode::DataLoss => 15,
            StatusCode::Unauthenticated => 16,
        }
    }

    /// Map an HTTP response status onto the canonical code space
    #[must_use]
    pub fn from_http_status(status: u16) -> Self {
        match status {
            200..=299 => StatusCode::Ok,
            400 => StatusCode::InvalidArgument,
            401 => StatusCode::Unauthenticated,
            403 => StatusCode::PermissionDenied,
            404 => StatusCode::NotFound,
            409 => StatusCode::Aborted,
            412 => StatusCode::FailedPrecondition,
            416 => StatusCode::OutOfRange,
            429 => StatusCode::ResourceExhausted,
            499 => StatusCode::Cancelled,
            500 => StatusCode::Internal,
            501 => StatusCode::Unimplemented,
            503 => StatusCode::Unavailable,
            504 => StatusCode::DeadlineExceeded,
            400..=499 => StatusCode::FailedPrecondition,
            500..=599 => StatusCode::Internal,
            _ => StatusCode::Unknown,
        }
    }

    /// Upper-snake name as used on the wire (`NOT_FOUND`)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Cancelled => "CANCELLED",
            StatusCode::Unknown => "UNKNOWN",
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::DeadlineExceeded => "DEADLINE_EXCEEDED",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::AlreadyExists => "ALREADY_EXISTS",
            StatusCode::PermissionDenied => "PERMISSION_DENIED",
            StatusCode::ResourceExhausted => "RESOURCE_EXHAUSTED",
            StatusCode::FailedPrecondition => "FAILED_PRECONDITION",
            StatusCode::Aborted => "ABORTED",
            StatusCode::OutOfRange => "OUT_OF_RANGE",
            StatusCode::Unimplemented => "UNIMPLEMENTED",
            StatusCode::Internal => "INTERNAL",
            StatusCode::Unavailable => "UNAVAILABLE",
            StatusCode::DataLoss => "DATA_LOSS",
            StatusCode::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip_covers_canonical_range() {
        for code in 0..=16 {
            assert_eq!(StatusCode::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        assert_eq!(StatusCode::from_code(-1), StatusCode::Unknown);
        assert_eq!(StatusCode::from_code(99), StatusCode::Unknown);
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(StatusCode::from_http_status(200), StatusCode::Ok);
        assert_eq!(StatusCode::from_http_status(204), StatusCode::Ok);
        assert_eq!(StatusCode::from_http_status(404), StatusCode::NotFound);
        assert_eq!(StatusCode::from_http_status(401), StatusCode::Unauthenticated);
        assert_eq!(StatusCode::from_http_status(429), StatusCode::ResourceExhausted);
        assert_eq!(StatusCode::from_http_status(418), StatusCode::FailedPrecondition);
        assert_eq!(StatusCode::from_http_status(502), StatusCode::Internal);
        assert_eq!(StatusCode::from_http_status(503), StatusCode::Unavailable);
        assert_eq!(StatusCode::from_http_status(302), StatusCode::Unknown);
    }

    #[test]
    fn test_display_uses_wire_name() {
        assert_eq!(StatusCode::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(StatusCode::from_code(9).to_string(), "FAILED_PRECONDITION");
    }
}
