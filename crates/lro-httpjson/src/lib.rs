//! # lro-httpjson
//!
//! HTTP/JSON transport for long-running operations.
//!
//! - [`types`] - JSON wire messages (`Operation`, get/cancel/delete requests)
//! - [`requests`] - request builders, operation name in, wire request out
//! - [`snapshot`] - wire `Operation` to [`lro_core::OperationSnapshot`]
//! - [`transport`] - reqwest binding of the REST methods
//! - [`client`] - [`HttpJsonLongRunningClient`], the
//!   [`lro_core::LongRunningClient`] for this transport
//! - [`config`] - TOML transport settings
//!
//! No retries happen here. Transport failures reach the caller as
//! [`TransportError`]s; deciding whether to try again is the poller's job.

pub mod client;
pub mod config;
pub mod error;
pub mod requests;
pub mod snapshot;
pub mod transport;
pub mod types;

pub use client::{HttpJsonLongRunningClient, HttpJsonLongRunningClientBuilder};
pub use config::HttpJsonConfig;
pub use error::{ConfigError, Result, TransportError};
pub use requests::{build_cancel_request, build_delete_request, build_get_request};
pub use snapshot::snapshot_from_operation;
pub use transport::{HttpJsonCallable, HttpJsonTransport};
pub use types::{
    CancelOperationRequest, DeleteOperationRequest, Empty, GetOperationRequest, Operation,
    OperationRequest, Status,
};
