//! # lro-core
//!
//! Transport-agnostic building blocks for talking to a remote service's
//! long-running operations.
//!
//! A long-running operation is identified by an opaque [`OperationName`]. A
//! poller repeatedly asks the service for the operation until it reports
//! `done`, and may cancel or delete it along the way. This crate provides the
//! pieces that sit between such a poller and a concrete wire protocol:
//!
//! - [`OperationSnapshot`] - the uniform, immutable view of an operation at a
//!   point in time (done / error / response / metadata)
//! - [`StatusCode`] - canonical status codes carried by failed operations
//! - [`TranslatingCallable`] - wraps a raw transport call with an input and an
//!   output translator
//! - [`LongRunningClient`] - the get / cancel / delete capability surface a
//!   transport implements
//!
//! Transports live in their own crates (see `lro-httpjson`).
//!
//! ## Example
//!
//! ```rust
//! use lro_core::{OperationName, TranslatingCallable};
//! use tower::{ServiceExt, service_fn};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! // A raw call that speaks in its own request/response types
//! let raw = service_fn(|req: (String, u32)| async move {
//!     Ok::<_, std::convert::Infallible>(format!("{}#{}", req.0, req.1))
//! });
//!
//! let callable = TranslatingCallable::new(
//!     raw,
//!     |name: OperationName| (name.into_inner(), 1),
//!     |raw: String| raw.len(),
//! );
//!
//! let len = callable.oneshot(OperationName::from("operations/abc")).await.unwrap();
//! assert_eq!(len, "operations/abc#1".len());
//! # }
//! ```

pub mod callable;
pub mod client;
pub mod error;
pub mod name;
pub mod snapshot;
pub mod status;

pub use callable::TranslatingCallable;
pub use client::{LongRunningClient, OperationCallable};
pub use error::{ClientError, Result};
pub use name::OperationName;
pub use snapshot::{OperationError, OperationSnapshot};
pub use status::StatusCode;
