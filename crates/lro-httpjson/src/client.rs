//! Long-running client for the HTTP/JSON transport
//!
//! Composes the three raw operations calls with the request builders and the
//! snapshot factory. The callables are assembled once, when the client is
//! built, and every accessor hands out a clone.
//!
//! # Example
//!
//! ```rust,no_run
//! use lro_core::{LongRunningClient, OperationName};
//! use lro_httpjson::{HttpJsonConfig, HttpJsonLongRunningClient};
//! use tower::ServiceExt;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpJsonConfig::new("https://lro.example.com");
//! let client = HttpJsonLongRunningClient::from_config(&config)?;
//!
//! let snapshot = client
//!     .get_operation_callable()
//!     .oneshot(OperationName::from("operations/abc123"))
//!     .await?;
//!
//! if snapshot.is_done() {
//!     println!("finished: {:?}", snapshot.response());
//! }
//! # Ok(())
//! # }
//! ```

use crate::config::HttpJsonConfig;
use crate::error::{ConfigError, TransportError};
use crate::requests::{build_cancel_request, build_delete_request, build_get_request};
use crate::snapshot::snapshot_from_operation;
use crate::transport::HttpJsonTransport;
use crate::types::{
    CancelOperationRequest, DeleteOperationRequest, Empty, GetOperationRequest, Operation,
};
use lro_core::{
    ClientError, LongRunningClient, OperationCallable, OperationSnapshot, TranslatingCallable,
};
use tower::Service;
use tower::util::BoxCloneSyncService;
use tracing::debug;

type RawCallable<Req, Resp, E> = BoxCloneSyncService<Req, Resp, E>;

/// [`LongRunningClient`] over HTTP/JSON raw callables
///
/// Generic over the raw callables' error type so any transport speaking the
/// JSON messages can be plugged in. The reqwest binding fails with
/// [`TransportError`].
pub struct HttpJsonLongRunningClient<E = TransportError> {
    get_operation: OperationCallable<OperationSnapshot, E>,
    cancel_operation: OperationCallable<(), E>,
    delete_operation: OperationCallable<(), E>,
}

impl<E: 'static> HttpJsonLongRunningClient<E> {
    /// Compose a client from the three raw calls
    pub fn create<G, C, D>(get_operation: G, cancel_operation: C, delete_operation: D) -> Self
    where
        G: Service<GetOperationRequest, Response = Operation, Error = E>
            + Clone
            + Send
            + Sync
            + 'static,
        G::Future: Send + 'static,
        C: Service<CancelOperationRequest, Response = Empty, Error = E>
            + Clone
            + Send
            + Sync
            + 'static,
        C::Future: Send + 'static,
        D: Service<DeleteOperationRequest, Response = Empty, Error = E>
            + Clone
            + Send
            + Sync
            + 'static,
        D::Future: Send + 'static,
    {
        Self {
            get_operation: BoxCloneSyncService::new(TranslatingCallable::new(
                get_operation,
                build_get_request,
                snapshot_from_operation,
            )),
            cancel_operation: BoxCloneSyncService::new(TranslatingCallable::new(
                cancel_operation,
                build_cancel_request,
                discard_empty,
            )),
            delete_operation: BoxCloneSyncService::new(TranslatingCallable::new(
                delete_operation,
                build_delete_request,
                discard_empty,
            )),
        }
    }

    /// Builder that reports a missing raw call instead of requiring all three
    /// up front
    pub fn builder() -> HttpJsonLongRunningClientBuilder<E> {
        HttpJsonLongRunningClientBuilder::default()
    }
}

impl HttpJsonLongRunningClient<TransportError> {
    /// Client backed by the reqwest binding
    pub fn from_transport(transport: &HttpJsonTransport) -> Self {
        debug!(base_url = %transport.base_url(), "creating HTTP/JSON long-running client");
        Self::create(
            transport.get_operation(),
            transport.cancel_operation(),
            transport.delete_operation(),
        )
    }

    /// Client backed by a fresh reqwest transport built from `config`
    pub fn from_config(config: &HttpJsonConfig) -> Result<Self, ConfigError> {
        let transport = HttpJsonTransport::new(config)?;
        Ok(Self::from_transport(&transport))
    }
}

impl<E: 'static> Clone for HttpJsonLongRunningClient<E> {
    fn clone(&self) -> Self {
        Self {
            get_operation: self.get_operation.clone(),
            cancel_operation: self.cancel_operation.clone(),
            delete_operation: self.delete_operation.clone(),
        }
    }
}

impl<E> std::fmt::Debug for HttpJsonLongRunningClient<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpJsonLongRunningClient").finish_non_exhaustive()
    }
}

impl<E: 'static> LongRunningClient for HttpJsonLongRunningClient<E> {
    type Error = E;

    fn get_operation_callable(&self) -> OperationCallable<OperationSnapshot, E> {
        self.get_operation.clone()
    }

    fn cancel_operation_callable(&self) -> OperationCallable<(), E> {
        self.cancel_operation.clone()
    }

    fn delete_operation_callable(&self) -> OperationCallable<(), E> {
        self.delete_operation.clone()
    }
}

/// Cancel and delete answer with an empty message; whatever it holds is dropped.
fn discard_empty(_: Empty) {}

/// Step-by-step construction of an [`HttpJsonLongRunningClient`]
pub struct HttpJsonLongRunningClientBuilder<E> {
    get_operation: Option<RawCallable<GetOperationRequest, Operation, E>>,
    cancel_operation: Option<RawCallable<CancelOperationRequest, Empty, E>>,
    delete_operation: Option<RawCallable<DeleteOperationRequest, Empty, E>>,
}

impl<E> Default for HttpJsonLongRunningClientBuilder<E> {
    fn default() -> Self {
        Self {
            get_operation: None,
            cancel_operation: None,
            delete_operation: None,
        }
    }
}

impl<E: 'static> HttpJsonLongRunningClientBuilder<E> {
    pub fn get_operation<S>(mut self, service: S) -> Self
    where
        S: Service<GetOperationRequest, Response = Operation, Error = E>
            + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        self.get_operation = Some(BoxCloneSyncService::new(service));
        self
    }

    pub fn cancel_operation<S>(mut self, service: S) -> Self
    where
        S: Service<CancelOperationRequest, Response = Empty, Error = E>
            + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        self.cancel_operation = Some(BoxCloneSyncService::new(service));
        self
    }

    pub fn delete_operation<S>(mut self, service: S) -> Self
    where
        S: Service<DeleteOperationRequest, Response = Empty, Error = E>
            + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        self.delete_operation = Some(BoxCloneSyncService::new(service));
        self
    }

    /// Assemble the client, failing if any raw call is missing
    pub fn build(self) -> lro_core::Result<HttpJsonLongRunningClient<E>> {
        let get_operation = self.get_operation.ok_or(ClientError::MissingCallable {
            method: "get_operation",
        })?;
        let cancel_operation = self.cancel_operation.ok_or(ClientError::MissingCallable {
            method: "cancel_operation",
        })?;
        let delete_operation = self.delete_operation.ok_or(ClientError::MissingCallable {
            method: "delete_operation",
        })?;

        Ok(HttpJsonLongRunningClient::create(
            get_operation,
            cancel_operation,
            delete_operation,
        ))
    }
}
