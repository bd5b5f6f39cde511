//! The long-running client capability surface
//!
//! Every transport exposes the same three calls keyed by operation name. A
//! generic poller only ever sees this trait: it drives `get` until the
//! snapshot reports `done`, and issues `cancel`/`delete` on demand.

use crate::name::OperationName;
use crate::snapshot::OperationSnapshot;
use tower::util::BoxCloneSyncService;

/// Boxed, cloneable, thread-safe callable keyed by operation name
pub type OperationCallable<T, E> = BoxCloneSyncService<OperationName, T, E>;

/// Get / cancel / delete access to a service's long-running operations
///
/// Implementations assemble their callables once and hand out clones, so
/// calling an accessor twice yields callables that behave identically.
///
/// Cancelling the future of a `get` call only abandons that request. Stopping
/// the remote operation takes an explicit call to
/// [`cancel_operation_callable`](Self::cancel_operation_callable).
pub trait LongRunningClient {
    /// Error produced by the underlying transport
    type Error;

    /// Fetch the current state of an operation
    fn get_operation_callable(&self) -> OperationCallable<OperationSnapshot, Self::Error>;

    /// Ask the service to stop an operation
    fn cancel_operation_callable(&self) -> OperationCallable<(), Self::Error>;

    /// Tell the service the caller is no longer interested in an operation
    fn delete_operation_callable(&self) -> OperationCallable<(), Self::Error>;
}
