//! Translating callables
//!
//! A [`TranslatingCallable`] adapts a raw transport call that speaks in wire
//! request/response types into a call that speaks in user-facing types. The
//! input translator runs eagerly when the call is issued. The output
//! translator runs once, as the continuation of a successful raw call, and is
//! never invoked when the raw call fails: the transport error reaches the
//! caller unchanged.
//!
//! Both translators are plain synchronous functions. They must not block or
//! perform I/O.

use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;

/// Service adapter composing a raw call with input and output translators
///
/// Cloning is cheap when the wrapped service is: the translators are shared
/// behind an [`Arc`].
pub struct TranslatingCallable<S, In, Out> {
    inner: S,
    to_request: Arc<In>,
    from_response: Arc<Out>,
}

impl<S, In, Out> TranslatingCallable<S, In, Out> {
    /// Wrap `inner` so that calls go through `to_request` on the way in and
    /// `from_response` on the way out
    pub fn new(inner: S, to_request: In, from_response: Out) -> Self {
        Self {
            inner,
            to_request: Arc::new(to_request),
            from_response: Arc::new(from_response),
        }
    }
}

impl<S: Clone, In, Out> Clone for TranslatingCallable<S, In, Out> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            to_request: Arc::clone(&self.to_request),
            from_response: Arc::clone(&self.from_response),
        }
    }
}

impl<S, In, Out> std::fmt::Debug for TranslatingCallable<S, In, Out>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatingCallable")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<S, In, Out, Input, Request, Output> Service<Input> for TranslatingCallable<S, In, Out>
where
    S: Service<Request>,
    S::Response: 'static,
    S::Error: 'static,
    S::Future: Send + 'static,
    In: Fn(Input) -> Request,
    Out: Fn(S::Response) -> Output + Send + Sync + 'static,
    Output: 'static,
{
    type Response = Output;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Output, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, input: Input) -> Self::Future {
        let request = (self.to_request)(input);
        translate_response(self.inner.call(request), Arc::clone(&self.from_response))
    }
}

fn translate_response<F, T, E, O, Out>(
    raw: F,
    from_response: Arc<Out>,
) -> BoxFuture<'static, Result<O, E>>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    Out: Fn(T) -> O + Send + Sync + 'static,
    T: 'static,
    E: 'static,
    O: 'static,
{
    Box::pin(async move {
        let response = raw.await?;
        Ok(from_response(response))
    })
}
