//! reqwest binding of the operations REST methods
//!
//! | call   | verb   | path                              | response |
//! |--------|--------|-----------------------------------|----------|
//! | get    | GET    | `{endpoint}/{version}/{name}`        | [`Operation`] |
//! | cancel | POST   | `{endpoint}/{version}/{name}:cancel` | [`Empty`] |
//! | delete | DELETE | `{endpoint}/{version}/{name}`        | [`Empty`] |
//!
//! Each call is a raw [`tower::Service`] with no retry policy. Non-2xx
//! responses fail with [`TransportError::Http`].

use crate::config::HttpJsonConfig;
use crate::error::{ConfigError, TransportError};
use crate::types::{
    CancelOperationRequest, DeleteOperationRequest, Empty, GetOperationRequest, Operation,
    OperationRequest,
};
use futures::future::BoxFuture;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::task::{Context, Poll};
use tower::Service;
use tracing::{debug, trace};
use url::Url;

/// Shared HTTP client and base URL for the operations endpoints
#[derive(Debug, Clone)]
pub struct HttpJsonTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpJsonTransport {
    /// Build a transport with its own `reqwest` client
    pub fn new(config: &HttpJsonConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        Self::with_client(client, config)
    }

    /// Build a transport around an existing client (auth headers, proxies and
    /// TLS are the client's business)
    pub fn with_client(
        client: reqwest::Client,
        config: &HttpJsonConfig,
    ) -> Result<Self, ConfigError> {
        let base_url = config.base_url()?;
        debug!(base_url = %base_url, "configured HTTP/JSON operations transport");
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn get_operation(&self) -> HttpJsonCallable<GetOperationRequest, Operation> {
        HttpJsonCallable::new(self, Method::GET, "", false)
    }

    pub fn cancel_operation(&self) -> HttpJsonCallable<CancelOperationRequest, Empty> {
        HttpJsonCallable::new(self, Method::POST, ":cancel", true)
    }

    pub fn delete_operation(&self) -> HttpJsonCallable<DeleteOperationRequest, Empty> {
        HttpJsonCallable::new(self, Method::DELETE, "", false)
    }
}

/// Raw HTTP/JSON call for one operations method
pub struct HttpJsonCallable<Req, Resp> {
    client: reqwest::Client,
    base_url: Url,
    method: Method,
    verb_suffix: &'static str,
    send_body: bool,
    _messages: PhantomData<fn(Req) -> Resp>,
}

impl<Req, Resp> HttpJsonCallable<Req, Resp> {
    fn new(
        transport: &HttpJsonTransport,
        method: Method,
        verb_suffix: &'static str,
        send_body: bool,
    ) -> Self {
        Self {
            client: transport.client.clone(),
            base_url: transport.base_url.clone(),
            method,
            verb_suffix,
            send_body,
            _messages: PhantomData,
        }
    }

    /// URL addressing operation `name`
    ///
    /// Each `/`-separated piece of the name becomes one path segment, percent
    /// encoded as needed. Names with empty, `.` or `..` pieces are rejected:
    /// URL normalization would otherwise address a different operation.
    pub fn request_url(&self, name: &str) -> Result<Url, TransportError> {
        validate_name(name)?;
        let mut url = self.base_url.clone();
        let target = format!("{name}{}", self.verb_suffix);
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(target.split('/'));
        Ok(url)
    }
}

impl<Req, Resp> Clone for HttpJsonCallable<Req, Resp> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            method: self.method.clone(),
            verb_suffix: self.verb_suffix,
            send_body: self.send_body,
            _messages: PhantomData,
        }
    }
}

impl<Req, Resp> std::fmt::Debug for HttpJsonCallable<Req, Resp> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpJsonCallable")
            .field("method", &self.method)
            .field("base_url", &self.base_url.as_str())
            .field("verb_suffix", &self.verb_suffix)
            .finish_non_exhaustive()
    }
}

impl<Req, Resp> HttpJsonCallable<Req, Resp>
where
    Req: OperationRequest,
    Resp: DeserializeOwned,
{
    async fn execute(&self, request: Req) -> Result<Resp, TransportError> {
        let url = self.request_url(request.operation_name())?;
        debug!(method = %self.method, url = %url, "sending operation request");

        let mut builder = self.client.request(self.method.clone(), url);
        if self.send_body {
            builder = builder.json(&Empty {});
        }

        let response = builder.send().await?;
        let status = response.status();
        trace!(status = status.as_u16(), "received operation response");

        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        decode_body(&body)
    }
}

impl<Req, Resp> Service<Req> for HttpJsonCallable<Req, Resp>
where
    Req: OperationRequest + Send + 'static,
    Resp: DeserializeOwned + Send + 'static,
{
    type Response = Resp;
    type Error = TransportError;
    type Future = BoxFuture<'static, Result<Resp, TransportError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // reqwest pools connections internally, a call can always be issued.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Req) -> Self::Future {
        let this = self.clone();
        Box::pin(async move { this.execute(request).await })
    }
}

fn validate_name(name: &str) -> Result<(), TransportError> {
    let reason = name.split('/').find_map(|piece| match piece {
        "" => Some("empty path segment"),
        "." | ".." => Some("dot path segment"),
        _ => None,
    });
    match reason {
        Some(reason) => Err(TransportError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Decode a success body; an empty body reads as `{}`
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, TransportError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"{}")?);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Human-readable message for a failed call
///
/// Prefers `error.message` from a JSON error body, then the raw body, then the
/// status reason phrase.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body)
        && let Some(message) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
    {
        return message.to_string();
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(endpoint: &str) -> HttpJsonTransport {
        HttpJsonTransport::new(&HttpJsonConfig::new(endpoint)).unwrap()
    }

    #[test]
    fn test_request_urls() {
        let transport = transport("https://lro.example.com");

        let url = transport.get_operation().request_url("operations/abc123").unwrap();
        assert_eq!(url.as_str(), "https://lro.example.com/v1/operations/abc123");

        let url = transport.cancel_operation().request_url("operations/xyz").unwrap();
        assert_eq!(url.as_str(), "https://lro.example.com/v1/operations/xyz:cancel");

        let url = transport
            .delete_operation()
            .request_url("projects/p1/operations/op 1")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://lro.example.com/v1/projects/p1/operations/op%201"
        );
    }

    #[test]
    fn test_request_url_rejects_dot_and_empty_segments() {
        let transport = transport("https://lro.example.com");
        let delete = transport.delete_operation();

        for name in [
            "operations/abc/..",
            "operations/../admin",
            "..",
            ".",
            "operations/./x",
            "/operations/x",
            "operations//x",
            "operations/x/",
            "",
        ] {
            let err = delete.request_url(name).unwrap_err();
            assert!(
                matches!(&err, TransportError::InvalidName { name: n, .. } if n == name),
                "{name:?} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_request_url_keeps_dots_inside_segments() {
        let transport = transport("https://lro.example.com");
        let url = transport
            .get_operation()
            .request_url("operations/v1.2/..hidden")
            .unwrap();
        assert_eq!(url.path(), "/v1/operations/v1.2/..hidden");
    }

    #[test]
    fn test_request_url_escapes_query_characters() {
        let transport = transport("http://localhost:9000/api");
        let url = transport.get_operation().request_url("operations/a?b#c").unwrap();
        assert_eq!(url.path(), "/api/v1/operations/a%3Fb%23c");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_decode_empty_body() {
        let empty: Empty = decode_body(b"").unwrap();
        assert_eq!(empty, Empty {});
        let empty: Empty = decode_body(b" \n").unwrap();
        assert_eq!(empty, Empty {});
    }

    #[test]
    fn test_decode_invalid_body() {
        let err = decode_body::<Operation>(b"<html>").unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn test_error_message_sources() {
        let json =
            br#"{"error": {"code": 404, "message": "operation not found", "status": "NOT_FOUND"}}"#;
        assert_eq!(error_message(StatusCode::NOT_FOUND, json), "operation not found");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, b"upstream down\n"), "upstream down");
        assert_eq!(error_message(StatusCode::NOT_FOUND, b""), "Not Found");
    }
}
