//! JSON content-type guard middleware.
//!
//! Rejects inbound requests whose body is not declared as JSON, and requests
//! that declare a content type without carrying a body.

use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http_body::Body;
use http_body_util::BodyExt;
use tower::{Layer, Service};
use tracing::debug;

use crate::{APPLICATION_JSON, Error, GuardConfig, Method, Result};

/// Boxed future returned by [`ContentTypeGuard`].
pub type GuardFuture<T, E> = Pin<Box<dyn Future<Output = std::result::Result<T, E>> + Send>>;

/// Layer that guards the content type of inbound requests.
///
/// # Example
///
/// ```ignore
/// use reqbind::middleware::ContentTypeGuardLayer;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(ContentTypeGuardLayer::default())
///     .service(handler);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentTypeGuardLayer {
    config: GuardConfig,
}

impl ContentTypeGuardLayer {
    /// Create a guard layer with the given configuration.
    #[must_use]
    pub const fn new(config: GuardConfig) -> Self {
        Self { config }
    }
}

impl<S> Layer<S> for ContentTypeGuardLayer {
    type Service = ContentTypeGuard<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ContentTypeGuard {
            inner,
            config: self.config,
        }
    }
}

/// Service that guards the content type of inbound requests.
///
/// Rejections are returned as the inner service's error, converted from
/// [`Error`]; accepted requests reach the inner service unchanged.
#[derive(Debug, Clone)]
pub struct ContentTypeGuard<S> {
    inner: S,
    config: GuardConfig,
}

impl<S> ContentTypeGuard<S> {
    /// Create a guard wrapping the given service.
    pub const fn new(inner: S, config: GuardConfig) -> Self {
        Self { inner, config }
    }
}

impl<S, B> Service<http::Request<B>> for ContentTypeGuard<S>
where
    S: Service<http::Request<B>> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: From<Error>,
    B: Body + From<Bytes> + Send + 'static,
    B::Data: Send,
    B::Error: Display,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = GuardFuture<S::Response, S::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<std::result::Result<(), S::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: http::Request<B>) -> Self::Future {
        let config = self.config;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let request = check_request(request, config).await?;
            inner.call(request).await
        })
    }
}

async fn check_request<B>(
    request: http::Request<B>,
    config: GuardConfig,
) -> Result<http::Request<B>>
where
    B: Body + From<Bytes>,
    B::Error: Display,
{
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default();

    let length = body_length(&request);
    if is_bodyless(request.method()) || length == Some(0) {
        return reject_content_type(&content_type).map(|()| request);
    }

    if config.read_body && length.is_none() {
        let (parts, body) = request.into_parts();
        let bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(err) => {
                debug!(error = %err, "cannot read request body");
                return Err(Error::cannot_read_body(err.to_string()));
            }
        };

        let empty = bytes.is_empty();
        let request = http::Request::from_parts(parts, B::from(bytes));
        if empty {
            return reject_content_type(&content_type).map(|()| request);
        }
        return require_json(&content_type).map(|()| request);
    }

    require_json(&content_type).map(|()| request)
}

/// Declared `Content-Length`, or the exact size hint of the body.
fn body_length<B: Body>(request: &http::Request<B>) -> Option<u64> {
    request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .or_else(|| request.body().size_hint().exact())
}

fn is_bodyless(method: &http::Method) -> bool {
    Method::try_from(method).is_ok_and(Method::is_bodyless)
}

fn reject_content_type(content_type: &str) -> Result<()> {
    if content_type.is_empty() {
        return Ok(());
    }

    debug!(content_type, "content type on a request without body");
    Err(Error::ContentTypeWithoutBody)
}

fn require_json(content_type: &str) -> Result<()> {
    if content_type.starts_with(APPLICATION_JSON) {
        return Ok(());
    }

    debug!(content_type, "non JSON content type rejected");
    Err(Error::json_content_type(content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodyless_methods() {
        assert!(is_bodyless(&http::Method::GET));
        assert!(is_bodyless(&http::Method::HEAD));
        assert!(!is_bodyless(&http::Method::POST));
        assert!(!is_bodyless(&http::Method::TRACE));
    }

    #[test]
    fn content_type_checks() {
        assert!(reject_content_type("").is_ok());
        assert!(matches!(
            reject_content_type("text/plain"),
            Err(Error::ContentTypeWithoutBody)
        ));

        assert!(require_json("application/json").is_ok());
        assert!(require_json("application/json; charset=utf-8").is_ok());
        let err = require_json("text/plain").expect_err("rejected");
        assert_eq!(
            err.to_string(),
            "only 'application/json' content type allowed, got: 'text/plain'"
        );
    }

    #[test]
    fn declared_length() {
        let request = http::Request::builder()
            .header(CONTENT_LENGTH, "12")
            .body(http_body_util::Empty::<Bytes>::new())
            .expect("request");
        assert_eq!(body_length(&request), Some(12));

        let request = http::Request::new(http_body_util::Full::new(Bytes::from_static(b"{}")));
        assert_eq!(body_length(&request), Some(2));
    }
}
