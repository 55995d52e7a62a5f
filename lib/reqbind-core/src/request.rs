//! Outgoing request under construction.
//!
//! A [`Request`] holds a path template, a raw query string and the body
//! written by the binding pipeline. Use [`Request::builder`] to set its
//! initial state and [`Request::into_http`] to hand it to a transport.
//!
//! # Example
//!
//! ```
//! use reqbind_core::{Method, Request};
//!
//! let request = Request::builder()
//!     .method(Method::Get)
//!     .path("/users/42")
//!     .query("page", "1")
//!     .header("Accept", "application/json")
//!     .build();
//!
//! assert_eq!(request.query(), "page=1");
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::form_urlencoded;

use crate::{AsFieldValue, Error, JsonBody, Method, Result};

/// Name of the content type header.
pub const CONTENT_TYPE: &str = "Content-Type";

// Path characters escaped on the wire; '/' separates segments and is kept.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'\\')
    .add(b'%');

/// An outgoing HTTP request being bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    method: Option<Method>,
    path: String,
    query: String,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
    content_length: u64,
}

impl Request {
    /// Creates an empty request: no method, empty path, query and body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Effective HTTP method, `GET` unless one was set.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method.unwrap_or_default()
    }

    /// The method explicitly set on this request, if any.
    #[must_use]
    pub const fn explicit_method(&self) -> Option<Method> {
        self.method
    }

    /// Sets the HTTP method.
    pub fn set_method(&mut self, method: Method) {
        self.method = Some(method);
    }

    /// Request path, possibly with unbound `:key` placeholders.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Replaces the request path.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Raw encoded query string, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the raw query string.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Length of the body in bytes, `0` without body.
    #[must_use]
    pub const fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Attach a projected JSON body.
    ///
    /// Sets the content type and length, and switches the method to `POST`
    /// when none was set.
    pub fn apply_body(&mut self, body: JsonBody) {
        self.headers
            .retain(|key, _| !key.eq_ignore_ascii_case(CONTENT_TYPE));
        self.headers
            .insert(CONTENT_TYPE.to_string(), body.content_type().to_string());
        self.content_length = body.content_length();
        self.body = Some(body.into_bytes());
        if self.method.is_none() {
            self.method = Some(Method::Post);
        }
    }

    /// Bind a record into this request.
    ///
    /// See [`crate::bind`].
    ///
    /// # Errors
    ///
    /// Returns the first classification, admission or serialization error.
    pub fn bind<T>(&mut self, record: &T) -> Result<()>
    where
        T: AsFieldValue + serde::Serialize + ?Sized,
    {
        crate::bind(record, self)
    }

    /// Convert into an [`http::Request`] targeting `base_url`.
    ///
    /// The path is percent-encoded and resolved against the base URL, then
    /// the raw query is appended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL cannot be built and
    /// [`Error::InvalidRequest`] for invalid headers.
    pub fn into_http(self, base_url: &url::Url) -> Result<http::Request<Bytes>> {
        let path = utf8_percent_encode(&self.path, PATH_ENCODE_SET).to_string();
        let mut url = base_url.join(&path)?;
        if !self.query.is_empty() {
            url.set_query(Some(&self.query));
        }

        let method = http::Method::from(self.method());
        let mut builder = http::Request::builder().method(method).uri(url.as_str());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if self.body.is_some() {
            builder = builder.header(http::header::CONTENT_LENGTH, self.content_length);
        }

        builder
            .body(self.body.unwrap_or_default())
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// Builder for [`Request`].
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    request: Request,
    pairs: Vec<(String, String)>,
}

impl RequestBuilder {
    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.request.method = Some(method);
        self
    }

    /// Sets the path template (e.g., `/users/:id`).
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.request.path = path.into();
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.insert(name.into(), value.into());
        self
    }

    /// Bind a record into the request being built.
    ///
    /// # Errors
    ///
    /// Returns the first classification, admission or serialization error.
    pub fn bind<T>(mut self, record: &T) -> Result<Self>
    where
        T: AsFieldValue + serde::Serialize + ?Sized,
    {
        self.flush_query();
        self.request.bind(record)?;
        Ok(self)
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(mut self) -> Request {
        self.flush_query();
        self.request
    }

    fn flush_query(&mut self) {
        if self.pairs.is_empty() {
            return;
        }

        let query = std::mem::take(&mut self.request.query);
        let mut serializer = form_urlencoded::Serializer::new(query);
        serializer.extend_pairs(self.pairs.drain(..));
        self.request.query = serializer.finish();
    }
}
