//! Error types for reqbind.

use derive_more::{Display, Error, From};
use http::StatusCode;

use crate::value::Kind;

/// Machine-readable code for a rejected (non JSON) content type.
pub const ERR_ONLY_JSON_CONTENT_TYPE_ALLOWED: &str = "ERR_ONLY_JSON_CONTENT_TYPE_ALLOWED";

/// Machine-readable code for a content type sent without a body.
pub const ERR_CONTENT_TYPE_WITHOUT_BODY: &str = "ERR_CONTENT_TYPE_WITHOUT_BODY";

/// Machine-readable code for a body that could not be buffered.
pub const ERR_CANNOT_READ_BODY: &str = "ERR_CANNOT_READ_BODY";

/// Main error type for reqbind operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The record to bind is an absent optional value.
    #[display("data cannot be nil")]
    #[from(skip)]
    NilRecord,

    /// The record to bind is not a struct.
    #[display("input data must be a structured aggregate, got {kind}")]
    #[from(skip)]
    NotAggregate {
        /// Kind of the value that was supplied.
        #[error(not(source))]
        kind: Kind,
    },

    /// A `#[bind(flatten)]` field holds something other than a struct.
    #[display("anonymous field must be a structured aggregate: '{field}' is {kind}")]
    #[from(skip)]
    EmbeddedNotAggregate {
        /// Rust field name of the embedded field.
        field: &'static str,
        /// Kind of the value found in the field.
        #[error(not(source))]
        kind: Kind,
    },

    /// A field of an unsupported kind is tagged as a path parameter.
    #[display("field type can't be bound as an url parameter: '{key}' is {kind}")]
    #[from(skip)]
    UnsupportedPathField {
        /// Destination key of the field.
        key: String,
        /// Kind of the rejected value.
        #[error(not(source))]
        kind: Kind,
    },

    /// A field of an unsupported kind is tagged as a query parameter.
    #[display("field type can't be bound as a query parameter: '{key}' is {kind}")]
    #[from(skip)]
    UnsupportedQueryField {
        /// Destination key of the field.
        key: String,
        /// Kind of the rejected value.
        #[error(not(source))]
        kind: Kind,
    },

    /// JSON body serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    BodySerialization(serde_json::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Inbound request declares a content type other than JSON.
    #[display("only 'application/json' content type allowed, got: '{content_type}'")]
    #[from(skip)]
    JsonContentType {
        /// The declared content type (empty when the header is missing).
        #[error(not(source))]
        content_type: String,
    },

    /// Inbound request declares a content type but carries no body.
    #[display("empty body: content type header only allowed with body")]
    #[from(skip)]
    ContentTypeWithoutBody,

    /// Inbound request body could not be read.
    #[display("cannot read body: {_0}")]
    #[from(skip)]
    CannotReadBody(#[error(not(source))] String),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an error for a non-JSON content type.
    #[must_use]
    pub fn json_content_type(content_type: impl Into<String>) -> Self {
        Self::JsonContentType {
            content_type: content_type.into(),
        }
    }

    /// Create an error for an unreadable inbound body.
    #[must_use]
    pub fn cannot_read_body(message: impl Into<String>) -> Self {
        Self::CannotReadBody(message.into())
    }

    /// Machine-readable error code, for errors that carry one.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::JsonContentType { .. } => Some(ERR_ONLY_JSON_CONTENT_TYPE_ALLOWED),
            Self::ContentTypeWithoutBody => Some(ERR_CONTENT_TYPE_WITHOUT_BODY),
            Self::CannotReadBody(_) => Some(ERR_CANNOT_READ_BODY),
            _ => None,
        }
    }

    /// Suggested HTTP status for the error.
    ///
    /// Binding errors have no fixed status; mapping them is left to the caller.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::JsonContentType { .. } | Self::ContentTypeWithoutBody => {
                Some(StatusCode::BAD_REQUEST)
            }
            Self::CannotReadBody(_) => Some(StatusCode::INTERNAL_SERVER_ERROR),
            _ => None,
        }
    }

    /// Returns `true` if the error was raised while classifying record fields.
    #[must_use]
    pub const fn is_classification(&self) -> bool {
        matches!(
            self,
            Self::NilRecord
                | Self::NotAggregate { .. }
                | Self::EmbeddedNotAggregate { .. }
                | Self::UnsupportedPathField { .. }
                | Self::UnsupportedQueryField { .. }
        )
    }

    /// Returns `true` if the suggested status is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_client_error())
    }

    /// Returns `true` if the suggested status is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_server_error())
    }
}
