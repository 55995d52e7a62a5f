//! Core of reqbind: binds the fields of a struct into an outgoing request.
//!
//! This crate provides:
//! - [`Record`], [`FieldDescriptor`] and [`FieldValue`] - the compile-time
//!   field model generated by `#[derive(Bind)]`
//! - [`classify`] - collects the fields tagged for a [`Destination`]
//! - [`project_path`], [`project_query`] and [`project_body`] - write those
//!   fields into the path template, the query string and a JSON body
//! - [`bind`] - the whole pipeline against a [`Request`]
//! - [`Error`] and [`Result`] - error handling, including the errors of the
//!   inbound content-type guard

mod body;
mod classify;
mod error;
mod method;
mod path;
mod pipeline;
pub mod prelude;
mod query;
mod record;
mod request;
mod sorted;
mod tag;
mod value;

pub use body::{APPLICATION_JSON, JsonBody, project_body};
pub use classify::{Admit, Bindings, classify};
pub use error::{
    ERR_CANNOT_READ_BODY, ERR_CONTENT_TYPE_WITHOUT_BODY, ERR_ONLY_JSON_CONTENT_TYPE_ALLOWED, Error,
    Result,
};
pub use method::Method;
pub use path::{PLACEHOLDER_SIGIL, admit_path, project_path};
pub use pipeline::bind;
pub use query::{admit_query, project_query};
pub use record::{BodyFields, Destination, FieldDescriptor, Record};
pub use request::{CONTENT_TYPE, Request, RequestBuilder};
pub use tag::{OMIT_EMPTY, SKIP_MARKER, Tag};
pub use value::{AsFieldValue, FieldValue, Kind};
