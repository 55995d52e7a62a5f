//! Bind annotated structs to HTTP requests.
//!
//! `#[derive(Bind)]` describes where each field of a struct goes: a path
//! placeholder, a query parameter or a key of the JSON body. [`bind`] then
//! writes a value of that struct into a [`Request`].
//!
//! The [`middleware`] module provides the inbound counterpart: a tower layer
//! that only lets JSON bodies through.
//!
//! # Example
//!
//! ```
//! use reqbind::prelude::*;
//!
//! #[derive(Bind)]
//! struct CreateComment {
//!     #[bind(param = "post_id")]
//!     post_id: u64,
//!     #[bind(query = "notify,omitempty")]
//!     notify: bool,
//!     #[bind(body = "text")]
//!     text: String,
//! }
//!
//! let request = Request::builder()
//!     .path("/posts/:post_id/comments")
//!     .bind(&CreateComment {
//!         post_id: 7,
//!         notify: false,
//!         text: "first".to_string(),
//!     })?
//!     .build();
//!
//! assert_eq!(request.path(), "/posts/7/comments");
//! assert_eq!(request.query(), "");
//! assert_eq!(request.method(), Method::Post);
//! assert_eq!(request.body().map(|body| body.to_vec()), Some(br#"{"text":"first"}"#.to_vec()));
//! # Ok::<(), reqbind::Error>(())
//! ```

mod config;
pub mod middleware;
pub mod prelude;

pub use config::{GuardConfig, GuardConfigBuilder};

// Re-export core types
pub use reqbind_core::{
    APPLICATION_JSON, Admit, AsFieldValue, Bindings, BodyFields, CONTENT_TYPE, Destination,
    ERR_CANNOT_READ_BODY, ERR_CONTENT_TYPE_WITHOUT_BODY, ERR_ONLY_JSON_CONTENT_TYPE_ALLOWED, Error,
    FieldDescriptor, FieldValue, JsonBody, Kind, Method, OMIT_EMPTY, PLACEHOLDER_SIGIL, Record,
    Request, RequestBuilder, Result, SKIP_MARKER, Tag, admit_path, admit_query, bind, classify,
    project_body, project_path, project_query,
};

// Re-export crates for macro-generated code and transport integration
pub use http;
pub use serde;
pub use serde_json;
pub use tower;
pub use url;

// Re-export macros
pub use reqbind_macro::Bind;
