//! Prelude module for convenient imports.
//!
//! ```
//! use reqbind_core::prelude::*;
//! ```

pub use crate::{
    AsFieldValue, BodyFields, Error, FieldDescriptor, FieldValue, JsonBody, Method, Record,
    Request, RequestBuilder, Result, bind,
};
