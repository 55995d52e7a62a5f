//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and macros for easy
//! glob importing:
//!
//! ```
//! use reqbind::prelude::*;
//! ```

pub use crate::{
    AsFieldValue, Bind, Error, GuardConfig, JsonBody, Method, Request, RequestBuilder, Result,
    bind,
};
pub use crate::middleware::ContentTypeGuardLayer;
