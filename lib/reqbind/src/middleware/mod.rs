//! Tower middleware for inbound requests.
//!
//! # Available Layers
//!
//! - [`ContentTypeGuardLayer`] - Accepts only JSON request bodies and rejects
//!   a `Content-Type` header on requests without body
//!
//! # Example
//!
//! ```ignore
//! use reqbind::GuardConfig;
//! use reqbind::middleware::{ContentTypeGuardLayer, ServiceBuilder};
//!
//! let service = ServiceBuilder::new()
//!     .layer(ContentTypeGuardLayer::new(GuardConfig::builder().read_body(true).build()))
//!     .service(handler);
//! ```

mod content_type;

pub use content_type::{ContentTypeGuard, ContentTypeGuardLayer, GuardFuture};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
