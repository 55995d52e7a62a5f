//! JSON body projection.

use bytes::Bytes;

use crate::Result;
use crate::sorted::SortedKeys;

/// Content type of every projected body.
pub const APPLICATION_JSON: &str = "application/json";

/// Serialized JSON object ready to be attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBody {
    bytes: Bytes,
}

impl JsonBody {
    /// The MIME type of the body.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        APPLICATION_JSON
    }

    /// Exact length of the body in bytes.
    #[must_use]
    pub fn content_length(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// The serialized bytes.
    #[must_use]
    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Consume into the serialized bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

const EMPTY_OBJECT: &[u8] = b"{}";

/// Serialize the body-tagged fields of a record.
///
/// Map entries are written sorted by key, at any depth; struct fields keep
/// their declaration order. Returns `Ok(None)` when nothing would be written,
/// i.e. the record serializes to an empty JSON object.
///
/// # Errors
///
/// Returns [`crate::Error::BodySerialization`] if serialization fails.
///
/// # Example
///
/// ```
/// use reqbind_core::project_body;
///
/// let body = project_body(&serde_json::json!({"name": "Alice"}))
///     .expect("serialize")
///     .expect("non empty");
/// assert_eq!(body.bytes().as_ref(), br#"{"name":"Alice"}"#);
/// assert_eq!(body.content_length(), 16);
///
/// assert!(project_body(&serde_json::json!({})).expect("serialize").is_none());
/// ```
pub fn project_body<T>(record: &T) -> Result<Option<JsonBody>>
where
    T: serde::Serialize + ?Sized,
{
    let bytes = serde_json::to_vec(&SortedKeys(record))?;
    if bytes == EMPTY_OBJECT {
        return Ok(None);
    }

    Ok(Some(JsonBody {
        bytes: Bytes::from(bytes),
    }))
}
