//! Record descriptors for runtime binding.
//!
//! A record exposes a static table of [`FieldDescriptor`]s plus the matching
//! field values. Both are normally generated by `#[derive(Bind)]`.

use std::fmt;

use crate::FieldValue;

/// Destination of a field in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Path placeholder (e.g., `/users/:id`)
    Path,
    /// Query parameter (e.g., `?limit=10`)
    Query,
    /// JSON request body
    Body,
}

impl Destination {
    /// Name of the tag that targets this destination.
    #[must_use]
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Path => "param",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Query => write!(f, "query"),
            Self::Body => write!(f, "body"),
        }
    }
}

/// Static description of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDescriptor {
    /// A regular field with its raw destination tags.
    Named {
        /// The field name as declared in the struct.
        name: &'static str,
        /// Raw `param` tag (e.g., `"user_id"`).
        param: Option<&'static str>,
        /// Raw `query` tag (e.g., `"page,omitempty"`).
        query: Option<&'static str>,
    },
    /// An embedded substructure whose fields are hoisted into the parent.
    Embedded {
        /// The field name as declared in the struct.
        name: &'static str,
    },
}

impl FieldDescriptor {
    /// Describe a regular field.
    #[must_use]
    pub const fn named(
        name: &'static str,
        param: Option<&'static str>,
        query: Option<&'static str>,
    ) -> Self {
        Self::Named { name, param, query }
    }

    /// Describe an embedded field.
    #[must_use]
    pub const fn embedded(name: &'static str) -> Self {
        Self::Embedded { name }
    }

    /// The declared field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Named { name, .. } | Self::Embedded { name } => *name,
        }
    }

    /// The raw tag for a destination.
    ///
    /// Embedded fields carry no path or query tag, and body tags are consumed
    /// by the generated serializer rather than the classifier.
    #[must_use]
    pub const fn tag(&self, destination: Destination) -> Option<&'static str> {
        match (self, destination) {
            (Self::Named { param, .. }, Destination::Path) => *param,
            (Self::Named { query, .. }, Destination::Query) => *query,
            _ => None,
        }
    }

    /// Returns `true` for embedded fields.
    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded { .. })
    }
}

/// A struct that can be bound to a request.
///
/// Implemented by `#[derive(Bind)]`. `field_values` must return exactly one
/// value per descriptor, in the same order as `fields`.
///
/// # Example
///
/// ```
/// use reqbind_core::{AsFieldValue, FieldDescriptor, FieldValue, Record};
///
/// struct GetUser {
///     id: u64,
/// }
///
/// impl Record for GetUser {
///     fn fields(&self) -> &'static [FieldDescriptor] {
///         const FIELDS: &[FieldDescriptor] = &[FieldDescriptor::named("id", Some("id"), None)];
///         FIELDS
///     }
///
///     fn field_values(&self) -> Vec<FieldValue<'_>> {
///         vec![self.id.as_field_value()]
///     }
/// }
///
/// let request = GetUser { id: 42 };
/// assert_eq!(request.fields().len(), request.field_values().len());
/// ```
pub trait Record {
    /// Descriptors of the fields taking part in path or query binding.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Current values of the described fields.
    fn field_values(&self) -> Vec<FieldValue<'_>>;
}

/// Writes the body-tagged fields of a record into a JSON object.
///
/// Implemented by `#[derive(Bind)]`, which also implements
/// [`serde::Serialize`] on top of it as a struct of
/// [`body_field_count`](Self::body_field_count) fields. Embedded records are
/// inlined by calling their own implementation with the parent's struct
/// serializer.
pub trait BodyFields {
    /// Number of fields [`serialize_body_fields`](Self::serialize_body_fields)
    /// writes for the current values.
    fn body_field_count(&self) -> usize;

    /// Serialize every body-tagged field.
    fn serialize_body_fields<S>(&self, body: &mut S) -> Result<(), S::Error>
    where
        S: serde::ser::SerializeStruct;
}

impl<T: BodyFields + ?Sized> BodyFields for &T {
    fn body_field_count(&self) -> usize {
        (**self).body_field_count()
    }

    fn serialize_body_fields<S>(&self, body: &mut S) -> Result<(), S::Error>
    where
        S: serde::ser::SerializeStruct,
    {
        (**self).serialize_body_fields(body)
    }
}

impl<T: BodyFields + ?Sized> BodyFields for Box<T> {
    fn body_field_count(&self) -> usize {
        (**self).body_field_count()
    }

    fn serialize_body_fields<S>(&self, body: &mut S) -> Result<(), S::Error>
    where
        S: serde::ser::SerializeStruct,
    {
        (**self).serialize_body_fields(body)
    }
}

impl<T: BodyFields> BodyFields for Option<T> {
    fn body_field_count(&self) -> usize {
        self.as_ref().map_or(0, BodyFields::body_field_count)
    }

    fn serialize_body_fields<S>(&self, body: &mut S) -> Result<(), S::Error>
    where
        S: serde::ser::SerializeStruct,
    {
        match self {
            Some(inner) => inner.serialize_body_fields(body),
            None => Ok(()),
        }
    }
}
