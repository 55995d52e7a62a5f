//! Procedural macros for reqbind.
//!
//! This crate provides `#[derive(Bind)]`, which describes a struct's fields
//! to the reqbind binding pipeline. Use it through the `reqbind` crate.

mod attrs;
mod bind_derive;

use proc_macro::TokenStream;

/// Derive the binding of a struct into a request.
///
/// Generates `reqbind::Record`, `reqbind::AsFieldValue`,
/// `reqbind::BodyFields` and a `serde::Serialize` implementation that writes
/// the body-tagged fields as a JSON object. Do not combine it with
/// `#[derive(Serialize)]`.
///
/// # Field Attributes
///
/// - `#[bind(param = "key")]` - Substitute `:key` in the path template
/// - `#[bind(query = "key")]` - Add a query parameter, repeated for
///   collections; `"key,omitempty"` skips zero values
/// - `#[bind(body = "key")]` - Emit the field under `key` in the JSON body;
///   `Option` fields are skipped when `None`, `"key,omitempty"` also skips
///   zero values
/// - `#[bind(flatten)]` - Hoist the fields of an embedded `Bind` struct into
///   this one; combined with `body = "key"`, the body nests it under `key`
///
/// A `-` or empty key excludes the field from that destination. Fields tagged
/// for the path or the query, and flattened fields, must implement
/// `reqbind::AsFieldValue`; body fields must implement `serde::Serialize`.
///
/// # Example
///
/// ```ignore
/// use reqbind::Bind;
///
/// #[derive(Bind)]
/// struct UpdateUser {
///     #[bind(param = "id")]
///     id: u64,
///     #[bind(query = "notify,omitempty")]
///     notify: bool,
///     #[bind(body = "name")]
///     name: Option<String>,
/// }
/// ```
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    bind_derive::expand_bind_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
