//! Query string projection.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::{Bindings, Error, FieldValue, Result, Tag};

/// Admission rule for query parameters.
///
/// Structs, maps, dynamic values and a second level of optionality are
/// rejected. Collections are admitted when every element is a scalar or an
/// optional scalar. With `omitempty`, zero values are dropped silently.
///
/// # Errors
///
/// Returns [`Error::UnsupportedQueryField`] for inadmissible kinds.
pub fn admit_query(value: &FieldValue<'_>, tag: &Tag<'_>) -> Result<bool> {
    let unsupported = |kind| Error::UnsupportedQueryField {
        key: tag.key().to_string(),
        kind,
    };

    match value {
        FieldValue::Seq(items) => {
            if let Some(item) = items.iter().find(|item| !is_query_element(item)) {
                return Err(unsupported(item.kind()));
            }
        }
        other if !other.kind().is_scalar() => return Err(unsupported(other.kind())),
        _ => {}
    }

    Ok(!(tag.omit_empty() && value.is_empty_value()))
}

fn is_query_element(item: &FieldValue<'_>) -> bool {
    match item {
        FieldValue::Optional(Some(inner)) => inner.kind().is_scalar(),
        FieldValue::Optional(None) => true,
        other => other.kind().is_scalar(),
    }
}

/// Merge bindings into an existing raw query string.
///
/// Scalar bindings replace any existing value of their key, collection
/// bindings append one pair per element, in element order. The result is
/// re-encoded with keys sorted. Without bindings the existing query is
/// returned as is.
///
/// # Example
///
/// ```
/// use reqbind_core::{AsFieldValue, Bindings, project_query};
///
/// let tags = vec!["b", "a"];
/// let mut bindings = Bindings::new();
/// bindings.insert("tag", tags.as_field_value());
/// bindings.insert("page", 2_u32.as_field_value());
///
/// assert_eq!(project_query("page=1&q=rust", &bindings), "page=2&q=rust&tag=b&tag=a");
/// ```
#[must_use]
pub fn project_query(existing: &str, bindings: &Bindings<'_>) -> String {
    if bindings.is_empty() {
        return existing.to_string();
    }

    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in form_urlencoded::parse(existing.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    for (key, value) in bindings {
        match value {
            FieldValue::Seq(items) => {
                let values = params.entry((*key).to_string()).or_default();
                values.extend(
                    items
                        .iter()
                        .filter_map(|item| item.clone().deref_optional())
                        .map(|item| item.to_string()),
                );
            }
            scalar => {
                params.insert((*key).to_string(), vec![scalar.to_string()]);
            }
        }
    }

    encode(&params)
}

fn encode(params: &BTreeMap<String, Vec<String>>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in params {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}
