//! Path placeholder substitution.

use crate::{Bindings, Error, FieldValue, Kind, Result, Tag};

/// Sigil introducing a placeholder in a path template (e.g., `/users/:id`).
pub const PLACEHOLDER_SIGIL: char = ':';

/// Admission rule for path parameters.
///
/// Path segments must be atomic: collections, maps, dynamic values and a
/// second level of optionality are rejected. Tag options are ignored.
///
/// # Errors
///
/// Returns [`Error::UnsupportedPathField`] for inadmissible kinds.
pub fn admit_path(value: &FieldValue<'_>, tag: &Tag<'_>) -> Result<bool> {
    match value.kind() {
        kind @ (Kind::Sequence | Kind::Map | Kind::Dynamic | Kind::Optional) => {
            Err(Error::UnsupportedPathField {
                key: tag.key().to_string(),
                kind,
            })
        }
        _ => Ok(true),
    }
}

/// Substitute every bound placeholder of `template`.
///
/// A placeholder is the sigil followed by the key and a word boundary, so
/// `:id` does not match the start of `:id2`. Placeholders without a binding
/// are left verbatim. The template is scanned once: substituted values are
/// never searched for placeholders themselves.
///
/// # Example
///
/// ```
/// use reqbind_core::{AsFieldValue, Bindings, project_path};
///
/// let mut bindings = Bindings::new();
/// bindings.insert("id", 42_u32.as_field_value());
///
/// assert_eq!(project_path("/users/:id/posts/:post", &bindings), "/users/42/posts/:post");
/// ```
#[must_use]
pub fn project_path(template: &str, bindings: &Bindings<'_>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(PLACEHOLDER_SIGIL) {
        let (before, from_sigil) = rest.split_at(start);
        result.push_str(before);

        let after_sigil = from_sigil
            .strip_prefix(PLACEHOLDER_SIGIL)
            .unwrap_or(from_sigil);

        if let Some((value, tail)) = bound_placeholder(after_sigil, bindings) {
            result.push_str(&value.to_string());
            rest = tail;
        } else {
            result.push(PLACEHOLDER_SIGIL);
            rest = after_sigil;
        }
    }

    result.push_str(rest);
    result
}

/// The longest bound key starting `text` at a word boundary, with its value
/// and the text following it.
fn bound_placeholder<'t, 'b, 'a>(
    text: &'t str,
    bindings: &'b Bindings<'a>,
) -> Option<(&'b FieldValue<'a>, &'t str)> {
    bindings
        .iter()
        .filter_map(|(key, value)| {
            text.strip_prefix(*key)
                .filter(|tail| !tail.starts_with(is_word_char))
                .map(|tail| (key.len(), value, tail))
        })
        .max_by_key(|(len, _, _)| *len)
        .map(|(_, value, tail)| (value, tail))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
