//! Attribute parsing for `#[bind(...)]`.

use syn::{Attribute, LitStr};

const BIND: &str = "bind";
const SKIP_MARKER: &str = "-";
const OMIT_EMPTY: &str = "omitempty";

/// Field options parsed from every `#[bind(...)]` attribute of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindFieldOptions {
    /// Raw `param` tag, kept verbatim for runtime parsing.
    pub param: Option<String>,
    /// Raw `query` tag, kept verbatim for runtime parsing.
    pub query: Option<String>,
    /// Parsed `body` tag.
    pub body: Option<BodyTag>,
    /// `#[bind(flatten)]`
    pub flatten: bool,
}

impl BindFieldOptions {
    /// Returns `true` if the field takes part in path or query binding.
    pub const fn is_described(&self) -> bool {
        self.flatten || self.param.is_some() || self.query.is_some()
    }
}

/// A `body` tag resolved at expansion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyTag {
    /// Excluded from the body (empty key or `-`).
    Skip,
    /// Emitted under a JSON key.
    Key {
        /// JSON object key.
        name: String,
        /// Skip zero values.
        omit_empty: bool,
    },
}

impl BodyTag {
    fn parse(raw: &str) -> Self {
        let mut segments = raw.split(',');
        let key = segments.next().unwrap_or_default();
        if key.is_empty() || key == SKIP_MARKER {
            return Self::Skip;
        }

        Self::Key {
            name: key.to_string(),
            omit_empty: segments.any(|option| option == OMIT_EMPTY),
        }
    }
}

/// Parse the `#[bind(...)]` attributes of a field.
///
/// Supported forms, combinable in one list or repeated:
/// `param = "..."`, `query = "..."`, `body = "..."` and `flatten`.
pub fn parse_bind_field_options(attrs: &[Attribute]) -> syn::Result<BindFieldOptions> {
    let mut options = BindFieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident(BIND) {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("param") {
                let value: LitStr = meta.value()?.parse()?;
                set_once(&mut options.param, value.value(), &meta, "param")
            } else if meta.path.is_ident("query") {
                let value: LitStr = meta.value()?.parse()?;
                set_once(&mut options.query, value.value(), &meta, "query")
            } else if meta.path.is_ident("body") {
                let value: LitStr = meta.value()?.parse()?;
                set_once(&mut options.body, BodyTag::parse(&value.value()), &meta, "body")
            } else if meta.path.is_ident("flatten") {
                options.flatten = true;
                Ok(())
            } else {
                Err(meta.error(
                    "unknown bind attribute, expected one of: param, query, body, flatten",
                ))
            }
        })?;
    }

    Ok(options)
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    meta: &syn::meta::ParseNestedMeta<'_>,
    name: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `{name}` attribute")));
    }
    *slot = Some(value);
    Ok(())
}
