//! Destination tag parsing.
//!
//! A tag value is a comma-separated list: the first segment is the
//! destination key, the remaining segments are options.

/// Marker that excludes a field from a destination.
pub const SKIP_MARKER: &str = "-";

/// Option dropping zero-valued query fields.
pub const OMIT_EMPTY: &str = "omitempty";

/// A parsed destination tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'t> {
    key: &'t str,
    options: Vec<&'t str>,
}

impl<'t> Tag<'t> {
    /// Parse a raw tag value.
    ///
    /// Returns `None` when the field is not bound to the destination: empty
    /// key or the [`SKIP_MARKER`].
    ///
    /// # Example
    ///
    /// ```
    /// use reqbind_core::Tag;
    ///
    /// let tag = Tag::parse("page,omitempty").expect("bound");
    /// assert_eq!(tag.key(), "page");
    /// assert!(tag.omit_empty());
    ///
    /// assert!(Tag::parse("-").is_none());
    /// assert!(Tag::parse(",omitempty").is_none());
    /// ```
    #[must_use]
    pub fn parse(raw: &'t str) -> Option<Self> {
        let mut segments = raw.split(',');
        let key = segments.next().unwrap_or_default();
        if key.is_empty() || key == SKIP_MARKER {
            return None;
        }

        Some(Self {
            key,
            options: segments.collect(),
        })
    }

    /// The destination key.
    #[must_use]
    pub const fn key(&self) -> &'t str {
        self.key
    }

    /// The options following the key, in declaration order.
    #[must_use]
    pub fn options(&self) -> &[&'t str] {
        &self.options
    }

    /// Returns `true` if the option is present.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains(&option)
    }

    /// Returns `true` if the `omitempty` option is present.
    #[must_use]
    pub fn omit_empty(&self) -> bool {
        self.has_option(OMIT_EMPTY)
    }
}
