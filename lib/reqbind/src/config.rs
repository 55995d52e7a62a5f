//! Guard configuration types.

/// Configuration of the [`ContentTypeGuardLayer`](crate::middleware::ContentTypeGuardLayer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardConfig {
    /// Buffer bodies of unknown length to find out whether they are empty.
    ///
    /// Disabled by default: a body without `Content-Length` then counts as
    /// present and must be declared as JSON.
    pub read_body: bool,
}

impl GuardConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> GuardConfigBuilder {
        GuardConfigBuilder::default()
    }
}

/// Builder for [`GuardConfig`].
#[derive(Debug, Clone, Default)]
pub struct GuardConfigBuilder {
    read_body: Option<bool>,
}

impl GuardConfigBuilder {
    /// Set whether bodies of unknown length are buffered.
    #[must_use]
    pub const fn read_body(mut self, read_body: bool) -> Self {
        self.read_body = Some(read_body);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> GuardConfig {
        let defaults = GuardConfig::default();
        GuardConfig {
            read_body: self.read_body.unwrap_or(defaults.read_body),
        }
    }
}
