//! Emitter configuration.

/// Options for the Rust emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustOptions {
    runtime_path: String,
    banner: bool,
    docs: bool,
}

impl RustOptions {
    /// Creates options with the default runtime path `::ironidl_core`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runtime_path: "::ironidl_core".to_string(),
            banner: true,
            docs: true,
        }
    }

    /// Sets the path generated code imports the runtime from.
    #[must_use]
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Enables or disables the "generated, do not edit" banner.
    #[must_use]
    pub fn banner(mut self, enabled: bool) -> Self {
        self.banner = enabled;
        self
    }

    /// Enables or disables doc comments on generated items.
    #[must_use]
    pub fn docs(mut self, enabled: bool) -> Self {
        self.docs = enabled;
        self
    }

    /// Returns the runtime import path.
    #[must_use]
    pub fn get_runtime_path(&self) -> &str {
        &self.runtime_path
    }

    /// Returns true if units start with a banner comment.
    #[must_use]
    pub fn has_banner(&self) -> bool {
        self.banner
    }

    /// Returns true if generated items carry doc comments.
    #[must_use]
    pub fn has_docs(&self) -> bool {
        self.docs
    }
}

impl Default for RustOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for the XSD emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XsdOptions {
    indent: usize,
}

impl XsdOptions {
    /// Creates options with two-space indentation.
    #[must_use]
    pub fn new() -> Self {
        Self { indent: 2 }
    }

    /// Sets the indentation width.
    #[must_use]
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = width;
        self
    }

    /// Returns the indentation width.
    #[must_use]
    pub fn get_indent(&self) -> usize {
        self.indent
    }
}

impl Default for XsdOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_options_builder() {
        let options = RustOptions::new()
            .runtime_path("crate::runtime")
            .banner(false)
            .docs(false);
        assert_eq!(options.get_runtime_path(), "crate::runtime");
        assert!(!options.has_banner());
        assert!(!options.has_docs());
    }

    #[test]
    fn test_rust_options_default() {
        let options = RustOptions::default();
        assert_eq!(options.get_runtime_path(), "::ironidl_core");
        assert!(options.has_banner());
    }

    #[test]
    fn test_xsd_options() {
        assert_eq!(XsdOptions::default().get_indent(), 2);
        assert_eq!(XsdOptions::new().indent(4).get_indent(), 4);
    }
}
