//! Pipeline configuration
//!
//! The two switches that gate a run are plain fields passed into the
//! aggregator. They can be loaded from a TOML file and overridden from the
//! environment:
//!
//! ```toml
//! examples-enabled = true
//! aggregation-enabled = true
//! code-language = "clojure"
//! uncategorized-label = "Other functions"
//! ```

use crate::diagnostics::{MetadocError, MetadocResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`MetadocConfig::examples_enabled`]
pub const EXAMPLES_ENV: &str = "METADOC_EXAMPLES";

/// Environment variable overriding [`MetadocConfig::aggregation_enabled`]
pub const ALTER_DOCS_ENV: &str = "METADOC_ALTER_DOCS";

/// Configuration for a documentation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MetadocConfig {
    /// Render stored examples; when false they are ignored entirely
    pub examples_enabled: bool,
    /// Run aggregation at all; when false a run is a no-op
    pub aggregation_enabled: bool,
    /// Language tag of fenced code blocks
    pub code_language: String,
    /// Label shown for symbols without a category
    pub uncategorized_label: String,
}

impl Default for MetadocConfig {
    fn default() -> Self {
        Self {
            examples_enabled: true,
            aggregation_enabled: true,
            code_language: "clojure".to_string(),
            uncategorized_label: "Other functions".to_string(),
        }
    }
}

impl MetadocConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable example rendering
    pub fn with_examples(mut self, enabled: bool) -> Self {
        self.examples_enabled = enabled;
        self
    }

    /// Enable or disable aggregation
    pub fn with_aggregation(mut self, enabled: bool) -> Self {
        self.aggregation_enabled = enabled;
        self
    }

    /// Set the code block language tag
    pub fn with_code_language(mut self, language: impl Into<String>) -> Self {
        self.code_language = language.into();
        self
    }

    /// Set the label of the uncategorized group
    pub fn with_uncategorized_label(mut self, label: impl Into<String>) -> Self {
        self.uncategorized_label = label.into();
        self
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> MetadocResult<Self> {
        Self::parse(content, Path::new("<inline>"))
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> MetadocResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, origin: &Path) -> MetadocResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| MetadocError::config_parse(origin, e.message()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values
    pub fn validate(&self) -> MetadocResult<()> {
        if self.code_language.trim().is_empty() {
            return Err(MetadocError::config("code-language must not be empty"));
        }
        if self.uncategorized_label.trim().is_empty() {
            return Err(MetadocError::config("uncategorized-label must not be empty"));
        }
        Ok(())
    }

    /// Apply `METADOC_EXAMPLES` / `METADOC_ALTER_DOCS` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply flag overrides from an arbitrary variable lookup
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup(EXAMPLES_ENV) {
            self.examples_enabled = parse_flag(&val);
        }
        if let Some(val) = lookup(ALTER_DOCS_ENV) {
            self.aggregation_enabled = parse_flag(&val);
        }
        self
    }
}

/// Interpret a flag value.
///
/// `"0"`, `"false"`, `"no"` and `"off"` are false; anything else is true.
pub fn parse_flag(val: &str) -> bool {
    let val = val.trim();
    !(val == "0"
        || val.eq_ignore_ascii_case("false")
        || val.eq_ignore_ascii_case("no")
        || val.eq_ignore_ascii_case("off"))
}
