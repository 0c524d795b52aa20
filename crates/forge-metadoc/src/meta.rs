//! Symbol metadata store
//!
//! Holds the per-symbol annotations the pipeline reads and the `doc` text
//! buffers it appends to. Doc buffers are append-only: nothing in this
//! crate replaces or trims existing text.

use crate::diagnostics::{MetadocError, MetadocResult};
use crate::example::Example;
use crate::form::Form;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Append-only access to documentation text of a namespace
pub trait MetadataStore {
    /// Current doc text of a symbol
    fn get_doc(&self, symbol: &str) -> MetadocResult<&str>;

    /// Append text to a symbol's doc
    fn append_doc(&mut self, symbol: &str, text: &str) -> MetadocResult<()>;

    /// Names of all symbols, in iteration order
    fn symbol_names(&self) -> Vec<String>;

    /// Doc text of the namespace itself
    fn namespace_doc(&self) -> &str;

    /// Append text to the namespace doc
    fn append_namespace_doc(&mut self, text: &str);
}

/// Metadata for one symbol
#[derive(Debug, Clone, Default)]
pub struct SymbolMeta {
    /// Symbol name
    pub name: String,
    /// Documentation text, grows by appending
    pub doc: String,
    /// Examples in definition order
    pub examples: Vec<Example>,
    /// Literal value of a constant
    pub const_value: Option<Form>,
    /// Declared type tag
    pub type_tag: Option<String>,
    /// Declared category keys
    pub categories: BTreeSet<String>,
    /// Private symbols are not documented
    pub private: bool,
}

impl SymbolMeta {
    /// Create empty metadata for `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append `example`; earlier examples are kept
    pub fn push_example(&mut self, example: Example) {
        self.examples.push(example);
    }

    /// Whether the symbol carries constant or type information
    pub fn has_additional_info(&self) -> bool {
        self.const_value.is_some() || self.type_tag.is_some()
    }
}

/// A namespace and the live metadata of its symbols
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    /// Namespace name
    pub name: String,
    /// Namespace documentation text
    pub doc: String,
    /// Symbols in definition order
    pub symbols: IndexMap<String, SymbolMeta>,
    /// Display labels for category keys
    pub category_labels: IndexMap<String, String>,
    /// Short type names and what they resolve to
    pub type_aliases: IndexMap<String, String>,
}

impl Namespace {
    /// Create an empty namespace
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the namespace doc
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Register a display label for a category key
    pub fn with_category_label(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.category_labels.insert(key.into(), label.into());
        self
    }

    /// Register how a short type tag resolves
    pub fn with_type_alias(mut self, tag: impl Into<String>, resolved: impl Into<String>) -> Self {
        self.type_aliases.insert(tag.into(), resolved.into());
        self
    }

    /// Get or create the metadata of `name`
    pub fn symbol_mut(&mut self, name: &str) -> &mut SymbolMeta {
        self.symbols
            .entry(name.to_string())
            .or_insert_with(|| SymbolMeta::new(name))
    }

    /// Look up a symbol
    pub fn symbol(&self, name: &str) -> Option<&SymbolMeta> {
        self.symbols.get(name)
    }

    /// Public symbols, in definition order
    pub fn publics(&self) -> impl Iterator<Item = &SymbolMeta> {
        self.symbols.values().filter(|s| !s.private)
    }

    /// Resolve a type tag through the alias table
    pub fn resolve_type<'a>(&'a self, tag: &'a str) -> &'a str {
        self.type_aliases.get(tag).map(String::as_str).unwrap_or(tag)
    }

    /// Display label of a category key
    pub fn category_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.category_labels
            .get(key)
            .map(String::as_str)
            .unwrap_or(key)
    }

    fn existing_mut(&mut self, symbol: &str) -> MetadocResult<&mut SymbolMeta> {
        self.symbols
            .get_mut(symbol)
            .ok_or_else(|| MetadocError::SymbolNotFound(format!("{}/{}", self.name, symbol)))
    }
}

impl MetadataStore for Namespace {
    fn get_doc(&self, symbol: &str) -> MetadocResult<&str> {
        self.symbols
            .get(symbol)
            .map(|s| s.doc.as_str())
            .ok_or_else(|| MetadocError::SymbolNotFound(format!("{}/{}", self.name, symbol)))
    }

    fn append_doc(&mut self, symbol: &str, text: &str) -> MetadocResult<()> {
        self.existing_mut(symbol)?.doc.push_str(text);
        Ok(())
    }

    fn symbol_names(&self) -> Vec<String> {
        self.symbols.keys().cloned().collect()
    }

    fn namespace_doc(&self) -> &str {
        &self.doc
    }

    fn append_namespace_doc(&mut self, text: &str) {
        self.doc.push_str(text);
    }
}

/// All namespaces known to a documentation run
#[derive(Debug, Clone, Default)]
pub struct Registry {
    namespaces: IndexMap<String, Namespace>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace, replacing one with the same name
    pub fn insert(&mut self, namespace: Namespace) {
        self.namespaces.insert(namespace.name.clone(), namespace);
    }

    /// Get or create a namespace
    pub fn namespace_mut(&mut self, name: &str) -> &mut Namespace {
        self.namespaces
            .entry(name.to_string())
            .or_insert_with(|| Namespace::new(name))
    }

    /// Look up a namespace
    pub fn get(&self, name: &str) -> MetadocResult<&Namespace> {
        self.namespaces
            .get(name)
            .ok_or_else(|| MetadocError::NamespaceNotFound(name.to_string()))
    }

    /// Look up a namespace for mutation
    pub fn get_mut(&mut self, name: &str) -> MetadocResult<&mut Namespace> {
        self.namespaces
            .get_mut(name)
            .ok_or_else(|| MetadocError::NamespaceNotFound(name.to_string()))
    }

    /// Iterate namespaces in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }

    /// Iterate namespaces mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Namespace> {
        self.namespaces.values_mut()
    }

    /// Number of namespaces
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_doc_never_replaces() {
        let mut ns = Namespace::new("demo");
        ns.symbol_mut("f").doc = "Original.".to_string();

        ns.append_doc("f", " More.").unwrap();
        ns.append_doc("f", " Again.").unwrap();

        assert_eq!(ns.get_doc("f").unwrap(), "Original. More. Again.");
    }

    #[test]
    fn test_append_to_missing_symbol() {
        let mut ns = Namespace::new("demo");
        let err = ns.append_doc("missing", "x").unwrap_err();
        assert!(matches!(err, MetadocError::SymbolNotFound(ref s) if s == "demo/missing"));
    }

    #[test]
    fn test_publics_skip_private_and_keep_order() {
        let mut ns = Namespace::new("demo");
        ns.symbol_mut("b");
        ns.symbol_mut("hidden").private = true;
        ns.symbol_mut("a");

        let names: Vec<_> = ns.publics().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(ns.symbol_names(), vec!["b", "hidden", "a"]);
    }

    #[test]
    fn test_resolve_type_and_labels() {
        let ns = Namespace::new("demo")
            .with_type_alias("Vec2", "forge.math.Vec2")
            .with_category_label("draw", "Drawing");

        assert_eq!(ns.resolve_type("Vec2"), "forge.math.Vec2");
        assert_eq!(ns.resolve_type("f64"), "f64");
        assert_eq!(ns.category_label("draw"), "Drawing");
        assert_eq!(ns.category_label("color"), "color");
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = Registry::new();
        registry.namespace_mut("a").doc.push_str("A");
        registry.insert(Namespace::new("b"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("a").unwrap().doc, "A");
        assert!(matches!(
            registry.get("c"),
            Err(MetadocError::NamespaceNotFound(_))
        ));
    }
}
