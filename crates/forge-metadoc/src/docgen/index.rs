//! Namespace-wide indices built during a run

use std::collections::{BTreeMap, BTreeSet};

/// Category a symbol is listed under.
///
/// Ordering is derived from variant order, so `Uncategorized` sorts after
/// every named key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryKey {
    /// A user-declared category
    Named(String),
    /// Symbols that declared no category
    Uncategorized,
}

impl CategoryKey {
    /// Create a named key
    pub fn named(key: impl Into<String>) -> Self {
        CategoryKey::Named(key.into())
    }
}

/// Symbol names grouped by category, both sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    entries: BTreeMap<CategoryKey, BTreeSet<String>>,
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `symbol` to `key`
    pub fn insert(&mut self, key: CategoryKey, symbol: impl Into<String>) {
        self.entries.entry(key).or_default().insert(symbol.into());
    }

    /// Categories in display order with their members
    pub fn iter(&self) -> impl Iterator<Item = (&CategoryKey, &BTreeSet<String>)> {
        self.entries.iter()
    }

    /// Members of a category
    pub fn members(&self, key: &CategoryKey) -> Option<&BTreeSet<String>> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Constant values keyed by symbol name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantIndex {
    entries: BTreeMap<String, String>,
}

impl ConstantIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the escaped value of a constant
    pub fn insert(&mut self, symbol: impl Into<String>, escaped_value: impl Into<String>) {
        self.entries.insert(symbol.into(), escaped_value.into());
    }

    /// Constants sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.entries.get(symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
