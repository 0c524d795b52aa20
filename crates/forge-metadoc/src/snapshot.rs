//! JSON snapshots of namespace metadata
//!
//! A snapshot describes namespaces, their symbols and examples as plain
//! data so the pipeline can run outside the program that defined them.
//! Evaluation results cannot be recomputed from a snapshot; a regular
//! example instead carries its recorded `result`, which becomes its thunk.
//!
//! ```json
//! {
//!   "namespaces": [{
//!     "name": "forge.math",
//!     "doc": "Math helpers.",
//!     "symbols": [{
//!       "name": "add",
//!       "categories": ["arith"],
//!       "examples": [{
//!         "kind": "regular",
//!         "doc": "Small numbers",
//!         "body": [{"type": "list", "value": [
//!           {"type": "symbol", "value": "add"},
//!           {"type": "int", "value": 1},
//!           {"type": "int", "value": 2}]}],
//!         "result": {"type": "int", "value": 3}
//!       }]
//!     }]
//!   }]
//! }
//! ```

use crate::diagnostics::{MetadocError, MetadocResult};
use crate::example::{
    constant_thunk, make_generated_image, make_regular, make_session, make_static_image,
    make_unevaluated, DrawKind, Example, ImageConfig,
};
use crate::form::Form;
use crate::meta::{Namespace, Registry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Snapshot of several namespaces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub namespaces: Vec<NamespaceSnapshot>,
}

/// Snapshot of one namespace
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSnapshot {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub category_labels: IndexMap<String, String>,
    #[serde(default)]
    pub type_aliases: IndexMap<String, String>,
    #[serde(default)]
    pub symbols: Vec<SymbolSnapshot>,
}

/// Snapshot of one symbol
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolSnapshot {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub examples: Vec<ExampleSnapshot>,
    #[serde(default)]
    pub constant: Option<Form>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub private: bool,
}

/// Snapshot of one example; `kind` selects the constructor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleSnapshot {
    /// `regular`, `image`, `static-image` or `session`
    pub kind: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub body: Vec<Form>,
    /// Recorded evaluation result
    #[serde(default)]
    pub result: Option<Form>,
    #[serde(default)]
    pub draw_kind: DrawKind,
    #[serde(default)]
    pub config: Option<ImageConfig>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepSnapshot>,
}

/// One recorded step of a session example
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSnapshot {
    pub form: Form,
    #[serde(default)]
    pub result: Option<Form>,
}

impl RegistrySnapshot {
    /// Parse a snapshot from JSON text
    pub fn from_json_str(json: &str) -> MetadocResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot file
    pub fn from_file(path: impl AsRef<Path>) -> MetadocResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Build the live registry, constructing every example
    pub fn into_registry(self) -> MetadocResult<Registry> {
        let mut registry = Registry::new();
        for ns in self.namespaces {
            registry.insert(ns.into_namespace()?);
        }
        Ok(registry)
    }
}

impl NamespaceSnapshot {
    /// Build the live namespace
    pub fn into_namespace(self) -> MetadocResult<Namespace> {
        let mut namespace = Namespace::new(self.name).with_doc(self.doc);
        namespace.category_labels = self.category_labels;
        namespace.type_aliases = self.type_aliases;

        for symbol in self.symbols {
            let meta = namespace.symbol_mut(&symbol.name);
            meta.doc.push_str(&symbol.doc);
            meta.const_value = symbol.constant;
            meta.type_tag = symbol.tag;
            meta.categories.extend(symbol.categories);
            meta.private = symbol.private;
            for example in symbol.examples {
                meta.push_example(example.into_example()?);
            }
        }
        Ok(namespace)
    }
}

impl ExampleSnapshot {
    /// Construct the example this snapshot describes
    pub fn into_example(self) -> MetadocResult<Example> {
        let example = match self.kind.as_str() {
            "regular" => match self.result {
                Some(result) => make_regular(self.doc, true, &self.body, move || Ok(result.clone())),
                None => make_unevaluated(self.doc, &self.body),
            },
            "image" => make_generated_image(self.draw_kind, self.doc, self.config, &self.body, |_| {
                Ok(Form::Nil)
            }),
            "static-image" => {
                let filename = self.filename.ok_or_else(|| {
                    MetadocError::other(format!("static-image example `{}` has no filename", self.doc))
                })?;
                make_static_image(self.doc, &filename)
            }
            "session" => make_session(
                self.doc,
                true,
                self.steps
                    .into_iter()
                    .map(|step| (step.form, step.result.map(constant_thunk)))
                    .collect(),
            ),
            other => return Err(MetadocError::UnknownExample(other.to_string())),
        };
        Ok(example)
    }
}
