//! SymbolBuilder - registers documentation metadata for one symbol
//!
//! Every call appends to the symbol's metadata; defining the same symbol
//! again grows its example list instead of replacing it.

use crate::diagnostics::EvalError;
use crate::example::{
    make_generated_image, make_regular, make_session, make_static_image, make_unevaluated,
    Canvas, DrawKind, Example, ImageConfig, Thunk,
};
use crate::form::Form;
use crate::meta::{Namespace, SymbolMeta};

/// Builder for a symbol's documentation metadata
///
/// # Example
///
/// ```
/// use forge_metadoc::form::Form;
/// use forge_metadoc::meta::Namespace;
///
/// let mut ns = Namespace::new("forge.math");
/// ns.define("add")
///     .doc("Add two numbers.")
///     .category("arith")
///     .example("Small numbers", &[Form::call("add", [Form::Int(1), Form::Int(2)])], || {
///         Ok(Form::Int(3))
///     });
///
/// assert_eq!(ns.symbol("add").unwrap().examples.len(), 1);
/// ```
#[derive(Debug)]
pub struct SymbolBuilder<'a> {
    symbol: &'a mut SymbolMeta,
}

impl Namespace {
    /// Start defining (or extending) `name`
    pub fn define(&mut self, name: &str) -> SymbolBuilder<'_> {
        SymbolBuilder {
            symbol: self.symbol_mut(name),
        }
    }
}

impl SymbolBuilder<'_> {
    /// Append to the symbol's doc text
    pub fn doc(self, text: &str) -> Self {
        self.symbol.doc.push_str(text);
        self
    }

    /// Add a category key
    pub fn category(self, key: impl Into<String>) -> Self {
        self.symbol.categories.insert(key.into());
        self
    }

    /// Mark the symbol as a constant with `value`
    pub fn constant(self, value: impl Into<Form>) -> Self {
        self.symbol.const_value = Some(value.into());
        self
    }

    /// Set the declared type tag
    pub fn tag(self, tag: impl Into<String>) -> Self {
        self.symbol.type_tag = Some(tag.into());
        self
    }

    /// Hide the symbol from documentation
    pub fn private(self) -> Self {
        self.symbol.private = true;
        self
    }

    /// Attach an already constructed example
    pub fn push(self, example: Example) -> Self {
        self.symbol.push_example(example);
        self
    }

    /// Attach an example whose result is shown next to its code
    pub fn example<F>(self, doc: &str, body: &[Form], thunk: F) -> Self
    where
        F: Fn() -> Result<Form, EvalError> + Send + Sync + 'static,
    {
        self.push(make_regular(doc, true, body, thunk))
    }

    /// Attach an example that is shown but never evaluated
    pub fn example_code(self, doc: &str, body: &[Form]) -> Self {
        self.push(make_unevaluated(doc, body))
    }

    /// Attach an example whose image is drawn by the drawing backend
    pub fn example_image<F>(
        self,
        kind: DrawKind,
        doc: &str,
        config: Option<ImageConfig>,
        body: &[Form],
        draw: F,
    ) -> Self
    where
        F: Fn(&mut dyn Canvas) -> Result<Form, EvalError> + Send + Sync + 'static,
    {
        self.push(make_generated_image(kind, doc, config, body, draw))
    }

    /// Attach a pre-rendered image from the images directory
    pub fn static_image(self, doc: &str, filename: &str) -> Self {
        self.push(make_static_image(doc, filename))
    }

    /// Attach a session of several evaluated forms
    pub fn example_session(self, doc: &str, steps: Vec<(Form, Option<Thunk>)>) -> Self {
        self.push(make_session(doc, true, steps))
    }
}
