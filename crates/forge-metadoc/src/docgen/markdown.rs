//! Markdown rendering of examples and namespace indices
//!
//! Every example renders through the same section template: the
//! description as a blockquote, a blank line, then the body.

use super::index::{CategoryIndex, CategoryKey, ConstantIndex};
use crate::config::MetadocConfig;
use crate::diagnostics::{MetadocError, MetadocResult};
use crate::example::{Example, GeneratedImage, Regular, Session, StaticImage, Thunk};
use crate::meta::Namespace;

/// Separator between the code of an evaluated form and its result
pub const RESULT_MARKER: &str = " ;; => ";

/// Markdown renderer for examples
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    /// Language tag of fenced code blocks
    pub code_language: String,
    /// Label of the uncategorized group
    pub uncategorized_label: String,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::from_config(&MetadocConfig::default())
    }
}

impl MarkdownRenderer {
    /// Create a renderer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer from a run configuration
    pub fn from_config(config: &MetadocConfig) -> Self {
        Self {
            code_language: config.code_language.clone(),
            uncategorized_label: config.uncategorized_label.clone(),
        }
    }

    /// Set the code block language tag
    pub fn with_code_language(mut self, language: impl Into<String>) -> Self {
        self.code_language = language.into();
        self
    }

    /// Render one example.
    ///
    /// Regular and session examples evaluate their thunks here; a failing
    /// thunk is returned as [`MetadocError::Evaluation`].
    pub fn render(&self, example: &Example) -> MetadocResult<String> {
        match example {
            Example::Regular(e) => self.render_regular(e),
            Example::GeneratedImage(e) => Ok(self.render_generated_image(e)),
            Example::StaticImage(e) => Ok(self.render_static_image(e)),
            Example::Session(e) => self.render_session(e),
        }
    }

    fn render_regular(&self, example: &Regular) -> MetadocResult<String> {
        let code = evaluated_source(&example.source_text, example.thunk.as_ref())?;
        Ok(section(&example.doc, &self.code_block(&code)))
    }

    fn render_generated_image(&self, example: &GeneratedImage) -> String {
        let body = format!(
            "{}\n\n{}",
            self.code_block(&example.source_text),
            example.markdown_value
        );
        section(&example.doc, &body)
    }

    fn render_static_image(&self, example: &StaticImage) -> String {
        section(&example.doc, &example.markdown_value)
    }

    fn render_session(&self, example: &Session) -> MetadocResult<String> {
        let mut code = String::new();
        for step in &example.steps {
            code.push_str(&evaluated_source(&step.source_text, step.thunk.as_ref())?);
        }
        Ok(section(&example.doc, &self.code_block(&code)))
    }

    /// Fence `code`, which must end with a newline
    pub fn code_block(&self, code: &str) -> String {
        format!("```{}\n{}```", self.code_language, code)
    }

    /// Render the `Categories` listing of a namespace
    pub fn render_categories(&self, index: &CategoryIndex, namespace: &Namespace) -> String {
        let mut md = String::new();
        for (key, names) in index.iter() {
            let label = match key {
                CategoryKey::Named(key) => namespace.category_label(key),
                CategoryKey::Uncategorized => self.uncategorized_label.as_str(),
            };
            let links = names
                .iter()
                .map(|name| symbol_link(name))
                .collect::<Vec<_>>()
                .join(", ");
            md.push_str(&format!("* {}: {}\n", label, links));
        }
        md
    }

    /// Render a namespace and its public symbols as one markdown page.
    ///
    /// Each symbol gets the `var-` anchor that category links point at.
    pub fn render_page(&self, namespace: &Namespace) -> String {
        let mut md = format!("# {}\n\n", namespace.name);
        push_block(&mut md, &namespace.doc);
        for symbol in namespace.publics() {
            md.push_str(&format!(
                "<a id=\"var-{}\"></a>\n\n### {}\n\n",
                urlencoding::encode(&symbol.name),
                escape_markdown(&symbol.name)
            ));
            push_block(&mut md, &symbol.doc);
        }
        md
    }

    /// Render the `Constants` listing of a namespace
    pub fn render_constants(&self, index: &ConstantIndex) -> String {
        let mut md = String::new();
        for (name, value) in index.iter() {
            md.push_str(&format!("* {} = {}\n", escape_markdown(name), value));
        }
        md
    }
}

/// Common section template
pub fn section(doc: &str, body: &str) -> String {
    format!("> {}\n\n{}", doc, body)
}

fn push_block(md: &mut String, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        md.push_str(text);
        md.push_str("\n\n");
    }
}

/// Run `thunk`, if any, and attach its result to the last source line
fn evaluated_source(source: &str, thunk: Option<&Thunk>) -> MetadocResult<String> {
    let Some(thunk) = thunk else {
        return Ok(source.to_string());
    };
    let result = thunk().map_err(|e| MetadocError::evaluation(source.trim_end(), e))?;
    Ok(format!("{}{}{}\n", source.trim_end_matches('\n'), RESULT_MARKER, result))
}

/// Markdown link to a symbol's anchor on the namespace page
pub fn symbol_link(name: &str) -> String {
    format!("[{}](#var-{})", escape_markdown(name), urlencoding::encode(name))
}

/// Escape characters that change the meaning of inline markdown
pub fn escape_markdown(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' | '_' | '`' | '[' | ']' | '#' | '|' | '<' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
