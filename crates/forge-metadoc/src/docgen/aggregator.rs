//! Aggregator - appends generated sections to symbol and namespace docs
//!
//! One run walks the public symbols of a namespace in definition order:
//! 1. Render stored examples under an `Examples` header
//! 2. Append an `Additional info` section for constants and typed symbols
//! 3. Otherwise file the symbol into the category index
//!
//! Afterwards the `Categories` and `Constants` indices are appended to the
//! namespace doc.
//!
//! Runs only ever append. Running twice over the same metadata repeats
//! every section.

use super::index::{CategoryIndex, CategoryKey, ConstantIndex};
use super::markdown::{escape_markdown, MarkdownRenderer};
use crate::config::MetadocConfig;
use crate::diagnostics::MetadocResult;
use crate::meta::{MetadataStore, Namespace, Registry, SymbolMeta};
use tracing::{debug, info};

/// Header of the per-symbol examples section
pub const EXAMPLES_HEADER: &str = "\n\n#### Examples\n\n";
/// Header of the per-symbol constant/type section
pub const ADDITIONAL_INFO_HEADER: &str = "\n\n#### Additional info\n\n";
/// Header of the namespace categories section
pub const CATEGORIES_HEADER: &str = "\n\n#### Categories\n\n";
/// Header of the namespace constants section
pub const CONSTANTS_HEADER: &str = "\n\n#### Constants\n\n";

/// Counters of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Public symbols visited
    pub symbols: usize,
    /// Examples rendered into symbol docs
    pub examples: usize,
    /// Symbols filed into categories
    pub categorized: usize,
    /// Constants recorded
    pub constants: usize,
}

/// Outcome of [`Aggregator::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Aggregation was disabled; nothing was touched
    Skipped,
    /// Every public symbol was processed
    Completed(RunSummary),
}

impl RunStatus {
    /// Whether the run did any work
    pub fn is_completed(&self) -> bool {
        matches!(self, RunStatus::Completed(_))
    }
}

/// Appends rendered documentation to namespace metadata
pub struct Aggregator<'a> {
    config: &'a MetadocConfig,
    renderer: MarkdownRenderer,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator for `config`
    pub fn new(config: &'a MetadocConfig) -> Self {
        Self {
            config,
            renderer: MarkdownRenderer::from_config(config),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &MetadocConfig {
        self.config
    }

    /// Run over one namespace.
    ///
    /// An example whose thunk fails aborts the run with that error; sections
    /// appended before the failure stay in place.
    pub fn run(&self, namespace: &mut Namespace) -> MetadocResult<RunStatus> {
        if !self.config.aggregation_enabled {
            debug!("Aggregation disabled, skipping namespace {}", namespace.name);
            return Ok(RunStatus::Skipped);
        }

        let mut summary = RunSummary::default();
        let mut categories = CategoryIndex::new();
        let mut constants = ConstantIndex::new();

        let publics: Vec<String> = namespace.publics().map(|s| s.name.clone()).collect();
        for name in publics {
            summary.symbols += 1;

            let (examples_text, example_count) = match namespace.symbol(&name) {
                Some(symbol) => self.examples_section(symbol)?,
                None => continue,
            };
            if let Some(text) = examples_text {
                debug!("Appending {} example(s) to {}", example_count, name);
                namespace.append_doc(&name, &text)?;
                summary.examples += example_count;
            }

            let Some(symbol) = namespace.symbol(&name) else {
                continue;
            };
            if symbol.has_additional_info() {
                let text = additional_info(namespace, symbol);
                if let Some(value) = &symbol.const_value {
                    constants.insert(name.clone(), escape_markdown(&value.to_string()));
                    summary.constants += 1;
                }
                debug!("Appending additional info to {}", name);
                namespace.append_doc(&name, &text)?;
            } else {
                if symbol.categories.is_empty() {
                    categories.insert(CategoryKey::Uncategorized, name.clone());
                } else {
                    for key in &symbol.categories {
                        categories.insert(CategoryKey::named(key.clone()), name.clone());
                    }
                }
                summary.categorized += 1;
            }
        }

        if !categories.is_empty() {
            let listing = self.renderer.render_categories(&categories, namespace);
            namespace.append_namespace_doc(&format!("{}{}", CATEGORIES_HEADER, listing));
        }
        if !constants.is_empty() {
            let listing = self.renderer.render_constants(&constants);
            namespace.append_namespace_doc(&format!("{}{}", CONSTANTS_HEADER, listing));
        }

        info!(
            "Documented namespace {}: {} symbols, {} examples, {} constants",
            namespace.name, summary.symbols, summary.examples, summary.constants
        );
        Ok(RunStatus::Completed(summary))
    }

    /// Run over every namespace of a registry, stopping at the first error
    pub fn run_all(&self, registry: &mut Registry) -> MetadocResult<Vec<RunStatus>> {
        registry.iter_mut().map(|ns| self.run(ns)).collect()
    }

    fn examples_section(&self, symbol: &SymbolMeta) -> MetadocResult<(Option<String>, usize)> {
        if !self.config.examples_enabled || symbol.examples.is_empty() {
            return Ok((None, 0));
        }
        let rendered = symbol
            .examples
            .iter()
            .map(|example| self.renderer.render(example))
            .collect::<MetadocResult<Vec<_>>>()?;
        let count = rendered.len();
        Ok((
            Some(format!("{}{}", EXAMPLES_HEADER, rendered.join("\n\n"))),
            count,
        ))
    }
}

fn additional_info(namespace: &Namespace, symbol: &SymbolMeta) -> String {
    let mut md = String::from(ADDITIONAL_INFO_HEADER);
    if let Some(value) = &symbol.const_value {
        md.push_str(&format!("* Constant value `{} = {}`\n", symbol.name, value));
    }
    if let Some(tag) = &symbol.type_tag {
        md.push_str(&format!("* Type: `{}`\n", namespace.resolve_type(tag)));
    }
    md
}

/// Run the aggregator once over `namespace` with `config`
pub fn alter_docs(namespace: &mut Namespace, config: &MetadocConfig) -> MetadocResult<RunStatus> {
    Aggregator::new(config).run(namespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{EvalError, MetadocError};
    use crate::example::{make_regular, make_unevaluated};
    use crate::form::Form;
    use pretty_assertions::assert_eq;

    fn namespace() -> Namespace {
        let mut ns = Namespace::new("forge.color").with_doc("Color tools.");
        let sym = ns.symbol_mut("blend");
        sym.doc = "Blend two colors.".to_string();
        sym.categories.insert("mix".to_string());
        sym.push_example(make_unevaluated(
            "Blend",
            &[Form::call("blend", [Form::kw("a"), Form::kw("b")])],
        ));
        ns
    }

    #[test]
    fn test_disabled_aggregation_is_noop() {
        let mut ns = namespace();
        let config = MetadocConfig::default().with_aggregation(false);

        let status = alter_docs(&mut ns, &config).unwrap();

        assert_eq!(status, RunStatus::Skipped);
        assert_eq!(ns.doc, "Color tools.");
        assert_eq!(ns.symbol("blend").unwrap().doc, "Blend two colors.");
    }

    #[test]
    fn test_disabled_examples_are_ignored() {
        let mut ns = namespace();
        let config = MetadocConfig::default().with_examples(false);

        let status = alter_docs(&mut ns, &config).unwrap();

        let RunStatus::Completed(summary) = status else {
            panic!("expected a completed run");
        };
        assert_eq!(summary.examples, 0);
        assert_eq!(ns.symbol("blend").unwrap().doc, "Blend two colors.");
        assert!(ns.doc.contains("#### Categories"));
    }

    #[test]
    fn test_examples_section() {
        let mut ns = namespace();
        alter_docs(&mut ns, &MetadocConfig::default()).unwrap();

        assert_eq!(
            ns.symbol("blend").unwrap().doc,
            "Blend two colors.\n\n#### Examples\n\n> Blend\n\n```clojure\n(blend :a :b)\n```"
        );
    }

    #[test]
    fn test_typed_symbol_is_not_categorized() {
        let mut ns = Namespace::new("forge.math").with_type_alias("Vec2", "forge.math.Vec2");
        let sym = ns.symbol_mut("origin");
        sym.type_tag = Some("Vec2".to_string());
        sym.categories.insert("vec".to_string());

        let status = alter_docs(&mut ns, &MetadocConfig::default()).unwrap();

        assert_eq!(
            ns.symbol("origin").unwrap().doc,
            "\n\n#### Additional info\n\n* Type: `forge.math.Vec2`\n"
        );
        assert_eq!(ns.doc, "");
        assert_eq!(
            status,
            RunStatus::Completed(RunSummary {
                symbols: 1,
                examples: 0,
                categorized: 0,
                constants: 0,
            })
        );
    }

    #[test]
    fn test_constant_with_tag() {
        let mut ns = Namespace::new("forge.math");
        let sym = ns.symbol_mut("HALF");
        sym.const_value = Some(Form::Float(0.5));
        sym.type_tag = Some("f64".to_string());

        alter_docs(&mut ns, &MetadocConfig::default()).unwrap();

        assert_eq!(
            ns.symbol("HALF").unwrap().doc,
            "\n\n#### Additional info\n\n* Constant value `HALF = 0.5`\n* Type: `f64`\n"
        );
        assert_eq!(ns.doc, "\n\n#### Constants\n\n* HALF = 0.5\n");
    }

    #[test]
    fn test_private_symbols_are_skipped() {
        let mut ns = Namespace::new("demo");
        ns.symbol_mut("hidden").private = true;
        ns.symbol_mut("shown");

        alter_docs(&mut ns, &MetadocConfig::default()).unwrap();

        assert_eq!(
            ns.doc,
            "\n\n#### Categories\n\n* Other functions: [shown](#var-shown)\n"
        );
    }

    #[test]
    fn test_multiple_categories() {
        let mut ns = Namespace::new("demo").with_category_label("draw", "Drawing");
        let sym = ns.symbol_mut("line");
        sym.categories.insert("draw".to_string());
        sym.categories.insert("geom".to_string());

        alter_docs(&mut ns, &MetadocConfig::default()).unwrap();

        assert_eq!(
            ns.doc,
            "\n\n#### Categories\n\n* Drawing: [line](#var-line)\n* geom: [line](#var-line)\n"
        );
    }

    #[test]
    fn test_failing_example_aborts_run() {
        let mut ns = Namespace::new("demo");
        ns.symbol_mut("ok").doc = "Fine.".to_string();
        ns.symbol_mut("bad")
            .push_example(make_regular("Fails", true, &[Form::sym("x")], || {
                Err(EvalError::from("unbound x"))
            }));

        let err = alter_docs(&mut ns, &MetadocConfig::default()).unwrap_err();

        assert!(matches!(err, MetadocError::Evaluation { .. }));
        assert_eq!(ns.symbol("bad").unwrap().doc, "");
        assert_eq!(ns.doc, "");
    }

    #[test]
    fn test_run_all() {
        let mut registry = Registry::new();
        registry.insert(namespace());
        registry.insert(Namespace::new("empty"));

        let statuses = Aggregator::new(&MetadocConfig::default())
            .run_all(&mut registry)
            .unwrap();

        assert_eq!(statuses.len(), 2);
        assert!(statuses.iter().all(RunStatus::is_completed));
        assert_eq!(registry.get("empty").unwrap().doc, "");
    }
}
