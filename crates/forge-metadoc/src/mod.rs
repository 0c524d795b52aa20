//! forge-metadoc: Documentation enrichment for Forge namespaces
//!
//! This crate enriches symbol documentation by:
//! - Capturing worked examples at definition time as printed source text
//! - Naming generated example images by a hash of their code and description
//! - Rendering examples, constants and type tags into markdown sections
//! - Appending category and constant indices to the namespace doc
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐
//! │ Form printer │───▶│   Example    │  (definition time)
//! │   + hash     │    │ constructors │
//! └──────────────┘    └──────┬───────┘
//!                            ▼
//!                     ┌──────────────┐
//!                     │  Namespace   │  (metadata store)
//!                     └──────┬───────┘
//!                            ▼
//!                     ┌──────────────┐
//!                     │  Aggregator  │──▶ markdown appended to docs
//!                     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use forge_metadoc::{alter_docs, Form, MetadocConfig, Namespace};
//!
//! let mut ns = Namespace::new("forge.math").with_doc("Math helpers.");
//! ns.define("add")
//!     .doc("Add two numbers.")
//!     .example("Small numbers", &[Form::call("add", [Form::Int(1), Form::Int(2)])], || {
//!         Ok(Form::Int(3))
//!     });
//!
//! alter_docs(&mut ns, &MetadocConfig::default()).unwrap();
//! assert!(ns.symbol("add").unwrap().doc.contains("(add 1 2) ;; => 3"));
//! ```

// Core types
pub mod diagnostics;
pub mod example;
pub mod form;
pub mod hash;
pub mod meta;
pub mod printer;

// Pipeline
pub mod builder;
pub mod config;
pub mod docgen;
pub mod snapshot;

// Re-exports for convenience
pub use builder::SymbolBuilder;
pub use config::MetadocConfig;
pub use diagnostics::{EvalError, MetadocError, MetadocResult};
pub use example::{
    make_generated_image, make_regular, make_session, make_static_image, make_unevaluated,
    Canvas, DrawKind, Example, ImageConfig,
};
pub use form::Form;
pub use hash::content_hash;
pub use meta::{MetadataStore, Namespace, Registry, SymbolMeta};
pub use printer::{format_forms, print_forms, FormPrinter};

// Documentation generation
pub use docgen::{alter_docs, Aggregator, MarkdownRenderer, RunStatus, RunSummary};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
