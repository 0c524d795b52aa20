//! Documentation generation core
//!
//! This module turns stored examples into markdown and appends the
//! generated sections to symbol and namespace docs.

mod aggregator;
mod index;
mod markdown;

pub use aggregator::{
    alter_docs, Aggregator, RunStatus, RunSummary, ADDITIONAL_INFO_HEADER, CATEGORIES_HEADER,
    CONSTANTS_HEADER, EXAMPLES_HEADER,
};
pub use index::{CategoryIndex, CategoryKey, ConstantIndex};
pub use markdown::{escape_markdown, section, symbol_link, MarkdownRenderer, RESULT_MARKER};
