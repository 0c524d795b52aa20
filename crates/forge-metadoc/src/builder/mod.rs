//! Builder API
//!
//! This module provides the definition-time API that attaches examples and
//! annotations to symbol metadata.

mod symbol_builder;

pub use symbol_builder::SymbolBuilder;
