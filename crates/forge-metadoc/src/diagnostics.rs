//! Error types
//!
//! This module provides the error taxonomy shared by the printer,
//! the markdown renderer and the aggregation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for forge-metadoc operations
pub type MetadocResult<T> = Result<T, MetadocError>;

/// Error produced by an example thunk while it is being evaluated
pub type EvalError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for forge-metadoc
#[derive(Debug, Error)]
pub enum MetadocError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("Configuration parse error in {file}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An example's thunk failed while rendering
    #[error("Evaluation of example `{context}` failed: {source}")]
    Evaluation {
        context: String,
        #[source]
        source: EvalError,
    },

    /// An example kind that none of the constructors produce
    #[error("Unrecognized example kind: {0}")]
    UnknownExample(String),

    /// Symbol not found
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Namespace not found
    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl MetadocError {
    /// Wrap a thunk failure, keeping the original error as the source
    pub fn evaluation(context: impl Into<String>, source: EvalError) -> Self {
        MetadocError::Evaluation {
            context: context.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        MetadocError::Config(message.into())
    }

    /// Create a config parse error for a file
    pub fn config_parse(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MetadocError::ConfigParse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        MetadocError::Other(message.into())
    }
}
