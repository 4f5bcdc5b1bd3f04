//! Error type shared by the parsing, settings and asset layers.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
/// Failures that can surface while loading a documentation page.
pub enum Error {
    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tree-sitter grammar could not be loaded into the parser.
    #[error("incompatible grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// A format's query failed to compile against its grammar.
    #[error("invalid query: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// The parser produced no tree for a document.
    #[error("failed to parse {}", path.display())]
    Parse {
        /// Document that could not be parsed.
        path: PathBuf,
    },

    /// The persisted settings file could not be read or written as JSON.
    #[error("settings file is not valid JSON: {0}")]
    Settings(#[from] serde_json::Error),

    /// A page feature refused to initialise.
    #[error("{feature} failed to initialise: {reason}")]
    Init {
        /// Name of the feature initializer.
        feature: &'static str,
        /// Human readable cause.
        reason: String,
    },
}
