//! Configuration errors.
//!
//! Masking itself never fails: unmatched names and text that does not parse as
//! JSON are ordinary outcomes. Only loading a rule document can go wrong, and
//! an engine is never built from a document that failed to load.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure to turn a rule document into [`crate::MaskingOptions`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The rule file could not be read.
    #[error("failed to read masking rules from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is empty or whitespace only.
    #[error("masking rule document is empty")]
    Empty,

    /// The document is not valid JSON, or a record has the wrong shape.
    #[error("malformed masking rule document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is neither an array of rules nor an object with a `rules` array.
    #[error("invalid masking rule document: {0}")]
    InvalidFormat(String),
}
