//! Model-loading error types.
//!
//! A partially loaded model is never handed to the evaluator; any of these
//! aborts the load.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading an embedding-model artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model file could not be read.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header line does not carry vocabulary size and dimensionality.
    #[error("{path}: invalid word2vec header: {reason}")]
    BadHeader { path: PathBuf, reason: String },

    /// The file ended before all announced vectors were read.
    #[error("truncated vector data at word {index} ('{word}')")]
    TruncatedVectors { index: usize, word: String },

    /// A vector row with the wrong number of components.
    #[error("word '{word}': expected {expected} vector components, found {actual}")]
    DimensionMismatch {
        word: String,
        expected: usize,
        actual: usize,
    },

    /// A vector component that is not a valid number.
    #[error("word '{word}': unparsable vector component '{component}'")]
    BadVector { word: String, component: String },
}

impl ModelError {
    /// Returns `true` if the artifact itself is malformed (as opposed to
    /// unreadable).
    pub fn is_format(&self) -> bool {
        !matches!(self, ModelError::Io { .. })
    }
}
