//! Error types for test-set generation and evaluation.
//!
//! Defined in `worttest-core` so the CLI can classify failures into exit
//! behavior without string matching.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that abort generation or evaluation.
#[derive(Debug, Error)]
pub enum EvalError {
    /// An invalid configuration value, rejected before any file is touched.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A source or test-set line that cannot be interpreted.
    #[error("{path}:{line_no}: {reason}")]
    MalformedLine {
        path: PathBuf,
        line_no: usize,
        reason: String,
    },

    /// Random pairing needs at least two distinct word groups.
    #[error("{path}: need at least 2 distinct word groups for pairing, found {distinct}")]
    InsufficientGroups { path: PathBuf, distinct: usize },

    /// A file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EvalError {
    /// Shorthand for a [`EvalError::MalformedLine`] with the offending line identified.
    pub fn malformed(path: &Path, line_no: usize, reason: impl Into<String>) -> Self {
        EvalError::MalformedLine {
            path: path.to_path_buf(),
            line_no,
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`EvalError::Io`] carrying the file path.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        EvalError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns `true` if this error was caused by the contents of an input
    /// file rather than by the environment.
    pub fn is_data(&self) -> bool {
        matches!(
            self,
            EvalError::MalformedLine { .. } | EvalError::InsufficientGroups { .. }
        )
    }
}
