//! Error types for lexical normalization.

use std::path::PathBuf;
use thiserror::Error;

/// Which external capability failed to answer a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// Word validity / nearest-correction lookups.
    Oracle,
    /// Compound word splitting.
    Segmenter,
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dependency::Oracle => f.write_str("lexical oracle"),
            Dependency::Segmenter => f.write_str("segmenter"),
        }
    }
}

/// Errors raised while normalizing a document.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The oracle or segmenter could not answer. Fatal for the current call.
    #[error("{dependency} unavailable: {reason}")]
    DependencyUnavailable {
        dependency: Dependency,
        reason: String,
    },
}

impl NormalizeError {
    pub fn oracle_unavailable(reason: impl Into<String>) -> Self {
        Self::DependencyUnavailable {
            dependency: Dependency::Oracle,
            reason: reason.into(),
        }
    }

    pub fn segmenter_unavailable(reason: impl Into<String>) -> Self {
        Self::DependencyUnavailable {
            dependency: Dependency::Segmenter,
            reason: reason.into(),
        }
    }
}

/// Errors raised while building a normalizer from files or configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read a word list, dictionary, or config file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dictionary directory does not exist.
    #[error("dictionary directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Config file is not valid JSON for [`crate::config::NormalizerConfig`].
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A contraction pattern failed to compile.
    #[error("invalid contraction pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A setting is outside its accepted range.
    #[error("invalid setting {field}: {reason}")]
    Setting { field: &'static str, reason: String },
}

pub type Result<T, E = NormalizeError> = std::result::Result<T, E>;
