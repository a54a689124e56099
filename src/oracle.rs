//! Capabilities the normalizer consumes.
//!
//! Both traits take `&self` and must be safe to share across threads: a
//! single oracle serves every document and, for long documents, every
//! token in parallel.

use crate::error::Result;
use std::sync::Arc;

/// Judges word validity and proposes the nearest valid replacement.
pub trait LexicalOracle: Send + Sync {
    /// Whether `token` is a known word. Case handling is up to the oracle.
    fn is_valid(&self, token: &str) -> Result<bool>;

    /// Best single-word correction for `token`, or `token` itself when no
    /// confident correction exists. Must be deterministic.
    fn nearest(&self, token: &str) -> Result<String>;
}

/// Splits a concatenated token into its most probable word sequence.
pub trait Segmenter: Send + Sync {
    /// Never empty on success; an unsplittable token comes back as `[token]`.
    fn segment(&self, token: &str) -> Result<Vec<String>>;
}

impl<T: LexicalOracle + ?Sized> LexicalOracle for &T {
    fn is_valid(&self, token: &str) -> Result<bool> {
        (**self).is_valid(token)
    }

    fn nearest(&self, token: &str) -> Result<String> {
        (**self).nearest(token)
    }
}

impl<T: LexicalOracle + ?Sized> LexicalOracle for Arc<T> {
    fn is_valid(&self, token: &str) -> Result<bool> {
        (**self).is_valid(token)
    }

    fn nearest(&self, token: &str) -> Result<String> {
        (**self).nearest(token)
    }
}

impl<T: Segmenter + ?Sized> Segmenter for &T {
    fn segment(&self, token: &str) -> Result<Vec<String>> {
        (**self).segment(token)
    }
}

impl<T: Segmenter + ?Sized> Segmenter for Arc<T> {
    fn segment(&self, token: &str) -> Result<Vec<String>> {
        (**self).segment(token)
    }
}
