//! Ordered contraction table.
//!
//! Rules are applied one after another, each over the whole text, so a
//! specific form such as `won't` must sit before the generic `n't` rule
//! that would otherwise turn it into "wo not".

use crate::error::LoadError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Default English rules, most specific first.
pub const DEFAULT_RULES: &[(&str, &str)] = &[
    (r"won't", "will not"),
    (r"can't", "can not"),
    (r"n't", " not"),
    (r"'re", " are"),
    (r"'s", " is"),
    (r"'d", " would"),
    (r"'ll", " will"),
    (r"'t", " not"),
    (r"'ve", " have"),
    (r"'m", " am"),
];

lazy_static! {
    static ref DEFAULT_TABLE: ContractionTable = ContractionTable::from_pairs(
        DEFAULT_RULES.iter().map(|(p, e)| (*p, *e))
    )
    .expect("default contraction patterns compile");
}

/// A single (pattern, expansion) pair as it appears in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractionPair {
    pub pattern: String,
    pub expansion: String,
}

/// Compiled rule.
#[derive(Debug, Clone)]
pub struct ContractionRule {
    pattern: Regex,
    expansion: String,
}

impl ContractionRule {
    pub fn new(pattern: &str, expansion: &str) -> Result<Self, LoadError> {
        let compiled = Regex::new(pattern).map_err(|source| LoadError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: compiled,
            expansion: expansion.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn expansion(&self) -> &str {
        &self.expansion
    }
}

/// Immutable, ordered list of contraction rules.
#[derive(Debug, Clone)]
pub struct ContractionTable {
    rules: Vec<ContractionRule>,
}

impl ContractionTable {
    /// The built-in English table.
    pub fn english() -> Self {
        DEFAULT_TABLE.clone()
    }

    /// Compile a table from ordered pairs. Order is kept as given.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rules = pairs
            .into_iter()
            .map(|(pattern, expansion)| ContractionRule::new(pattern, expansion))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn from_config(pairs: &[ContractionPair]) -> Result<Self, LoadError> {
        Self::from_pairs(
            pairs
                .iter()
                .map(|p| (p.pattern.as_str(), p.expansion.as_str())),
        )
    }

    pub fn rules(&self) -> &[ContractionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Expand every contraction in `text`.
    pub fn expand<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.expand_counted(text).0
    }

    /// Expand and report how many substitutions were made.
    pub fn expand_counted<'a>(&self, text: &'a str) -> (Cow<'a, str>, u64) {
        let mut result = Cow::Borrowed(text);
        let mut total_subs: u64 = 0;

        for rule in &self.rules {
            let before_count = rule.pattern.find_iter(&result).count();
            if before_count > 0 {
                result = Cow::Owned(
                    rule.pattern
                        .replace_all(&result, rule.expansion.as_str())
                        .into_owned(),
                );
                total_subs += before_count as u64;
            }
        }

        (result, total_subs)
    }
}

impl Default for ContractionTable {
    fn default() -> Self {
        Self::english()
    }
}
