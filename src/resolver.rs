//! Per-token decision: keep, correct, or segment.

use crate::error::Result;
use crate::oracle::{LexicalOracle, Segmenter};
use crate::text::is_punctuation;

/// What happened to one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionOutcome {
    /// The oracle already accepts the token.
    Unchanged(String),
    /// Replaced by the oracle's nearest valid word.
    Corrected(String),
    /// No better single word existed; split by the segmenter.
    Segmented(Vec<String>),
}

impl CorrectionOutcome {
    /// The word(s) this outcome contributes to the output, in order.
    pub fn words(&self) -> &[String] {
        match self {
            CorrectionOutcome::Unchanged(word) | CorrectionOutcome::Corrected(word) => {
                std::slice::from_ref(word)
            }
            CorrectionOutcome::Segmented(words) => words,
        }
    }
}

/// Resolve a single token.
///
/// An oracle-valid token short-circuits. Segmentation only runs when the
/// nearest correction is the token itself. A correction or segment with
/// no word characters left counts as the token itself.
pub fn resolve<O, S>(oracle: &O, segmenter: &S, token: &str) -> Result<CorrectionOutcome>
where
    O: LexicalOracle + ?Sized,
    S: Segmenter + ?Sized,
{
    if oracle.is_valid(token)? {
        return Ok(CorrectionOutcome::Unchanged(token.to_string()));
    }

    let nearest = oracle.nearest(token)?;
    if nearest != token && has_word_chars(&nearest) {
        tracing::trace!(token, corrected = %nearest, "corrected token");
        return Ok(CorrectionOutcome::Corrected(nearest));
    }

    let mut words = segmenter.segment(token)?;
    words.retain(|w| has_word_chars(w));
    if words.is_empty() {
        words.push(token.to_string());
    }
    tracing::trace!(token, pieces = words.len(), "segmented token");
    Ok(CorrectionOutcome::Segmented(words))
}

fn has_word_chars(word: &str) -> bool {
    word.chars().any(|c| !c.is_whitespace() && !is_punctuation(c))
}

/// Tally of outcomes for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub unchanged: usize,
    pub corrected: usize,
    pub segmented: usize,
}

impl OutcomeCounts {
    pub fn tally(outcomes: &[CorrectionOutcome]) -> Self {
        let mut counts = Self::default();
        for outcome in outcomes {
            match outcome {
                CorrectionOutcome::Unchanged(_) => counts.unchanged += 1,
                CorrectionOutcome::Corrected(_) => counts.corrected += 1,
                CorrectionOutcome::Segmented(_) => counts.segmented += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.unchanged + self.corrected + self.segmented
    }
}
