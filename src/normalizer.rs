//! The document pipeline.
//!
//! canonicalize -> expand contractions -> strip punctuation and split ->
//! resolve each token -> join with single spaces.

use crate::contractions::ContractionTable;
use crate::error::Result;
use crate::oracle::{LexicalOracle, Segmenter};
use crate::resolver::{CorrectionOutcome, OutcomeCounts, resolve};
use crate::text::{canonicalize, is_punctuation, tokenize};
use rayon::prelude::*;
use std::borrow::Cow;
use std::sync::Arc;

/// Documents with at least this many tokens resolve them in parallel.
pub const DEFAULT_PARALLEL_TOKEN_THRESHOLD: usize = 512;

/// Result of normalizing one document, with the per-token decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub outcomes: Vec<CorrectionOutcome>,
    pub counts: OutcomeCounts,
    /// Contraction substitutions made before tokenization.
    pub expansions: u64,
}

/// Normalizes documents against an injected oracle and segmenter.
pub struct Normalizer<O, S> {
    contractions: Arc<ContractionTable>,
    oracle: O,
    segmenter: S,
    parallel_token_threshold: usize,
}

impl<O, S> Normalizer<O, S>
where
    O: LexicalOracle,
    S: Segmenter,
{
    /// Build with the English contraction table.
    pub fn new(oracle: O, segmenter: S) -> Self {
        Self {
            contractions: Arc::new(ContractionTable::english()),
            oracle,
            segmenter,
            parallel_token_threshold: DEFAULT_PARALLEL_TOKEN_THRESHOLD,
        }
    }

    pub fn with_contractions(mut self, table: impl Into<Arc<ContractionTable>>) -> Self {
        self.contractions = table.into();
        self
    }

    /// `0` keeps every document on the sequential path.
    pub fn with_parallel_token_threshold(mut self, threshold: usize) -> Self {
        self.parallel_token_threshold = threshold;
        self
    }

    pub fn contractions(&self) -> &ContractionTable {
        &self.contractions
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    /// Tokens of `text` after contraction expansion and punctuation stripping.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let canonical = canonicalize(text);
        tokenize(&self.contractions.expand(&canonical))
    }

    /// Normalize one document.
    ///
    /// Fails only when the oracle or segmenter cannot answer; no partially
    /// normalized text is ever returned.
    pub fn normalize(&self, text: &str) -> Result<String> {
        self.normalize_detailed(text).map(|n| n.text)
    }

    /// Normalize one document and report what happened to each token.
    pub fn normalize_detailed(&self, text: &str) -> Result<Normalized> {
        let canonical = canonicalize(text);
        let (expanded, expansions) = self.contractions.expand_counted(&canonical);
        let tokens = tokenize(&expanded);

        let outcomes = self.resolve_all(&tokens)?;
        let counts = OutcomeCounts::tally(&outcomes);
        tracing::debug!(
            tokens = tokens.len(),
            expansions,
            unchanged = counts.unchanged,
            corrected = counts.corrected,
            segmented = counts.segmented,
            "normalized document"
        );

        Ok(Normalized {
            text: reassemble(&outcomes),
            outcomes,
            counts,
            expansions,
        })
    }

    /// Normalize many documents in parallel; one result per input, in order.
    pub fn normalize_batch<T>(&self, documents: &[T]) -> Vec<Result<String>>
    where
        T: AsRef<str> + Sync,
    {
        documents
            .par_iter()
            .map(|doc| self.normalize(doc.as_ref()))
            .collect()
    }

    fn resolve_all(&self, tokens: &[String]) -> Result<Vec<CorrectionOutcome>> {
        let parallel =
            self.parallel_token_threshold > 0 && tokens.len() >= self.parallel_token_threshold;
        if parallel {
            tokens
                .par_iter()
                .map(|token| resolve(&self.oracle, &self.segmenter, token))
                .collect()
        } else {
            tokens
                .iter()
                .map(|token| resolve(&self.oracle, &self.segmenter, token))
                .collect()
        }
    }
}

/// Join every outcome's words with single spaces, in order.
///
/// Punctuation the oracle or segmenter put back is removed; words left
/// empty are skipped.
pub fn reassemble(outcomes: &[CorrectionOutcome]) -> String {
    let mut out = String::new();
    for word in outcomes
        .iter()
        .flat_map(|o| o.words())
        .flat_map(|w| w.split_whitespace())
    {
        let word: Cow<'_, str> = if word.contains(is_punctuation) {
            Cow::Owned(word.chars().filter(|c| !is_punctuation(*c)).collect())
        } else {
            Cow::Borrowed(word)
        };
        if word.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&word);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NormalizeError;

    struct Vocabulary(&'static [&'static str]);

    impl LexicalOracle for Vocabulary {
        fn is_valid(&self, token: &str) -> Result<bool> {
            let lower = token.to_lowercase();
            Ok(self.0.iter().any(|w| *w == lower))
        }

        fn nearest(&self, token: &str) -> Result<String> {
            Ok(match token {
                "teh" => "the".to_string(),
                other => other.to_string(),
            })
        }
    }

    struct SplitOnX;

    impl Segmenter for SplitOnX {
        fn segment(&self, token: &str) -> Result<Vec<String>> {
            Ok(token.split('x').map(str::to_string).collect())
        }
    }

    fn normalizer() -> Normalizer<Vocabulary, SplitOnX> {
        Normalizer::new(
            Vocabulary(&["the", "cat", "will", "not", "is", "a", "dog"]),
            SplitOnX,
        )
    }

    #[test]
    fn pipeline_runs_every_stage() {
        let out = normalizer()
            .normalize("teh cat won't... isn't  catxdog!")
            .unwrap();
        assert_eq!(out, "the cat will not is not cat dog");
    }

    #[test]
    fn empty_and_blank_input_give_empty_output() {
        assert_eq!(normalizer().normalize("").unwrap(), "");
        assert_eq!(normalizer().normalize("   \n\t ").unwrap(), "");
        assert_eq!(normalizer().normalize("?!...").unwrap(), "");
    }

    #[test]
    fn detailed_result_reports_outcomes() {
        let n = normalizer().normalize_detailed("teh catxdog won't").unwrap();
        assert_eq!(n.text, "the cat dog will not");
        assert_eq!(n.expansions, 1);
        assert_eq!(
            n.outcomes,
            vec![
                CorrectionOutcome::Corrected("the".into()),
                CorrectionOutcome::Segmented(vec!["cat".into(), "dog".into()]),
                CorrectionOutcome::Unchanged("will".into()),
                CorrectionOutcome::Unchanged("not".into()),
            ]
        );
        assert_eq!(n.counts.total(), 4);
    }

    #[test]
    fn reassemble_drops_blank_pieces() {
        let outcomes = vec![
            CorrectionOutcome::Segmented(vec!["a".into(), "".into(), "b c".into()]),
            CorrectionOutcome::Unchanged("d".into()),
        ];
        assert_eq!(reassemble(&outcomes), "a b c d");
        assert_eq!(reassemble(&[]), "");
    }

    #[test]
    fn reassemble_strips_punctuation_from_words() {
        let outcomes = vec![
            CorrectionOutcome::Corrected("o'clock".into()),
            CorrectionOutcome::Segmented(vec!["...".into(), "well-known".into()]),
        ];
        assert_eq!(reassemble(&outcomes), "oclock wellknown");
    }

    #[test]
    fn punctuated_correction_never_reaches_the_output() {
        struct Apostrophes;
        impl LexicalOracle for Apostrophes {
            fn is_valid(&self, token: &str) -> Result<bool> {
                Ok(token == "at")
            }
            fn nearest(&self, token: &str) -> Result<String> {
                Ok(match token {
                    "oclock" => "o'clock".to_string(),
                    "gone" => String::new(),
                    other => other.to_string(),
                })
            }
        }
        let n = Normalizer::new(Apostrophes, SplitOnX);
        assert_eq!(n.normalize("at oclock").unwrap(), "at oclock");
        // an empty correction keeps the token instead of dropping it
        assert_eq!(n.normalize("gone").unwrap(), "gone");
    }

    #[test]
    fn parallel_path_matches_sequential() {
        let text = "teh cat catxdog dog ".repeat(40);
        let sequential = normalizer().normalize(&text).unwrap();
        let parallel = normalizer()
            .with_parallel_token_threshold(1)
            .normalize(&text)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn batch_keeps_input_order() {
        let docs = ["teh cat", "", "catxdog"];
        let results: Vec<String> = normalizer()
            .normalize_batch(&docs)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(results, vec!["the cat", "", "cat dog"]);
    }

    #[test]
    fn custom_table_replaces_defaults() {
        let table = ContractionTable::from_pairs([("gonna", "going to")]).unwrap();
        let n = Normalizer::new(Vocabulary(&["going", "to", "won't"]), SplitOnX)
            .with_contractions(table);
        assert_eq!(n.tokens("gonna won't"), vec!["going", "to", "wont"]);
    }

    #[test]
    fn oracle_failure_fails_the_document() {
        struct Offline;
        impl LexicalOracle for Offline {
            fn is_valid(&self, _token: &str) -> Result<bool> {
                Err(NormalizeError::oracle_unavailable("offline"))
            }
            fn nearest(&self, _token: &str) -> Result<String> {
                Err(NormalizeError::oracle_unavailable("offline"))
            }
        }
        let n = Normalizer::new(Offline, SplitOnX);
        assert!(n.normalize("anything").is_err());
        assert_eq!(n.normalize("").unwrap(), "");
    }
}
