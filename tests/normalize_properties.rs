//! Pipeline properties checked against fake oracles.

use lexnorm::{
    CorrectionOutcome, LexicalOracle, NormalizeError, Normalizer, Segmenter, error::Dependency,
};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

/// Accepts a fixed vocabulary and knows a handful of typo fixes.
struct FakeOracle {
    words: HashSet<&'static str>,
    fixes: HashMap<&'static str, &'static str>,
}

impl FakeOracle {
    fn english() -> Self {
        Self {
            words: [
                "the", "cat", "sat", "on", "mat", "will", "not", "is", "it", "dog", "ran", "home",
                "can", "do", "are", "you", "they", "would", "have", "am", "i",
            ]
            .into_iter()
            .collect(),
            fixes: HashMap::from([("teh", "the"), ("hoem", "home"), ("dgo", "dog")]),
        }
    }
}

impl LexicalOracle for FakeOracle {
    fn is_valid(&self, token: &str) -> Result<bool, NormalizeError> {
        Ok(self.words.contains(token.to_lowercase().as_str()))
    }

    fn nearest(&self, token: &str) -> Result<String, NormalizeError> {
        Ok(self
            .fixes
            .get(token)
            .map(|s| s.to_string())
            .unwrap_or_else(|| token.to_string()))
    }
}

/// Accepts any all-lowercase ASCII token.
struct LowercaseOracle;

impl LexicalOracle for LowercaseOracle {
    fn is_valid(&self, token: &str) -> Result<bool, NormalizeError> {
        Ok(token.chars().all(|c| c.is_ascii_lowercase()))
    }

    fn nearest(&self, token: &str) -> Result<String, NormalizeError> {
        Ok(token.to_string())
    }
}

/// Greedy longest-prefix splitter over a fixed word set.
struct GreedySplitter(HashSet<&'static str>);

impl GreedySplitter {
    fn english() -> Self {
        Self(["the", "cat", "sat", "on", "mat", "dog", "ran", "home"].into_iter().collect())
    }
}

impl Segmenter for GreedySplitter {
    fn segment(&self, token: &str) -> Result<Vec<String>, NormalizeError> {
        let mut rest = token;
        let mut out = Vec::new();
        'outer: while !rest.is_empty() {
            for end in (1..=rest.len()).rev() {
                if rest.is_char_boundary(end) && self.0.contains(&rest[..end]) {
                    out.push(rest[..end].to_string());
                    rest = &rest[end..];
                    continue 'outer;
                }
            }
            return Ok(vec![token.to_string()]);
        }
        Ok(out)
    }
}

/// Splits tokens into two halves by character count.
struct HalvingSplitter;

impl Segmenter for HalvingSplitter {
    fn segment(&self, token: &str) -> Result<Vec<String>, NormalizeError> {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() < 2 {
            return Ok(vec![token.to_string()]);
        }
        let (a, b) = chars.split_at(chars.len() / 2);
        Ok(vec![a.iter().collect(), b.iter().collect()])
    }
}

struct OfflineOracle;

impl LexicalOracle for OfflineOracle {
    fn is_valid(&self, _token: &str) -> Result<bool, NormalizeError> {
        Err(NormalizeError::oracle_unavailable("dictionary not loaded"))
    }

    fn nearest(&self, _token: &str) -> Result<String, NormalizeError> {
        Err(NormalizeError::oracle_unavailable("dictionary not loaded"))
    }
}

struct OfflineSegmenter;

impl Segmenter for OfflineSegmenter {
    fn segment(&self, _token: &str) -> Result<Vec<String>, NormalizeError> {
        Err(NormalizeError::segmenter_unavailable("model not loaded"))
    }
}

fn english() -> Normalizer<FakeOracle, GreedySplitter> {
    Normalizer::new(FakeOracle::english(), GreedySplitter::english())
}

#[test]
fn wont_expands_to_will_not() {
    assert_eq!(english().normalize("won't").unwrap(), "will not");
    assert_eq!(english().normalize("I won't!").unwrap(), "I will not");
}

#[test]
fn curly_apostrophes_still_expand() {
    assert_eq!(english().normalize("can\u{2019}t").unwrap(), "can not");
}

#[test]
fn concatenation_is_replaced_by_its_segments() {
    assert_eq!(
        english().normalize("the catsat on the mat").unwrap(),
        "the cat sat on the mat"
    );
    let detailed = english().normalize_detailed("dogranhome").unwrap();
    assert_eq!(
        detailed.outcomes,
        vec![CorrectionOutcome::Segmented(vec![
            "dog".into(),
            "ran".into(),
            "home".into()
        ])]
    );
}

#[test]
fn typo_is_corrected_not_segmented() {
    let detailed = english().normalize_detailed("the dgo ran hoem").unwrap();
    assert_eq!(detailed.text, "the dog ran home");
    assert_eq!(detailed.counts.corrected, 2);
    assert_eq!(detailed.counts.segmented, 0);
}

#[test]
fn decontracted_form_is_what_gets_classified() {
    // "they're" becomes "they are"; both halves are valid words
    let detailed = english().normalize_detailed("they're home").unwrap();
    assert_eq!(detailed.text, "they are home");
    assert!(detailed
        .outcomes
        .iter()
        .all(|o| matches!(o, CorrectionOutcome::Unchanged(_))));
}

#[test]
fn empty_input_is_empty_output() {
    assert_eq!(english().normalize("").unwrap(), "");
}

#[test]
fn oracle_failure_surfaces_as_dependency_unavailable() {
    let n = Normalizer::new(OfflineOracle, GreedySplitter::english());
    match n.normalize("the cat") {
        Err(NormalizeError::DependencyUnavailable { dependency, .. }) => {
            assert_eq!(dependency, Dependency::Oracle)
        }
        other => panic!("expected dependency error, got {other:?}"),
    }
}

#[test]
fn segmenter_failure_only_matters_when_segmentation_is_needed() {
    let n = Normalizer::new(FakeOracle::english(), OfflineSegmenter);
    assert_eq!(n.normalize("the cat sat").unwrap(), "the cat sat");
    assert_eq!(n.normalize("teh cat").unwrap(), "the cat");
    match n.normalize("the catsat") {
        Err(NormalizeError::DependencyUnavailable { dependency, .. }) => {
            assert_eq!(dependency, Dependency::Segmenter)
        }
        other => panic!("expected dependency error, got {other:?}"),
    }
}

#[test]
fn one_failing_document_does_not_spoil_the_batch() {
    let n = Normalizer::new(FakeOracle::english(), OfflineSegmenter);
    let results = n.normalize_batch(&["teh cat", "catsat", "the dog"]);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_deref().unwrap(), "the cat");
    assert!(results[1].is_err());
    assert_eq!(results[2].as_deref().unwrap(), "the dog");
}

proptest! {
    #[test]
    fn output_never_contains_punctuation(text in "\\PC{0,80}") {
        let n = Normalizer::new(FakeOracle::english(), HalvingSplitter);
        let out = n.normalize(&text).unwrap();
        prop_assert!(!out.chars().any(|c| c.is_ascii_punctuation()), "got {:?}", out);
    }

    #[test]
    fn output_has_single_spaces_only(text in "\\PC{0,80}") {
        let n = Normalizer::new(FakeOracle::english(), HalvingSplitter);
        let out = n.normalize(&text).unwrap();
        prop_assert!(!out.contains("  "));
        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(!out.chars().any(|c| c.is_whitespace() && c != ' '));
    }

    #[test]
    fn valid_tokens_keep_their_order(text in "\\PC{0,80}") {
        let n = Normalizer::new(LowercaseOracle, HalvingSplitter);
        let tokens = n.tokens(&text);
        let out = n.normalize(&text).unwrap();
        let expected: Vec<String> = tokens
            .iter()
            .flat_map(|t| {
                if t.chars().all(|c| c.is_ascii_lowercase()) {
                    vec![t.clone()]
                } else {
                    HalvingSplitter.segment(t).unwrap()
                }
            })
            .flat_map(|w| w.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .collect();
        prop_assert_eq!(out, expected.join(" "));
    }

    #[test]
    fn all_valid_text_is_returned_as_is(
        words in prop::collection::vec("[a-z]{1,8}", 0..12),
        gaps in prop::collection::vec("[ \t\n]{1,3}", 12),
    ) {
        let mut text = String::new();
        for (word, gap) in words.iter().zip(&gaps) {
            text.push_str(word);
            text.push_str(gap);
        }
        let n = Normalizer::new(LowercaseOracle, HalvingSplitter);
        prop_assert_eq!(n.normalize(&text).unwrap(), words.join(" "));
    }

    #[test]
    fn failing_oracle_never_yields_text(word in "[a-z]{1,10}", prefix in "[ .,!]{0,3}") {
        let n = Normalizer::new(OfflineOracle, HalvingSplitter);
        let text = format!("{prefix}{word}");
        prop_assert!(n.normalize(&text).is_err());
    }
}
