//! Zipf-cost compound splitter.
//!
//! Words are ranked by frequency; the word at rank `i` of `n` costs
//! `ln((i + 1) * ln(n))`. The cheapest split of a token into known words
//! wins. Lookups are lowercase but the returned pieces keep the token's
//! own casing.

use crate::dictionary::{parse_word_lines, read_optional};
use crate::error::{LoadError, NormalizeError, Result};
use crate::oracle::Segmenter;
use std::collections::HashMap;
use std::path::Path;

/// Segmenter over a frequency-ranked word list.
pub struct ZipfSegmenter {
    costs: HashMap<String, f64>,
    max_word_len: usize,
}

impl ZipfSegmenter {
    /// Build from a ranked list, most frequent word first.
    ///
    /// Lines may carry a trailing count (as in a frequency list); only the
    /// first field and the line order are used. A repeated word keeps its
    /// best rank.
    pub fn from_ranked_words(content: &str) -> Self {
        let words: Vec<String> = parse_word_lines(content)
            .map(|(word, _)| word.to_lowercase())
            .collect();
        let log_n = (words.len().max(2) as f64).ln();

        let mut costs = HashMap::with_capacity(words.len());
        let mut max_word_len = 0;
        for (rank, word) in words.into_iter().enumerate() {
            max_word_len = max_word_len.max(word.chars().count());
            costs
                .entry(word)
                .or_insert_with(|| ((rank + 1) as f64 * log_n).ln());
        }

        Self {
            costs,
            max_word_len,
        }
    }

    /// Load a ranked list from `dict_dir/file_name`.
    pub fn load(dict_dir: &Path, file_name: &str) -> Result<Self, LoadError> {
        let segmenter = match read_optional(&dict_dir.join(file_name))? {
            Some(content) => Self::from_ranked_words(&content),
            None => {
                tracing::warn!(file = file_name, "segmentation word list not found");
                Self::from_ranked_words("")
            }
        };
        tracing::info!(
            file = file_name,
            words = segmenter.costs.len(),
            max_word_len = segmenter.max_word_len,
            "loaded segmentation word list"
        );
        Ok(segmenter)
    }

    pub fn is_loaded(&self) -> bool {
        !self.costs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    fn word_cost(&self, word: &str) -> f64 {
        self.costs.get(word).copied().unwrap_or(f64::INFINITY)
    }

    /// Cheapest split of `token`, or `None` if no finite-cost split exists.
    fn split(&self, token: &str) -> Option<Vec<String>> {
        let original: Vec<char> = token.chars().collect();
        let lower: Vec<char> = original
            .iter()
            .map(|c| c.to_lowercase().next().unwrap_or(*c))
            .collect();
        let n = lower.len();

        // best[i] = (cost of cheapest split of lower[..i], length of its last word)
        let mut best: Vec<(f64, usize)> = Vec::with_capacity(n + 1);
        best.push((0.0, 0));
        let mut candidate = String::new();
        for i in 1..=n {
            let mut choice = (f64::INFINITY, 1);
            for k in 1..=i.min(self.max_word_len) {
                candidate.clear();
                candidate.extend(&lower[i - k..i]);
                let cost = best[i - k].0 + self.word_cost(&candidate);
                if cost < choice.0 {
                    choice = (cost, k);
                }
            }
            best.push(choice);
        }

        if !best[n].0.is_finite() {
            return None;
        }

        let mut pieces: Vec<String> = Vec::new();
        let mut i = n;
        while i > 0 {
            let k = best[i].1;
            let piece: String = original[i - k..i].iter().collect();
            // digits split apart by the cost model are glued back together
            let glue = ends_with_digit(&piece) && pieces.last().is_some_and(|p| starts_with_digit(p));
            if glue {
                let last = pieces.len() - 1;
                pieces[last].insert_str(0, &piece);
            } else {
                pieces.push(piece);
            }
            i -= k;
        }
        pieces.reverse();
        Some(pieces)
    }
}

impl Segmenter for ZipfSegmenter {
    fn segment(&self, token: &str) -> Result<Vec<String>> {
        if !self.is_loaded() {
            return Err(NormalizeError::segmenter_unavailable(
                "no segmentation word list loaded",
            ));
        }
        if token.is_empty() {
            return Ok(vec![token.to_string()]);
        }
        Ok(self
            .split(token)
            .unwrap_or_else(|| vec![token.to_string()]))
    }
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn ends_with_digit(s: &str) -> bool {
    s.chars().last().is_some_and(|c| c.is_ascii_digit())
}
