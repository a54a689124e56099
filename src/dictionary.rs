//! Frequency-list and Hunspell backed lexical oracle.
//!
//! A word is valid when the frequency list knows it (case-insensitively)
//! or any loaded Hunspell dictionary accepts it. Corrections are drawn
//! from the frequency list only: the most frequent known word within one
//! edit, then within two.

use crate::error::{LoadError, NormalizeError, Result};
use crate::oracle::LexicalOracle;
use crate::text::is_punctuation;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;
use zspell::Dictionary;

pub const DEFAULT_MAX_EDIT_DISTANCE: u8 = 2;
pub const DEFAULT_MAX_TOKEN_LEN: usize = 32;

/// Word frequencies plus optional Hunspell dictionaries.
pub struct Lexicon {
    frequencies: HashMap<String, u64>,
    alphabet: Vec<char>,
    hunspell: Vec<(String, Dictionary)>,
    max_edit_distance: u8,
    max_token_len: usize,
}

impl Lexicon {
    /// Build from the contents of a frequency list.
    ///
    /// Each line is `word` or `word count`; `#` starts a comment line.
    /// Words are lowercased and repeated words accumulate.
    pub fn from_word_counts(content: &str) -> Self {
        let mut frequencies: HashMap<String, u64> = HashMap::new();
        for (word, count) in parse_word_lines(content) {
            *frequencies.entry(word.to_lowercase()).or_insert(0) += count.unwrap_or(1);
        }
        let alphabet = alphabet_of(frequencies.keys());
        Self {
            frequencies,
            alphabet,
            hunspell: Vec::new(),
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
        }
    }

    /// Load `frequency_list` and the named Hunspell dictionaries from `dict_dir`.
    ///
    /// Missing files and unbuildable Hunspell dictionaries are logged and
    /// skipped. A missing directory or an unreadable frequency list is an
    /// error. A lexicon that ends up with nothing loaded answers every
    /// query with `DependencyUnavailable`.
    pub fn load(
        dict_dir: &Path,
        frequency_list: &str,
        hunspell_names: &[String],
    ) -> Result<Self, LoadError> {
        if !dict_dir.is_dir() {
            return Err(LoadError::DirectoryNotFound {
                path: dict_dir.to_path_buf(),
            });
        }

        let mut lexicon = match read_optional(&dict_dir.join(frequency_list))? {
            Some(content) => {
                let lexicon = Self::from_word_counts(&content);
                tracing::info!(
                    file = frequency_list,
                    words = lexicon.frequencies.len(),
                    "loaded frequency list"
                );
                lexicon
            }
            None => {
                tracing::warn!(file = frequency_list, "frequency list not found");
                Self::from_word_counts("")
            }
        };

        for name in hunspell_names {
            if let Some(dict) = load_dict(dict_dir, name) {
                lexicon.hunspell.push((name.clone(), dict));
            }
        }

        tracing::info!("{}", lexicon.stats());
        Ok(lexicon)
    }

    pub fn with_hunspell(mut self, name: impl Into<String>, dict: Dictionary) -> Self {
        self.hunspell.push((name.into(), dict));
        self
    }

    pub fn with_max_edit_distance(mut self, distance: u8) -> Self {
        self.max_edit_distance = distance;
        self
    }

    pub fn with_max_token_len(mut self, len: usize) -> Self {
        self.max_token_len = len;
        self
    }

    /// Frequency of the lowercased word, 0 if unknown.
    pub fn frequency(&self, word: &str) -> u64 {
        self.frequencies
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    pub fn is_loaded(&self) -> bool {
        !self.frequencies.is_empty() || !self.hunspell.is_empty()
    }

    pub fn stats(&self) -> String {
        let names: Vec<&str> = self.hunspell.iter().map(|(n, _)| n.as_str()).collect();
        format!(
            "Lexicon loaded: words={}, hunspell=[{}], max_edit_distance={}",
            self.frequencies.len(),
            names.join(", "),
            self.max_edit_distance
        )
    }

    /// Check a word against the frequency list and every Hunspell dictionary.
    pub fn check(&self, word: &str) -> bool {
        if self.frequency(word) > 0 {
            return true;
        }
        if self.check_hunspell(word) {
            return true;
        }
        let lower = word.to_lowercase();
        lower != word && self.check_hunspell(&lower)
    }

    fn check_hunspell(&self, word: &str) -> bool {
        self.hunspell.iter().any(|(_, d)| d.check_word(word))
    }

    /// Most frequent known word closest to `word`, if any.
    pub fn best_candidate(&self, word: &str) -> Option<String> {
        let lower = word.to_lowercase();
        if self.frequencies.contains_key(&lower) {
            return Some(lower);
        }
        if lower.chars().count() > self.max_token_len
            || self.max_edit_distance == 0
            || is_numeric(&lower)
        {
            return None;
        }

        let first = self.edits1(&lower);
        if let Some(best) = self.most_frequent(first.iter().map(String::as_str)) {
            return Some(best);
        }
        if self.max_edit_distance < 2 {
            return None;
        }

        let mut known = HashSet::new();
        for edit in &first {
            for second in self.edits1(edit) {
                if self.frequencies.contains_key(&second) {
                    known.insert(second);
                }
            }
        }
        self.most_frequent(known.iter().map(String::as_str))
    }

    fn most_frequent<'a>(&self, words: impl Iterator<Item = &'a str>) -> Option<String> {
        words
            .filter_map(|w| self.frequencies.get(w).map(|f| (w, *f)))
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(w, _)| w.to_string())
    }

    /// All strings one deletion, transposition, replacement or insertion away.
    fn edits1(&self, word: &str) -> HashSet<String> {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        let mut edits = HashSet::with_capacity((n + 1) * (2 * self.alphabet.len() + 2));

        for i in 0..=n {
            let (left, right) = chars.split_at(i);
            if !right.is_empty() {
                edits.insert(join(left, &[], &right[1..]));
            }
            if right.len() > 1 {
                edits.insert(join(left, &[right[1], right[0]], &right[2..]));
            }
            for &c in &self.alphabet {
                if !right.is_empty() && right[0] != c {
                    edits.insert(join(left, &[c], &right[1..]));
                }
                edits.insert(join(left, &[c], right));
            }
        }
        edits
    }
}

impl LexicalOracle for Lexicon {
    fn is_valid(&self, token: &str) -> Result<bool> {
        if !self.is_loaded() {
            return Err(NormalizeError::oracle_unavailable("no dictionaries loaded"));
        }
        Ok(self.check(token))
    }

    fn nearest(&self, token: &str) -> Result<String> {
        if !self.is_loaded() {
            return Err(NormalizeError::oracle_unavailable("no dictionaries loaded"));
        }
        Ok(self
            .best_candidate(token)
            .unwrap_or_else(|| token.to_string()))
    }
}

/// Numbers and tokens without letters are never corrected.
fn is_numeric(word: &str) -> bool {
    !word.chars().any(char::is_alphabetic) || word.parse::<f64>().is_ok()
}

fn join(left: &[char], middle: &[char], right: &[char]) -> String {
    left.iter().chain(middle).chain(right).collect()
}

fn alphabet_of<'a>(words: impl Iterator<Item = &'a String>) -> Vec<char> {
    let letters: BTreeSet<char> = words
        .flat_map(|w| w.chars())
        .filter(|c| c.is_alphabetic())
        .collect();
    letters.into_iter().collect()
}

/// Split word-list lines into `(word, count)`, skipping blanks and comments.
///
/// Words containing punctuation are dropped; tokens never carry any.
pub(crate) fn parse_word_lines(content: &str) -> impl Iterator<Item = (&str, Option<u64>)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let word = fields.next()?;
            if word.chars().any(is_punctuation) {
                return None;
            }
            let count = fields.next().and_then(|c| c.parse().ok());
            Some((word, count))
        })
}

/// Read a file, mapping "not found" to `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, LoadError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(LoadError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// `<name>.aff` + `<name>.dic` from `dict_dir`; `None` when absent or unusable.
fn load_dict(dict_dir: &Path, name: &str) -> Option<Dictionary> {
    let read = |ext: &str| {
        let path = dict_dir.join(format!("{name}.{ext}"));
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!(
                    dictionary = name,
                    path = %path.display(),
                    error = %e,
                    "skipping Hunspell dictionary"
                );
                None
            }
        }
    };
    let (aff, dic) = (read("aff")?, read("dic")?);

    match zspell::builder().config_str(&aff).dict_str(&dic).build() {
        Ok(dict) => {
            tracing::info!(dictionary = name, "loaded Hunspell dictionary");
            Some(dict)
        }
        Err(e) => {
            tracing::warn!(dictionary = name, error = %e, "unparsable Hunspell dictionary");
            None
        }
    }
}
