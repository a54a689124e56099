//! Normalizer configuration.
//!
//! A JSON file with every field optional:
//!
//! ```json
//! {
//!   "dictionary_dir": "dictionaries",
//!   "frequency_list": "en_words.txt",
//!   "hunspell": ["en_US"],
//!   "max_edit_distance": 2,
//!   "contractions": [{ "pattern": "won't", "expansion": "will not" }]
//! }
//! ```

use crate::contractions::{ContractionPair, ContractionTable};
use crate::dictionary::{DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_MAX_TOKEN_LEN, Lexicon};
use crate::error::LoadError;
use crate::normalizer::{DEFAULT_PARALLEL_TOKEN_THRESHOLD, Normalizer};
use crate::segmenter::ZipfSegmenter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Normalizer built from files on disk.
pub type DictionaryNormalizer = Normalizer<Lexicon, ZipfSegmenter>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizerConfig {
    /// Directory holding the word lists and Hunspell files.
    pub dictionary_dir: PathBuf,
    /// Frequency list file name inside `dictionary_dir`.
    pub frequency_list: String,
    /// Ranked list for segmentation; defaults to `frequency_list`.
    pub segmentation_list: Option<String>,
    /// Hunspell dictionary names (`<name>.aff` + `<name>.dic`).
    pub hunspell: Vec<String>,
    pub max_edit_distance: u8,
    pub max_token_len: usize,
    pub parallel_token_threshold: usize,
    /// Replaces the built-in contraction table when present. Order matters.
    pub contractions: Option<Vec<ContractionPair>>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            dictionary_dir: PathBuf::from("dictionaries"),
            frequency_list: "en_words.txt".to_string(),
            segmentation_list: None,
            hunspell: vec!["en_US".to_string()],
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
            parallel_token_threshold: DEFAULT_PARALLEL_TOKEN_THRESHOLD,
            contractions: None,
        }
    }
}

impl NormalizerConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| LoadError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if self.max_edit_distance > 2 {
            return Err(LoadError::Setting {
                field: "max_edit_distance",
                reason: format!("must be 0, 1 or 2, got {}", self.max_edit_distance),
            });
        }
        if self.frequency_list.trim().is_empty() {
            return Err(LoadError::Setting {
                field: "frequency_list",
                reason: "must name a file".to_string(),
            });
        }
        Ok(())
    }

    pub fn segmentation_list(&self) -> &str {
        self.segmentation_list
            .as_deref()
            .unwrap_or(&self.frequency_list)
    }

    pub fn contraction_table(&self) -> Result<ContractionTable, LoadError> {
        match &self.contractions {
            Some(pairs) => ContractionTable::from_config(pairs),
            None => Ok(ContractionTable::english()),
        }
    }

    /// Load dictionaries and assemble a ready normalizer.
    pub fn build(&self) -> Result<DictionaryNormalizer, LoadError> {
        self.validate()?;
        let table = self.contraction_table()?;

        let lexicon = Lexicon::load(&self.dictionary_dir, &self.frequency_list, &self.hunspell)?
            .with_max_edit_distance(self.max_edit_distance)
            .with_max_token_len(self.max_token_len);
        let segmenter = ZipfSegmenter::load(&self.dictionary_dir, self.segmentation_list())?;

        tracing::info!(
            dictionary_dir = %self.dictionary_dir.display(),
            contraction_rules = table.len(),
            "normalizer ready"
        );

        Ok(Normalizer::new(lexicon, segmenter)
            .with_contractions(table)
            .with_parallel_token_threshold(self.parallel_token_threshold))
    }
}
