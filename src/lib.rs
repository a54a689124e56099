//! Lexical normalization for free-form text.
//!
//! Contractions are expanded, punctuation stripped, and every token is
//! either kept (already a word), replaced by its nearest valid word, or
//! split into words when no close single-word match exists:
//!
//! ```
//! use lexnorm::{Lexicon, Normalizer, ZipfSegmenter};
//!
//! let words = "the 100\ncat 60\nsat 40\nwill 30\nnot 30\n";
//! let normalizer = Normalizer::new(
//!     Lexicon::from_word_counts(words),
//!     ZipfSegmenter::from_ranked_words(words),
//! );
//! assert_eq!(
//!     normalizer.normalize("Teh cat won't... thecatsat!").unwrap(),
//!     "the cat will not the cat sat"
//! );
//! ```

pub mod config;
pub mod contractions;
pub mod dictionary;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod oracle;
pub mod resolver;
pub mod segmenter;
pub mod text;

#[cfg(feature = "python")]
mod python;

pub use config::{DictionaryNormalizer, NormalizerConfig};
pub use contractions::{ContractionPair, ContractionRule, ContractionTable};
pub use dictionary::Lexicon;
pub use error::{Dependency, LoadError, NormalizeError};
pub use normalizer::{Normalized, Normalizer, reassemble};
pub use oracle::{LexicalOracle, Segmenter};
pub use resolver::{CorrectionOutcome, OutcomeCounts, resolve};
pub use segmenter::ZipfSegmenter;
