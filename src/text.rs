//! Canonicalization and tokenization.

use std::borrow::Cow;
use unicode_normalization::{UnicodeNormalization, is_nfkc};

/// NFKC-normalize and fold typographic apostrophes and quotes to ASCII.
///
/// Runs before contraction expansion, so `won’t` is seen as `won't`.
pub fn canonicalize(text: &str) -> Cow<'_, str> {
    let needs_nfkc = !is_nfkc(text);
    let needs_fold = text.chars().any(|c| fold_quote(c).is_some());
    if !needs_nfkc && !needs_fold {
        return Cow::Borrowed(text);
    }

    let folded: String = if needs_nfkc {
        text.nfkc().map(|c| fold_quote(c).unwrap_or(c)).collect()
    } else {
        text.chars().map(|c| fold_quote(c).unwrap_or(c)).collect()
    };
    Cow::Owned(folded)
}

fn fold_quote(c: char) -> Option<char> {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{201B}' | '\u{02BC}' | '\u{2032}' => Some('\''),
        '\u{201C}' | '\u{201D}' | '\u{201F}' | '\u{2033}' => Some('"'),
        _ => None,
    }
}

/// Member of the fixed punctuation set (ASCII punctuation).
#[inline]
pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// Remove punctuation and split on whitespace runs.
///
/// Punctuation is deleted, not replaced, so `state-of-the-art` stays a
/// single token.
pub fn tokenize(text: &str) -> Vec<String> {
    let stripped: String = text.chars().filter(|c| !is_punctuation(*c)).collect();
    stripped.split_whitespace().map(str::to_string).collect()
}
