// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! Text normalization and tokenization.
//!
//! [`normalize`] never fails: every input maps to upper-cased ASCII text
//! without `;`, control characters or the stripped punctuation. Tokens are the
//! whitespace separated words of the normalized text that are not stop words.
//! Stemming is left to the callers through [`stemmer::Stem`].

pub mod normalizer;
pub mod stemmer;
pub mod stopwords;

pub use stemmer::{Stem, StemmerMode};

/// Tokens of this length or shorter are never indexed.
pub const MAX_DISCARDED_TOKEN_LEN: usize = 2;

pub fn normalize(text: &str) -> String {
    normalizer::PIPELINE
        .iter()
        .fold(text.to_string(), |text, step| step.normalize(&text))
}

pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized
        .split_whitespace()
        .filter(|token| !stopwords::is_stopword(token))
        .map(str::to_string)
        .collect()
}

pub fn is_indexable(token: &str) -> bool {
    token.chars().count() > MAX_DISCARDED_TOKEN_LEN
}

/// Normalizes, tokenizes, stems and drops short tokens. This is the analysis
/// applied to document bodies; queries only go through [`normalize`] and
/// [`tokenize`].
pub fn analyze(text: &str, stemmer: &dyn Stem) -> Vec<String> {
    tokenize(&normalize(text))
        .into_iter()
        .map(|token| stemmer.stem(&token))
        .filter(|token| is_indexable(token))
        .collect()
}
