// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

use unicode_normalization::UnicodeNormalization;

pub trait Normalizer: Send + Sync {
    fn normalize(&self, text: &str) -> String;
}

/// Decomposes the text (NFKD) and drops everything that is not ASCII,
/// which leaves accented letters as their base letter.
pub struct AsciiFold;

impl Normalizer for AsciiFold {
    fn normalize(&self, text: &str) -> String {
        text.nfkd().filter(char::is_ascii).collect()
    }
}

/// Removes every occurrence of the given characters.
pub struct Strip(pub &'static [char]);

impl Normalizer for Strip {
    fn normalize(&self, text: &str) -> String {
        text.chars().filter(|c| !self.0.contains(c)).collect()
    }
}

/// Tab, newline, carriage return and the remaining ASCII control
/// characters all become a plain space.
pub struct ControlToSpace;

impl Normalizer for ControlToSpace {
    fn normalize(&self, text: &str) -> String {
        text.chars()
            .map(|c| if c.is_ascii_control() { ' ' } else { c })
            .collect()
    }
}

pub struct CollapseWhitespace;

impl Normalizer for CollapseWhitespace {
    fn normalize(&self, text: &str) -> String {
        let mut res = String::with_capacity(text.len());
        let mut prev_was_space = false;

        for c in text.chars() {
            if c.is_whitespace() {
                if !prev_was_space {
                    res.push(' ');
                }
                prev_was_space = true;
            } else {
                res.push(c);
                prev_was_space = false;
            }
        }

        res
    }
}

pub struct Uppercase;

impl Normalizer for Uppercase {
    fn normalize(&self, text: &str) -> String {
        text.to_ascii_uppercase()
    }
}

/// The fixed normalization pipeline. Stripping punctuation can leave two
/// spaces next to each other, so whitespace is collapsed once more at the end
/// to keep the pipeline idempotent.
pub const PIPELINE: &[&dyn Normalizer] = &[
    &AsciiFold,
    &Strip(&[';']),
    &ControlToSpace,
    &CollapseWhitespace,
    &Strip(&['"', '\'']),
    &Strip(&['(', ')']),
    &Strip(&['{', '}', '[', ']']),
    &Strip(&['.', ',', '!', '?', '-', '/', '(', ')']),
    &Uppercase,
    &CollapseWhitespace,
];
