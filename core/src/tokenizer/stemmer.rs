// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

use std::str::FromStr;

use rust_stemmers::Algorithm;

pub trait Stem: Send + Sync {
    fn stem(&self, token: &str) -> String;
}

/// Snowball English stemmer. Tokens are upper-cased throughout the pipeline
/// while the algorithm works on lower-case input, so the token is lowered
/// before stemming and the stem raised again afterwards.
pub struct Stemmer(rust_stemmers::Stemmer);

impl Default for Stemmer {
    fn default() -> Self {
        Stemmer(rust_stemmers::Stemmer::create(Algorithm::English))
    }
}

impl Stem for Stemmer {
    fn stem(&self, token: &str) -> String {
        self.0.stem(&token.to_lowercase()).to_uppercase()
    }
}

pub struct NoStemmer;

impl Stem for NoStemmer {
    fn stem(&self, token: &str) -> String {
        token.to_string()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StemmerMode {
    Stemmer,
    #[default]
    NoStemmer,
}

impl StemmerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StemmerMode::Stemmer => "STEMMER",
            StemmerMode::NoStemmer => "NOSTEMMER",
        }
    }

    pub fn stemmer(self) -> Box<dyn Stem> {
        match self {
            StemmerMode::Stemmer => Box::<Stemmer>::default(),
            StemmerMode::NoStemmer => Box::new(NoStemmer),
        }
    }
}

impl FromStr for StemmerMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STEMMER" => Ok(Self::Stemmer),
            "NOSTEMMER" => Ok(Self::NoStemmer),
            s => anyhow::bail!("Unknown stemmer mode: {s}"),
        }
    }
}
