// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! Batch vector-space retrieval.
//!
//! The pipeline is a chain of stages that each persist a `;`-delimited
//! artifact before the next one starts:
//!
//! query xml  -> [`query`]         -> queries + judgments
//! corpus xml -> [`inverted_list`] -> [`index`] -> [`ranking`] -> [`evaluation`]

use std::path::PathBuf;

use thiserror::Error;

pub mod artifact;
pub mod config;
pub mod document;
pub mod entrypoint;
pub mod evaluation;
pub mod index;
pub mod inverted_list;
pub mod query;
pub mod ranking;
pub mod tokenizer;

/// Positive integer identifier of a corpus document.
pub type DocId = u32;

/// Positive integer identifier of a query.
pub type QueryId = u32;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration key {key} not found in {path}")]
    Configuration { path: PathBuf, key: String },

    #[error("failed to parse {path} at line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("record {record} has no usable {field} field")]
    MissingField { record: usize, field: &'static str },

    #[error("malformed xml: {0}")]
    Xml(#[from] quick_xml::Error),
}

pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Ratio that is defined as 0 whenever the denominator is 0.
#[inline]
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
