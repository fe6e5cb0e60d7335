// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! Typed records for the `;`-delimited files passed between stages.
//!
//! Every file starts with a header row, which is written even when there are
//! no rows. Any malformed row makes the whole read fail with
//! [`crate::Error::Parse`].

pub mod codec;
pub mod model;

use std::path::Path;

use anyhow::Context;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::ranking::RankingEntry;
use crate::{DocId, QueryId, Result};

pub const DELIMITER: u8 = b';';

pub trait Artifact: Serialize + DeserializeOwned {
    const HEADER: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvertedListRow {
    #[serde(rename = "WORD")]
    pub word: String,
    #[serde(rename = "DOCUMENTS_LIST", with = "codec::doc_list")]
    pub docs: Vec<DocId>,
}

impl Artifact for InvertedListRow {
    const HEADER: &'static [&'static str] = &["WORD", "DOCUMENTS_LIST"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRow {
    #[serde(rename = "NUMBER")]
    pub number: QueryId,
    #[serde(rename = "TEXT")]
    pub text: String,
}

impl Artifact for QueryRow {
    const HEADER: &'static [&'static str] = &["NUMBER", "TEXT"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgmentRow {
    #[serde(rename = "NUMBER")]
    pub query: QueryId,
    #[serde(rename = "DOCNUMBER")]
    pub doc: DocId,
    #[serde(rename = "DOCVOTES")]
    pub votes: u32,
}

impl Artifact for JudgmentRow {
    const HEADER: &'static [&'static str] = &["NUMBER", "DOCNUMBER", "DOCVOTES"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultRow {
    #[serde(rename = "Query")]
    pub query: QueryId,
    #[serde(rename = "Ranking", with = "codec::ranking")]
    pub ranking: Vec<RankingEntry>,
}

impl Artifact for SearchResultRow {
    const HEADER: &'static [&'static str] = &["Query", "Ranking"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    #[serde(rename = "Query")]
    pub query: QueryId,
    #[serde(rename = "Precision")]
    pub precision: f64,
    #[serde(rename = "Recall")]
    pub recall: f64,
    #[serde(rename = "F1")]
    pub f1: f64,
}

impl Artifact for MetricsRow {
    const HEADER: &'static [&'static str] = &["Query", "Precision", "Recall", "F1"];
}

pub(crate) fn parse_error(path: &Path, err: csv::Error) -> anyhow::Error {
    let line = err.position().map(|pos| pos.line()).unwrap_or(0);

    crate::Error::Parse {
        path: path.to_path_buf(),
        line,
        reason: err.to_string(),
    }
    .into()
}

pub(crate) fn writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))
}

pub(crate) fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))
}

pub fn write<T, P>(path: P, rows: &[T]) -> Result<()>
where
    T: Artifact,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut wtr = writer(path)?;

    wtr.write_record(T::HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    Ok(())
}

pub fn read<T, P>(path: P) -> Result<Vec<T>>
where
    T: Artifact,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut rdr = reader(path)?;

    rdr.deserialize()
        .map(|row| row.map_err(|err| parse_error(path, err)))
        .collect()
}
