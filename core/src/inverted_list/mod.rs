// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! Postings and the inverted index built from them.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::artifact::InvertedListRow;
use crate::document::DocumentReader;
use crate::tokenizer::{self, Stem, StemmerMode};
use crate::DocId;

pub const RECORD_TAG: &str = "RECORD";
pub const ID_FIELD: &str = "RECORDNUM";
pub const BODY_FIELD: &str = "ABSTRACT";
pub const FALLBACK_BODY_FIELD: &str = "EXTRACT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub word: String,
    pub doc: DocId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusDocument {
    pub id: DocId,
    pub body: String,
}

pub fn parse_id(value: &str) -> Option<u32> {
    value.trim().parse().ok().filter(|id| *id > 0)
}

/// Word -> documents containing it. A document appears once per occurrence of
/// the word, in the order the postings were emitted. Words are kept in
/// lexicographic order so the persisted index is reproducible.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    entries: BTreeMap<String, Vec<DocId>>,
}

impl InvertedIndex {
    pub fn from_postings<I>(postings: I) -> Self
    where
        I: IntoIterator<Item = Posting>,
    {
        let mut entries: BTreeMap<String, Vec<DocId>> = BTreeMap::new();

        for posting in postings {
            if posting.word.is_empty() {
                continue;
            }

            entries.entry(posting.word).or_default().push(posting.doc);
        }

        Self { entries }
    }

    pub fn get(&self, word: &str) -> Option<&[DocId]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &[DocId])> {
        self.entries
            .iter()
            .map(|(word, docs)| (word.as_str(), docs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every distinct document of the index in ascending order.
    pub fn documents(&self) -> Vec<DocId> {
        self.entries
            .values()
            .flatten()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn max_doc(&self) -> Option<DocId> {
        self.entries.values().flatten().copied().max()
    }

    pub fn to_rows(&self) -> Vec<InvertedListRow> {
        self.entries
            .iter()
            .map(|(word, docs)| InvertedListRow {
                word: word.clone(),
                docs: docs.clone(),
            })
            .collect()
    }
}

impl From<Vec<InvertedListRow>> for InvertedIndex {
    fn from(rows: Vec<InvertedListRow>) -> Self {
        let mut entries: BTreeMap<String, Vec<DocId>> = BTreeMap::new();

        for row in rows {
            if row.word.is_empty() {
                continue;
            }

            entries.entry(row.word).or_default().extend(row.docs);
        }

        Self { entries }
    }
}

/// Pulls id and body out of a corpus record. The body is the abstract, or the
/// extract for records without one.
pub fn extract_document<R: DocumentReader>(
    reader: &R,
    record: &R::Record,
    position: usize,
) -> Result<CorpusDocument, crate::Error> {
    let id = reader
        .field_value(record, ID_FIELD)
        .as_deref()
        .and_then(parse_id)
        .ok_or(crate::Error::MissingField {
            record: position,
            field: ID_FIELD,
        })?;

    let body = reader
        .field_value(record, BODY_FIELD)
        .or_else(|| reader.field_value(record, FALLBACK_BODY_FIELD))
        .ok_or(crate::Error::MissingField {
            record: position,
            field: BODY_FIELD,
        })?;

    Ok(CorpusDocument { id, body })
}

pub fn postings(document: &CorpusDocument, stemmer: &dyn Stem) -> Vec<Posting> {
    tokenizer::analyze(&document.body, stemmer)
        .into_iter()
        .map(|word| Posting {
            word,
            doc: document.id,
        })
        .collect()
}

/// Accumulates postings from one or more corpus files.
pub struct InvertedListBuilder {
    stemmer: Box<dyn Stem>,
    postings: Vec<Posting>,
    seen: BTreeSet<DocId>,
    skipped: usize,
}

impl InvertedListBuilder {
    pub fn new(mode: StemmerMode) -> Self {
        Self {
            stemmer: mode.stemmer(),
            postings: Vec::new(),
            seen: BTreeSet::new(),
            skipped: 0,
        }
    }

    /// Adds every record with the given tag. Records are analyzed in parallel
    /// and their postings appended in record order.
    pub fn add<R>(&mut self, reader: &R, record_tag: &str)
    where
        R: DocumentReader + Sync,
        R::Record: Sync,
    {
        let stemmer = self.stemmer.as_ref();
        let records = reader.records(record_tag);

        let analyzed: Vec<_> = records
            .par_iter()
            .enumerate()
            .map(|(position, record)| {
                extract_document(reader, record, position)
                    .map(|document| {
                        let postings = postings(&document, stemmer);
                        (document.id, postings)
                    })
            })
            .collect();

        for res in analyzed {
            match res {
                Ok((id, postings)) if postings.is_empty() => {
                    debug!("document {id} has no indexable words");
                    self.skipped += 1;
                }
                Ok((id, postings)) => {
                    self.seen.insert(id);
                    self.postings.extend(postings);
                }
                Err(err) => {
                    debug!("skipping record: {err}");
                    self.skipped += 1;
                }
            }
        }
    }

    /// Maximum id of the documents that produced postings, i.e. the largest
    /// document id of the built index. Only equal to the corpus size when ids
    /// are dense and start at 1.
    pub fn corpus_size_proxy(&self) -> u32 {
        self.seen.last().copied().unwrap_or(0)
    }

    #[cfg(test)]
    fn num_documents(&self) -> usize {
        self.seen.len()
    }

    pub fn build(self) -> (InvertedIndex, u32) {
        let corpus_size = self.corpus_size_proxy();

        if corpus_size as usize != self.seen.len() {
            warn!(
                "corpus size proxy {} differs from the {} documents read; document ids are not dense and 1-based",
                corpus_size,
                self.seen.len()
            );
        }

        info!(
            "{} postings from {} documents ({} records skipped)",
            self.postings.len(),
            self.seen.len(),
            self.skipped
        );

        (InvertedIndex::from_postings(self.postings), corpus_size)
    }
}
