// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! TF-IDF weighting of an inverted index.
//!
//! ```text
//! weight(word, d) = (1 + log2(tf)) * log2(corpus_size / df)
//! ```
//!
//! where `tf` is the number of occurrences of `word` in `d` and `df` the number
//! of distinct documents containing it. The corpus size is the maximum
//! document id, so the idf factor becomes negative when the ids are sparse
//! enough that `corpus_size < df`. Such weights are kept as they are.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::info;

use crate::inverted_list::InvertedIndex;
use crate::tokenizer;
use crate::DocId;

#[derive(Debug, Clone, PartialEq)]
pub struct TermWeights {
    pub word: String,
    /// One weight per document, in [`TfIdfModel::documents`] order.
    pub weights: Vec<f64>,
}

/// Dense word x document weight matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfModel {
    documents: Vec<DocId>,
    rows: Vec<TermWeights>,
}

impl TfIdfModel {
    pub fn new(documents: Vec<DocId>, rows: Vec<TermWeights>) -> Self {
        Self { documents, rows }
    }

    pub fn documents(&self) -> &[DocId] {
        &self.documents
    }

    pub fn rows(&self) -> &[TermWeights] {
        &self.rows
    }

    pub fn weight(&self, word: &str, doc: DocId) -> f64 {
        let Some(column) = self.documents.iter().position(|d| *d == doc) else {
            return 0.0;
        };

        self.rows
            .iter()
            .find(|row| row.word == word)
            .and_then(|row| row.weights.get(column))
            .copied()
            .unwrap_or(0.0)
    }
}

pub fn tf_idf(tf: usize, corpus_size: u32, df: usize) -> f64 {
    if tf == 0 || df == 0 {
        return 0.0;
    }

    (1.0 + (tf as f64).log2()) * (corpus_size as f64 / df as f64).log2()
}

pub struct Indexer {
    corpus_size: u32,
}

impl Indexer {
    pub fn new(corpus_size: u32) -> Self {
        Self { corpus_size }
    }

    /// Uses the largest document id of the index as corpus size, the same
    /// proxy the inverted list builder reports.
    pub fn for_index(index: &InvertedIndex) -> Self {
        Self::new(index.max_doc().unwrap_or(0))
    }

    #[cfg(test)]
    fn corpus_size(&self) -> u32 {
        self.corpus_size
    }

    pub fn build(&self, index: &InvertedIndex) -> TfIdfModel {
        let documents = index.documents();
        let columns: HashMap<DocId, usize> = documents
            .iter()
            .enumerate()
            .map(|(column, doc)| (*doc, column))
            .collect();

        let entries: Vec<_> = index
            .entries()
            .filter(|(word, _)| tokenizer::is_indexable(word))
            .collect();

        let rows: Vec<TermWeights> = entries
            .par_iter()
            .map(|(word, docs)| TermWeights {
                word: word.to_string(),
                weights: self.row(docs, &columns, documents.len()),
            })
            .collect();

        info!(
            "weighted {} words over {} documents (corpus size {})",
            rows.len(),
            documents.len(),
            self.corpus_size
        );

        TfIdfModel::new(documents, rows)
    }

    fn row(&self, docs: &[DocId], columns: &HashMap<DocId, usize>, num_docs: usize) -> Vec<f64> {
        let mut tf = vec![0usize; num_docs];
        for doc in docs {
            tf[columns[doc]] += 1;
        }

        let df = tf.iter().filter(|tf| **tf > 0).count();

        tf.into_iter()
            .map(|tf| tf_idf(tf, self.corpus_size, df))
            .collect()
    }
}
