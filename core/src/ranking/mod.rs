// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! Ranking of every indexed document against a free-text query.
//!
//! ```text
//! score(q, d) = sum(weight(t, d) for t in q) / sum(weight(t, d)^2 for t in all terms)
//! ```
//!
//! The numerator only sees query tokens that are terms of the model, while
//! the denominator runs over the whole vocabulary. There is no square root and
//! no query norm, so this is not a cosine similarity. Scores are kept in this
//! form so results stay comparable with previously computed rankings.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::index::TfIdfModel;
use crate::query::Query;
use crate::{ratio, tokenizer, DocId, QueryId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingEntry {
    pub rank: usize,
    pub doc: DocId,
    pub score: f64,
}

pub struct SearchEngine {
    model: TfIdfModel,
    terms: HashMap<String, usize>,
    /// Sum of squared weights of every term, per document column.
    denominators: Vec<f64>,
}

impl SearchEngine {
    pub fn new(model: TfIdfModel) -> Self {
        let terms = model
            .rows()
            .iter()
            .enumerate()
            .map(|(row, weights)| (weights.word.clone(), row))
            .collect();

        let mut denominators = vec![0.0; model.documents().len()];
        for row in model.rows() {
            for (denominator, weight) in denominators.iter_mut().zip(&row.weights) {
                *denominator += weight * weight;
            }
        }

        Self {
            model,
            terms,
            denominators,
        }
    }

    pub fn documents(&self) -> &[DocId] {
        self.model.documents()
    }

    /// Score of every document, in document order.
    pub fn scores(&self, tokens: &[String]) -> Vec<f64> {
        let mut numerators = vec![0.0; self.denominators.len()];

        for token in tokens {
            let Some(&row) = self.terms.get(token) else {
                continue;
            };

            for (numerator, weight) in numerators.iter_mut().zip(&self.model.rows()[row].weights) {
                *numerator += weight;
            }
        }

        numerators
            .into_iter()
            .zip(&self.denominators)
            .map(|(numerator, denominator)| ratio(numerator, *denominator))
            .collect()
    }

    /// Ranks all documents by descending score. Ties keep document order and
    /// ranks run from 1 to the number of documents.
    pub fn rank(&self, text: &str) -> Vec<RankingEntry> {
        let tokens = tokenizer::tokenize(&tokenizer::normalize(text));
        debug!("query tokens: {:?}", tokens);

        let mut scored: Vec<(usize, f64)> = self.scores(&tokens).into_iter().enumerate().collect();
        scored.sort_by(|(_, a), (_, b)| b.total_cmp(a));

        scored
            .into_iter()
            .enumerate()
            .map(|(pos, (column, score))| RankingEntry {
                rank: pos + 1,
                doc: self.documents()[column],
                score,
            })
            .collect()
    }

    /// Queries are independent of each other and ranked in parallel. Results
    /// come back in query order.
    pub fn search(&self, queries: &[Query]) -> Vec<(QueryId, Vec<RankingEntry>)> {
        queries
            .par_iter()
            .map(|query| (query.id, self.rank(&query.text)))
            .collect()
    }
}
