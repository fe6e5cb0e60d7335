// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! Precision, recall and F1 of produced rankings against relevance judgments.
//!
//! All three metrics are percentages in `[0, 100]`. A document is retrieved
//! when its score is above [`RETRIEVAL_THRESHOLD`] and relevant when it got at
//! least one vote.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use tracing::debug;

use crate::artifact::MetricsRow;
use crate::query::Judgment;
use crate::ranking::RankingEntry;
use crate::{ratio, DocId, QueryId};

pub const RETRIEVAL_THRESHOLD: f64 = 0.0001;
pub const RELEVANCE_THRESHOLD: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub query: QueryId,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl From<&Metrics> for MetricsRow {
    fn from(metrics: &Metrics) -> Self {
        Self {
            query: metrics.query,
            precision: metrics.precision,
            recall: metrics.recall,
            f1: metrics.f1,
        }
    }
}

pub fn precision(retrieved: &BTreeSet<DocId>, relevant: &BTreeSet<DocId>) -> f64 {
    let hits = retrieved.intersection(relevant).count();
    ratio(hits as f64, retrieved.len() as f64) * 100.0
}

pub fn recall(retrieved: &BTreeSet<DocId>, relevant: &BTreeSet<DocId>) -> f64 {
    let hits = retrieved.intersection(relevant).count();
    ratio(hits as f64, relevant.len() as f64) * 100.0
}

/// Harmonic mean of two percentages, computed on fractions and scaled back to
/// a percentage once.
pub fn f1(precision: f64, recall: f64) -> f64 {
    let p = precision / 100.0;
    let r = recall / 100.0;

    ratio(2.0 * p * r, p + r) * 100.0
}

/// Judgments in the ranking shape: per query, documents sorted by votes
/// descending (ties in judgment order) with 1-based ranks and the votes as
/// score.
pub fn expected_rankings(judgments: &[Judgment]) -> BTreeMap<QueryId, Vec<RankingEntry>> {
    let mut grouped: BTreeMap<QueryId, Vec<&Judgment>> = BTreeMap::new();
    for judgment in judgments {
        grouped.entry(judgment.query).or_default().push(judgment);
    }

    grouped
        .into_iter()
        .map(|(query, mut judgments)| {
            judgments.sort_by(|a, b| b.votes.cmp(&a.votes));

            let ranking = judgments
                .into_iter()
                .enumerate()
                .map(|(pos, judgment)| RankingEntry {
                    rank: pos + 1,
                    doc: judgment.doc,
                    score: judgment.votes as f64,
                })
                .collect();

            (query, ranking)
        })
        .collect()
}

fn above(ranking: Option<&Vec<RankingEntry>>, threshold: f64) -> BTreeSet<DocId> {
    ranking
        .into_iter()
        .flatten()
        .filter(|entry| entry.score > threshold)
        .map(|entry| entry.doc)
        .collect()
}

pub struct Validator {
    rankings: BTreeMap<QueryId, Vec<RankingEntry>>,
    expected: BTreeMap<QueryId, Vec<RankingEntry>>,
}

impl Validator {
    pub fn new(rankings: Vec<(QueryId, Vec<RankingEntry>)>, judgments: &[Judgment]) -> Self {
        let mut by_query: BTreeMap<QueryId, Vec<RankingEntry>> = BTreeMap::new();
        for (query, ranking) in rankings {
            by_query.entry(query).or_default().extend(ranking);
        }

        Self {
            rankings: by_query,
            expected: expected_rankings(judgments),
        }
    }

    /// Metrics for every query that has a ranking or judgments, in ascending
    /// query order. A query missing on one side has no overlap.
    pub fn evaluate(&self) -> Vec<Metrics> {
        let queries: BTreeSet<QueryId> = self
            .rankings
            .keys()
            .chain(self.expected.keys())
            .copied()
            .collect();

        queries
            .into_iter()
            .map(|query| {
                let retrieved = above(self.rankings.get(&query), RETRIEVAL_THRESHOLD);
                let relevant = above(self.expected.get(&query), RELEVANCE_THRESHOLD);

                debug!(
                    "query {query}: {} retrieved, {} relevant",
                    retrieved.len(),
                    relevant.len()
                );

                let precision = precision(&retrieved, &relevant);
                let recall = recall(&retrieved, &relevant);

                Metrics {
                    query,
                    precision,
                    recall,
                    f1: f1(precision, recall),
                }
            })
            .collect()
    }
}

/// Plain-text table of the metrics with a mean row at the bottom.
pub fn report(metrics: &[Metrics]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{:>8} {:>10} {:>10} {:>10}", "Query", "Precision", "Recall", "F1");
    for m in metrics {
        let _ = writeln!(
            out,
            "{:>8} {:>10.2} {:>10.2} {:>10.2}",
            m.query, m.precision, m.recall, m.f1
        );
    }

    let n = metrics.len() as f64;
    let mean = |f: fn(&Metrics) -> f64| ratio(metrics.iter().map(f).sum(), n);
    let _ = writeln!(
        out,
        "{:>8} {:>10.2} {:>10.2} {:>10.2}",
        "Mean",
        mean(|m| m.precision),
        mean(|m| m.recall),
        mean(|m| m.f1)
    );

    out
}
