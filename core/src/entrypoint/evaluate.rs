// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use crate::artifact::{self, JudgmentRow, MetricsRow, SearchResultRow};
use crate::config::{Key, StageConfig};
use crate::evaluation::{self, Validator};
use crate::query::Judgment;
use crate::Result;

const REPORT_EXTENSION: &str = "txt";

/// Metrics file and report file. The report defaults to the metrics path with
/// a `txt` extension.
fn outputs(config: &StageConfig) -> (PathBuf, PathBuf) {
    let mut paths = config.path_values(Key::Escreva).into_iter();
    let metrics = paths.next().unwrap_or_default();
    let report = paths
        .next()
        .unwrap_or_else(|| metrics.with_extension(REPORT_EXTENSION));

    (metrics, report)
}

pub fn run(config: &StageConfig) -> Result<()> {
    let results: Vec<SearchResultRow> = artifact::read(config.path_value(Key::Leia))?;
    let judgments: Vec<Judgment> =
        artifact::read::<JudgmentRow, _>(config.path_value(Key::Esperados))?
            .into_iter()
            .map(Judgment::from)
            .collect();

    let validator = Validator::new(
        results
            .into_iter()
            .map(|row| (row.query, row.ranking))
            .collect(),
        &judgments,
    );
    let metrics = validator.evaluate();

    let (metrics_path, report_path) = outputs(config);

    let rows: Vec<MetricsRow> = metrics.iter().map(MetricsRow::from).collect();
    artifact::write(&metrics_path, &rows)?;

    std::fs::write(&report_path, evaluation::report(&metrics))
        .with_context(|| format!("failed to write {}", report_path.display()))?;

    info!(
        "evaluated {} queries, report in {}",
        metrics.len(),
        report_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_next_to_metrics() {
        let config = StageConfig::parse("AVALIA.CFG", "ESCREVA=out/metrics.csv\n");
        assert_eq!(
            outputs(&config),
            (
                PathBuf::from("out/metrics.csv"),
                PathBuf::from("out/metrics.txt")
            )
        );
    }

    #[test]
    fn explicit_report() {
        let config = StageConfig::parse(
            "AVALIA.CFG",
            "ESCREVA=out/metrics.csv\nESCREVA=out/summary.log\n",
        );
        assert_eq!(outputs(&config).1, PathBuf::from("out/summary.log"));
    }
}
