// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

use tracing::info;

use crate::artifact::{self, JudgmentRow, QueryRow};
use crate::config::{Key, StageConfig};
use crate::document::XmlDocument;
use crate::query;
use crate::Result;

pub fn run(config: &StageConfig) -> Result<()> {
    let input = config.path_value(Key::Leia);
    info!("reading queries from {}", input.display());

    let doc = XmlDocument::open(&input)?;
    let (queries, judgments) = query::extract_all(&doc);

    let queries: Vec<QueryRow> = queries.iter().map(QueryRow::from).collect();
    let judgments: Vec<JudgmentRow> = judgments.iter().map(JudgmentRow::from).collect();

    artifact::write(config.path_value(Key::Consultas), &queries)?;
    artifact::write(config.path_value(Key::Esperados), &judgments)?;

    info!(
        "wrote {} queries and {} judgments",
        queries.len(),
        judgments.len()
    );

    Ok(())
}
