// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

use tracing::info;

use crate::artifact::{self, QueryRow, SearchResultRow};
use crate::config::{Key, StageConfig};
use crate::query::Query;
use crate::ranking::SearchEngine;
use crate::Result;

pub fn run(config: &StageConfig) -> Result<()> {
    let model = artifact::model::read(config.path_value(Key::Modelo))?;
    let queries: Vec<Query> = artifact::read::<QueryRow, _>(config.path_value(Key::Consultas))?
        .into_iter()
        .map(Query::from)
        .collect();

    let engine = SearchEngine::new(model);
    info!(
        "ranking {} documents for {} queries",
        engine.documents().len(),
        queries.len()
    );

    let rows: Vec<SearchResultRow> = engine
        .search(&queries)
        .into_iter()
        .map(|(query, ranking)| SearchResultRow { query, ranking })
        .collect();

    artifact::write(config.path_value(Key::Resultados), &rows)
}
