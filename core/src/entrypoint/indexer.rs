// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

use tracing::info;

use crate::artifact::{self, InvertedListRow};
use crate::config::{Key, StageConfig};
use crate::index::Indexer;
use crate::inverted_list::InvertedIndex;
use crate::Result;

/// Weights the persisted inverted index. Without an explicit corpus size the
/// largest document id of the index is used.
pub fn run(config: &StageConfig, corpus_size: Option<u32>) -> Result<()> {
    let input = config.path_value(Key::Leia);
    info!("reading inverted index from {}", input.display());

    let rows: Vec<InvertedListRow> = artifact::read(&input)?;
    let index = InvertedIndex::from(rows);

    let indexer = match corpus_size {
        Some(corpus_size) => Indexer::new(corpus_size),
        None => Indexer::for_index(&index),
    };

    let model = indexer.build(&index);
    artifact::model::write(config.path_value(Key::Escreva), &model)?;

    Ok(())
}
