// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

use tracing::info;

use crate::artifact;
use crate::config::{Key, StageConfig};
use crate::document::XmlDocument;
use crate::inverted_list::{InvertedListBuilder, RECORD_TAG};
use crate::Result;

/// Builds the inverted index of every corpus file and returns the corpus size
/// proxy the indexer needs.
pub fn run(config: &StageConfig) -> Result<u32> {
    let mut builder = InvertedListBuilder::new(config.stemmer());
    info!("stemming mode: {}", config.stemmer().as_str());

    for path in config.path_values(Key::Leia) {
        info!("reading corpus file {}", path.display());
        let doc = XmlDocument::open(&path)?;
        builder.add(&doc, RECORD_TAG);
    }

    let (index, corpus_size) = builder.build();
    artifact::write(config.path_value(Key::Escreva), &index.to_rows())?;

    info!("wrote {} words, corpus size {}", index.len(), corpus_size);

    Ok(corpus_size)
}
