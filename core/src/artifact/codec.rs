// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! Fixed-delimiter encodings of the list valued columns.
//!
//! Document lists are comma separated ids (`1,1,2`) and rankings are comma
//! separated `rank:doc:score` triples (`1:12:0.5,2:7:0`). Neither delimiter can
//! appear inside an element, so no quoting or escaping is needed.

use anyhow::{anyhow, Context};
use itertools::Itertools;

use crate::ranking::RankingEntry;
use crate::{DocId, Result};

const LIST_SEP: char = ',';
const FIELD_SEP: char = ':';

pub fn encode_doc_list(docs: &[DocId]) -> String {
    docs.iter().join(&LIST_SEP.to_string())
}

pub fn decode_doc_list(s: &str) -> Result<Vec<DocId>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }

    s.split(LIST_SEP)
        .map(|id| {
            id.trim()
                .parse()
                .with_context(|| format!("invalid document id {id:?}"))
        })
        .collect()
}

pub fn encode_ranking(ranking: &[RankingEntry]) -> String {
    ranking
        .iter()
        .map(|entry| {
            format!(
                "{}{FIELD_SEP}{}{FIELD_SEP}{}",
                entry.rank, entry.doc, entry.score
            )
        })
        .join(&LIST_SEP.to_string())
}

pub fn decode_ranking(s: &str) -> Result<Vec<RankingEntry>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }

    s.split(LIST_SEP)
        .map(|entry| {
            let (rank, doc, score) = entry
                .split(FIELD_SEP)
                .collect_tuple()
                .ok_or_else(|| anyhow!("expected rank:doc:score, got {entry:?}"))?;

            Ok(RankingEntry {
                rank: rank.trim().parse().context("invalid rank")?,
                doc: doc.trim().parse().context("invalid document id")?,
                score: score.trim().parse().context("invalid score")?,
            })
        })
        .collect()
}

pub mod doc_list {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::DocId;

    pub fn serialize<S: Serializer>(docs: &[DocId], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode_doc_list(docs))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<DocId>, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::decode_doc_list(&s).map_err(de::Error::custom)
    }
}

pub mod ranking {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::ranking::RankingEntry;

    pub fn serialize<S: Serializer>(
        ranking: &[RankingEntry],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode_ranking(ranking))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<RankingEntry>, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::decode_ranking(&s).map_err(|err| de::Error::custom(format!("{err:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_list() {
        assert_eq!(encode_doc_list(&[1, 1, 2]), "1,1,2");
        assert_eq!(encode_doc_list(&[]), "");
        assert_eq!(decode_doc_list("1,1,2").unwrap(), vec![1, 1, 2]);
        assert_eq!(decode_doc_list(" 3, 4 ").unwrap(), vec![3, 4]);
        assert!(decode_doc_list("").unwrap().is_empty());
        assert!(decode_doc_list("1,x").is_err());
    }

    #[test]
    fn ranking() {
        let ranking = vec![
            RankingEntry {
                rank: 1,
                doc: 12,
                score: 0.5,
            },
            RankingEntry {
                rank: 2,
                doc: 7,
                score: 0.0,
            },
        ];

        let encoded = encode_ranking(&ranking);
        assert_eq!(encoded, "1:12:0.5,2:7:0");
        assert_eq!(decode_ranking(&encoded).unwrap(), ranking);
    }

    #[test]
    fn malformed_ranking() {
        assert!(decode_ranking("1:12").is_err());
        assert!(decode_ranking("1:12:0.5:3").is_err());
        assert!(decode_ranking("1:x:0.5").is_err());
    }
}
