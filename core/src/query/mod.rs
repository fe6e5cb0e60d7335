// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! Queries and relevance judgments read from the query collection.

use tracing::warn;

use crate::artifact::{JudgmentRow, QueryRow};
use crate::document::DocumentReader;
use crate::inverted_list::parse_id;
use crate::tokenizer;
use crate::{DocId, QueryId};

pub const QUERY_TAG: &str = "QUERY";
pub const NUMBER_FIELD: &str = "QueryNumber";
pub const TEXT_FIELD: &str = "QueryText";
pub const RECORDS_FIELD: &str = "Records";
pub const ITEM_FIELD: &str = "Item";
pub const SCORE_ATTRIBUTE: &str = "score";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub id: QueryId,
    /// Normalized query text.
    pub text: String,
}

impl From<QueryRow> for Query {
    fn from(row: QueryRow) -> Self {
        Self {
            id: row.number,
            text: row.text,
        }
    }
}

impl From<&Query> for QueryRow {
    fn from(query: &Query) -> Self {
        Self {
            number: query.id,
            text: query.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Judgment {
    pub query: QueryId,
    pub doc: DocId,
    pub votes: u32,
}

impl From<JudgmentRow> for Judgment {
    fn from(row: JudgmentRow) -> Self {
        Self {
            query: row.query,
            doc: row.doc,
            votes: row.votes,
        }
    }
}

impl From<&Judgment> for JudgmentRow {
    fn from(judgment: &Judgment) -> Self {
        Self {
            query: judgment.query,
            doc: judgment.doc,
            votes: judgment.votes,
        }
    }
}

/// Every non-zero digit of a score string is one vote, i.e. the length of
/// the string minus its number of `'0'` characters.
pub fn derive_votes(score: &str) -> u32 {
    let segments = score.split('0').count();
    (score.chars().count() - (segments - 1)) as u32
}

/// Query and judgments of one `QUERY` record. `None` when the record has no
/// usable number or text.
pub fn extract_query<R: DocumentReader>(
    reader: &R,
    record: &R::Record,
) -> Option<(Query, Vec<Judgment>)> {
    let id = reader
        .field_value(record, NUMBER_FIELD)
        .as_deref()
        .and_then(parse_id)?;
    let text = reader.field_value(record, TEXT_FIELD)?;

    let query = Query {
        id,
        text: tokenizer::normalize(&text),
    };

    let mut judgments = Vec::new();
    for records in reader.nested(record, RECORDS_FIELD) {
        for item in reader.nested(records, ITEM_FIELD) {
            let Some(doc) = reader.value(item).as_deref().and_then(parse_id) else {
                warn!("query {id}: skipping judgment without document number");
                continue;
            };

            let score = reader
                .field_attribute(item, SCORE_ATTRIBUTE)
                .unwrap_or_default();

            judgments.push(Judgment {
                query: id,
                doc,
                votes: derive_votes(&tokenizer::normalize(&score)),
            });
        }
    }

    Some((query, judgments))
}

/// Reads all queries of a collection in document order.
pub fn extract_all<R: DocumentReader>(reader: &R) -> (Vec<Query>, Vec<Judgment>) {
    let mut queries = Vec::new();
    let mut judgments = Vec::new();

    for (position, record) in reader.records(QUERY_TAG).into_iter().enumerate() {
        match extract_query(reader, record) {
            Some((query, query_judgments)) => {
                queries.push(query);
                judgments.extend(query_judgments);
            }
            None => warn!("skipping query record {position}: missing number or text"),
        }
    }

    (queries, judgments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::XmlDocument;

    #[test]
    fn votes() {
        assert_eq!(derive_votes("100"), 1);
        assert_eq!(derive_votes("2222"), 4);
        assert_eq!(derive_votes("0010"), 1);
        assert_eq!(derive_votes("0000"), 0);
        assert_eq!(derive_votes(""), 0);
    }

    const QUERIES: &str = r#"<QUERIES>
<QUERY>
  <QueryNumber>00001</QueryNumber>
  <QueryText>What are the effects of calcium on the physical properties of mucus?</QueryText>
  <Results>2</Results>
  <Records>
    <Item score="0010">139</Item>
    <Item score="2222">151</Item>
  </Records>
</QUERY>
<QUERY>
  <QueryText>No number here</QueryText>
</QUERY>
<QUERY>
  <QueryNumber>00002</QueryNumber>
  <QueryText>Can one distinguish between the effects of mucus hypersecretion?</QueryText>
  <Records>
    <Item score="1000">169</Item>
    <Item>oops</Item>
  </Records>
</QUERY>
</QUERIES>"#;

    #[test]
    fn extracts_queries_and_judgments() {
        let doc = XmlDocument::parse(QUERIES).unwrap();
        let (queries, judgments) = extract_all(&doc);

        assert_eq!(
            queries,
            vec![
                Query {
                    id: 1,
                    text: "WHAT ARE THE EFFECTS OF CALCIUM ON THE PHYSICAL PROPERTIES OF MUCUS"
                        .to_string(),
                },
                Query {
                    id: 2,
                    text: "CAN ONE DISTINGUISH BETWEEN THE EFFECTS OF MUCUS HYPERSECRETION"
                        .to_string(),
                },
            ]
        );

        assert_eq!(
            judgments,
            vec![
                Judgment {
                    query: 1,
                    doc: 139,
                    votes: 1
                },
                Judgment {
                    query: 1,
                    doc: 151,
                    votes: 4
                },
                Judgment {
                    query: 2,
                    doc: 169,
                    votes: 1
                },
            ]
        );
    }
}
