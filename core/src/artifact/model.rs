// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! The dense TF-IDF model file: `WORD;<doc id>;<doc id>...` followed by one
//! row of weights per word. The header is the document order of every weight
//! vector.

use std::path::Path;

use crate::index::{TermWeights, TfIdfModel};
use crate::{DocId, Result};

use super::{parse_error, reader, writer};

const WORD_COLUMN: &str = "WORD";

pub fn write<P: AsRef<Path>>(path: P, model: &TfIdfModel) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = writer(path)?;

    let mut header = Vec::with_capacity(model.documents().len() + 1);
    header.push(WORD_COLUMN.to_string());
    header.extend(model.documents().iter().map(|doc| doc.to_string()));
    wtr.write_record(&header)?;

    let mut record = Vec::with_capacity(header.len());
    for row in model.rows() {
        record.clear();
        record.push(row.word.clone());
        record.extend(row.weights.iter().map(|weight| weight.to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;

    Ok(())
}

pub fn read<P: AsRef<Path>>(path: P) -> Result<TfIdfModel> {
    let path = path.as_ref();
    let mut rdr = reader(path)?;

    let documents = rdr
        .headers()
        .map_err(|err| parse_error(path, err))?
        .iter()
        .skip(1)
        .map(|doc| {
            doc.parse::<DocId>().map_err(|err| {
                anyhow::Error::from(crate::Error::Parse {
                    path: path.to_path_buf(),
                    line: 1,
                    reason: format!("invalid document id {doc:?} in header: {err}"),
                })
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::new();

    for record in rdr.records() {
        let record = record.map_err(|err| parse_error(path, err))?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);

        let mut fields = record.iter();
        let word = fields.next().unwrap_or_default().to_string();
        let weights = fields
            .map(|weight| {
                weight.parse::<f64>().map_err(|err| {
                    anyhow::Error::from(crate::Error::Parse {
                        path: path.to_path_buf(),
                        line,
                        reason: format!("invalid weight {weight:?}: {err}"),
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?;

        rows.push(TermWeights { word, weights });
    }

    Ok(TfIdfModel::new(documents, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> TfIdfModel {
        TfIdfModel::new(
            vec![1, 2],
            vec![
                TermWeights {
                    word: "BIRD".to_string(),
                    weights: vec![0.0, 1.0],
                },
                TermWeights {
                    word: "CAT".to_string(),
                    weights: vec![2.0, 0.0],
                },
            ],
        )
    }

    #[test]
    fn model_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.csv");

        write(&path, &model()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "WORD;1;2\nBIRD;0;1\nCAT;2;0\n"
        );

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.documents(), &[1, 2]);
        assert_eq!(loaded.rows(), model().rows());
    }

    #[test]
    fn malformed_weight() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.csv");
        std::fs::write(&path, "WORD;1;2\nCAT;2;abc\n").unwrap();

        let err = read(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::Error>(),
            Some(crate::Error::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn short_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.csv");
        std::fs::write(&path, "WORD;1;2\nCAT;2\n").unwrap();

        assert!(read(&path).is_err());
    }
}
