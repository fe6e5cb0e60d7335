// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

use std::time::Instant;

use tracing::info;

use crate::config::Configs;
use crate::Result;

use super::{evaluate, indexer, inverted_list, query_processor, search};

/// Runs every stage in order. The indexer gets the corpus size reported by
/// the inverted list builder.
pub fn run(configs: &Configs) -> Result<()> {
    let start = Instant::now();

    query_processor::run(&configs.query_processor()?)?;
    info!("query processor done after {:?}", start.elapsed());

    let corpus_size = inverted_list::run(&configs.inverted_list()?)?;
    info!("inverted list builder done after {:?}", start.elapsed());

    indexer::run(&configs.indexer()?, Some(corpus_size))?;
    info!("indexer done after {:?}", start.elapsed());

    search::run(&configs.search()?)?;
    info!("search engine done after {:?}", start.elapsed());

    evaluate::run(&configs.evaluation()?)?;
    info!("validator done after {:?}", start.elapsed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::artifact::{self, MetricsRow, QueryRow};
    use crate::config;
    use crate::index::TfIdfModel;

    const CORPUS: &str = r#"<?xml version="1.0"?>
<root>
  <RECORD>
    <RECORDNUM>00001</RECORDNUM>
    <ABSTRACT>Cat, dog; cat.</ABSTRACT>
  </RECORD>
  <RECORD>
    <RECORDNUM>00002</RECORDNUM>
    <EXTRACT>Dog and bird!</EXTRACT>
  </RECORD>
</root>"#;

    const QUERIES: &str = r#"<?xml version="1.0"?>
<QUERIES>
  <QUERY>
    <QueryNumber>00001</QueryNumber>
    <QueryText>Which bird?</QueryText>
    <Records><Item score="0100">2</Item></Records>
  </QUERY>
  <QUERY>
    <QueryNumber>00002</QueryNumber>
    <QueryText>Is it a cat</QueryText>
    <Records><Item score="2000">00001</Item><Item score="0000">2</Item></Records>
  </QUERY>
</QUERIES>"#;

    fn write_config(dir: &Path, name: &str, lines: &[(&str, &PathBuf)]) {
        let mut content = String::from("# generated\n");
        for (key, path) in lines {
            content.push_str(&format!("{key}={}\n", path.display()));
        }

        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn full_run() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let configs_dir = root.join("Configs");
        std::fs::create_dir(&configs_dir).unwrap();

        let corpus = root.join("cf.xml");
        let query_xml = root.join("cfquery.xml");
        std::fs::write(&corpus, CORPUS).unwrap();
        std::fs::write(&query_xml, QUERIES).unwrap();

        let queries = root.join("queries.csv");
        let judgments = root.join("expected.csv");
        let inverted = root.join("inverted.csv");
        let model = root.join("model.csv");
        let results = root.join("results.csv");
        let metrics = root.join("metrics.csv");

        write_config(
            &configs_dir,
            config::QUERY_PROCESSOR_FILE,
            &[
                ("LEIA", &query_xml),
                ("CONSULTAS", &queries),
                ("ESPERADOS", &judgments),
            ],
        );
        write_config(
            &configs_dir,
            config::INVERTED_LIST_FILE,
            &[("LEIA", &corpus), ("ESCREVA", &inverted)],
        );
        write_config(
            &configs_dir,
            config::INDEXER_FILE,
            &[("LEIA", &inverted), ("ESCREVA", &model)],
        );
        write_config(
            &configs_dir,
            config::SEARCH_FILE,
            &[
                ("MODELO", &model),
                ("CONSULTAS", &queries),
                ("RESULTADOS", &results),
            ],
        );
        write_config(
            &configs_dir,
            config::EVALUATION_FILE,
            &[
                ("LEIA", &results),
                ("ESPERADOS", &judgments),
                ("ESCREVA", &metrics),
            ],
        );

        run(&Configs::new(&configs_dir)).unwrap();

        assert_eq!(
            artifact::read::<QueryRow, _>(&queries).unwrap(),
            vec![
                QueryRow {
                    number: 1,
                    text: "WHICH BIRD".to_string(),
                },
                QueryRow {
                    number: 2,
                    text: "IS IT A CAT".to_string(),
                },
            ]
        );
        assert_eq!(
            std::fs::read_to_string(&judgments).unwrap(),
            "NUMBER;DOCNUMBER;DOCVOTES\n1;2;1\n2;1;1\n2;2;0\n"
        );
        assert_eq!(
            std::fs::read_to_string(&inverted).unwrap(),
            "WORD;DOCUMENTS_LIST\nBIRD;2\nCAT;1,1\nDOG;1,2\n"
        );
        assert_eq!(
            std::fs::read_to_string(&model).unwrap(),
            "WORD;1;2\nBIRD;0;1\nCAT;2;0\nDOG;0;0\n"
        );
        assert_eq!(
            std::fs::read_to_string(&results).unwrap(),
            "Query;Ranking\n1;1:2:1,2:1:0\n2;1:1:0.5,2:2:0\n"
        );

        let rows = artifact::read::<MetricsRow, _>(&metrics).unwrap();
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row.precision, 100.0);
            assert_eq!(row.recall, 100.0);
            assert_eq!(row.f1, 100.0);
        }

        let report = std::fs::read_to_string(root.join("metrics.txt")).unwrap();
        assert!(report.lines().last().unwrap().trim_start().starts_with("Mean"));
    }

    #[test]
    fn standalone_stages_match_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let corpus = root.join("cf.xml");
        let inverted = root.join("inverted.csv");
        let model = root.join("model.csv");
        std::fs::write(&corpus, CORPUS).unwrap();

        let gli = format!(
            "LEIA={}\nESCREVA={}\n",
            corpus.display(),
            inverted.display()
        );
        let index = format!("LEIA={}\nESCREVA={}\n", inverted.display(), model.display());

        let corpus_size = inverted_list::run(&config::StageConfig::parse("GLI.CFG", &gli)).unwrap();
        assert_eq!(corpus_size, 2);

        let index_config = config::StageConfig::parse("INDEX.CFG", &index);
        indexer::run(&index_config, None).unwrap();
        let standalone = std::fs::read(&model).unwrap();

        indexer::run(&index_config, Some(corpus_size)).unwrap();
        assert_eq!(std::fs::read(&model).unwrap(), standalone);

        let loaded: TfIdfModel = artifact::model::read(&model).unwrap();
        assert_eq!(loaded.documents(), &[1, 2]);
    }

    #[test]
    fn stopword_only_document_does_not_change_corpus_size() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let corpus = root.join("cf.xml");
        let inverted = root.join("inverted.csv");
        let model = root.join("model.csv");
        std::fs::write(
            &corpus,
            "<root>\
             <RECORD><RECORDNUM>1</RECORDNUM><ABSTRACT>cat dog</ABSTRACT></RECORD>\
             <RECORD><RECORDNUM>2</RECORDNUM><ABSTRACT>dog bird</ABSTRACT></RECORD>\
             <RECORD><RECORDNUM>3</RECORDNUM><ABSTRACT>the and of a</ABSTRACT></RECORD>\
             </root>",
        )
        .unwrap();

        let gli = format!(
            "LEIA={}\nESCREVA={}\n",
            corpus.display(),
            inverted.display()
        );
        let index = format!("LEIA={}\nESCREVA={}\n", inverted.display(), model.display());

        let corpus_size = inverted_list::run(&config::StageConfig::parse("GLI.CFG", &gli)).unwrap();
        assert_eq!(corpus_size, 2);

        let index_config = config::StageConfig::parse("INDEX.CFG", &index);
        indexer::run(&index_config, Some(corpus_size)).unwrap();
        let pipeline = std::fs::read_to_string(&model).unwrap();

        indexer::run(&index_config, None).unwrap();
        assert_eq!(std::fs::read_to_string(&model).unwrap(), pipeline);
        assert_eq!(pipeline, "WORD;1;2\nBIRD;0;1\nCAT;1;0\nDOG;0;0\n");
    }

    #[test]
    fn missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("results.csv");

        let config = config::StageConfig::parse(
            "BUSCA.CFG",
            &format!("MODELO=/not/there.csv\nRESULTADOS={}\n", results.display()),
        );
        assert!(search::run(&config).is_err());
        assert!(!results.exists());
    }
}
