// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! Stage configuration files.
//!
//! Each stage reads a small line-oriented file of `KEY=VALUE` pairs. A key may
//! appear several times (e.g. one `LEIA` per corpus file). The stemming mode
//! is a bare `STEMMER` or `NOSTEMMER` line. A missing key is not fatal: it is
//! logged and read as empty, and the stage fails later when it uses the value.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};

use crate::tokenizer::StemmerMode;
use crate::Result;

pub const QUERY_PROCESSOR_FILE: &str = "PC.CFG";
pub const INVERTED_LIST_FILE: &str = "GLI.CFG";
pub const INDEXER_FILE: &str = "INDEX.CFG";
pub const SEARCH_FILE: &str = "BUSCA.CFG";
pub const EVALUATION_FILE: &str = "AVALIA.CFG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Consultas,
    Leia,
    Esperados,
    Escreva,
    Modelo,
    Resultados,
    Stemmer,
}

impl Key {
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Consultas => "CONSULTAS",
            Key::Leia => "LEIA",
            Key::Esperados => "ESPERADOS",
            Key::Escreva => "ESCREVA",
            Key::Modelo => "MODELO",
            Key::Resultados => "RESULTADOS",
            Key::Stemmer => "STEMMER",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StageConfig {
    path: PathBuf,
    entries: Vec<(String, String)>,
    stemmer: StemmerMode,
}

impl StageConfig {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;

        Ok(Self::parse(path, &content))
    }

    pub fn parse<P: AsRef<Path>>(path: P, content: &str) -> Self {
        let mut config = Self {
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        };

        for (num, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) if key.trim() == Key::Stemmer.as_str() => {
                    config.set_stemmer(value.trim(), num + 1)
                }
                Some((key, value)) => {
                    debug!("{}: {} = {}", config.path.display(), key.trim(), value.trim());
                    config
                        .entries
                        .push((key.trim().to_string(), value.trim().to_string()));
                }
                None => config.set_stemmer(line, num + 1),
            }
        }

        config
    }

    fn set_stemmer(&mut self, marker: &str, line: usize) {
        match marker.parse() {
            Ok(mode) => self.stemmer = mode,
            Err(err) => warn!(
                "{}:{}: ignoring malformed line: {err}",
                self.path.display(),
                line
            ),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All values of `key` in file order.
    pub fn values(&self, key: Key) -> Vec<&str> {
        let values: Vec<_> = self
            .entries
            .iter()
            .filter(|(k, _)| k == key.as_str())
            .map(|(_, v)| v.as_str())
            .collect();

        if values.is_empty() {
            warn!(
                "{}",
                crate::Error::Configuration {
                    path: self.path.clone(),
                    key: key.as_str().to_string(),
                }
            );
        }

        values
    }

    /// First value of `key`, or an empty path when it is missing.
    pub fn path_value(&self, key: Key) -> PathBuf {
        self.values(key)
            .first()
            .map(PathBuf::from)
            .unwrap_or_default()
    }

    pub fn path_values(&self, key: Key) -> Vec<PathBuf> {
        self.values(key).into_iter().map(PathBuf::from).collect()
    }

    pub fn stemmer(&self) -> StemmerMode {
        self.stemmer
    }
}

/// Directory holding the configuration file of every stage.
#[derive(Debug, Clone)]
pub struct Configs {
    dir: PathBuf,
}

impl Configs {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn query_processor(&self) -> Result<StageConfig> {
        StageConfig::open(self.dir.join(QUERY_PROCESSOR_FILE))
    }

    pub fn inverted_list(&self) -> Result<StageConfig> {
        StageConfig::open(self.dir.join(INVERTED_LIST_FILE))
    }

    pub fn indexer(&self) -> Result<StageConfig> {
        StageConfig::open(self.dir.join(INDEXER_FILE))
    }

    pub fn search(&self) -> Result<StageConfig> {
        StageConfig::open(self.dir.join(SEARCH_FILE))
    }

    pub fn evaluation(&self) -> Result<StageConfig> {
        StageConfig::open(self.dir.join(EVALUATION_FILE))
    }
}
