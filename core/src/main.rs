// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vsm::config::Configs;
use vsm::entrypoint;

#[derive(Parser)]
#[command(name = "vsm", version, about = "Batch vector-space retrieval and evaluation")]
struct Args {
    /// Directory with the stage configuration files.
    #[arg(long, global = true, default_value = "Configs")]
    configs: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize the query collection and extract relevance judgments (PC.CFG).
    Queries,

    /// Build the inverted index of the corpus files (GLI.CFG).
    Invert,

    /// Weight the inverted index with TF-IDF (INDEX.CFG).
    Index {
        /// Corpus size used for idf. Defaults to the largest document id.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        corpus_size: Option<u32>,
    },

    /// Rank every document for every query (BUSCA.CFG).
    Search,

    /// Score the rankings against the judgments (AVALIA.CFG).
    Evaluate,

    /// Run all stages in order.
    Run,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let configs = Configs::new(args.configs);

    match args.command {
        Commands::Queries => entrypoint::query_processor::run(&configs.query_processor()?)?,
        Commands::Invert => {
            entrypoint::inverted_list::run(&configs.inverted_list()?)?;
        }
        Commands::Index { corpus_size } => {
            entrypoint::indexer::run(&configs.indexer()?, corpus_size)?
        }
        Commands::Search => entrypoint::search::run(&configs.search()?)?,
        Commands::Evaluate => entrypoint::evaluate::run(&configs.evaluation()?)?,
        Commands::Run => entrypoint::pipeline::run(&configs)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_size_must_be_positive() {
        assert!(Args::try_parse_from(["vsm", "index", "--corpus-size", "0"]).is_err());

        let args = Args::try_parse_from(["vsm", "index", "--corpus-size", "3"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Index {
                corpus_size: Some(3)
            }
        ));
        assert_eq!(args.configs, PathBuf::from("Configs"));
    }
}
