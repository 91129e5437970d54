use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use passage_doc_chunker::{DocChunk, SplitterConfig};
use passage_indexer::CorpusIndexer;
use passage_rag::{provider_from_env, AnswerPipeline};
use passage_retrieval::{MmrParams, RetrievalStrategy, Retriever};
use passage_vector_store::embedder_from_env;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "passage-finder")]
#[command(about = "Vector retrieval over document passages", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for results)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a retrieval corpus from a directory of documents
    Index {
        /// Directory of source documents (.txt, .md)
        #[arg(long)]
        docs: PathBuf,

        /// Output directory for the corpus files
        #[arg(long)]
        out: PathBuf,

        /// Chunk window size in characters
        #[arg(long, default_value_t = 500)]
        chunk_size: usize,

        /// Characters shared between consecutive chunks
        #[arg(long, default_value_t = 50)]
        chunk_overlap: usize,
    },

    /// Rank passages for a query against a built corpus (JSON to stdout)
    Search {
        /// Query text
        #[arg(long)]
        query: String,

        /// Corpus directory written by `index`
        #[arg(long)]
        corpus: PathBuf,

        #[arg(long, value_enum, default_value = "similarity")]
        strategy: StrategyArg,

        #[arg(long, default_value_t = 5)]
        top_k: usize,

        /// MMR relevance/diversity trade-off in [0, 1]
        #[arg(long, default_value_t = 0.5)]
        lambda: f32,

        /// MMR candidate pool size as a multiple of top-k
        #[arg(long, default_value_t = 5)]
        overfetch: usize,

        /// JSON file of externally produced keyword-match chunks (hybrid)
        #[arg(long)]
        keywords: Option<PathBuf>,
    },

    /// Answer a question from the corpus via the configured chat provider
    Ask {
        /// Question text
        #[arg(long)]
        query: String,

        /// Corpus directory written by `index`
        #[arg(long)]
        corpus: PathBuf,

        #[arg(long, value_enum, default_value = "similarity")]
        strategy: StrategyArg,

        #[arg(long, default_value_t = 5)]
        top_k: usize,

        #[arg(long, default_value_t = 0.5)]
        lambda: f32,

        #[arg(long, default_value_t = 5)]
        overfetch: usize,

        #[arg(long)]
        keywords: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Similarity,
    Mmr,
    Hybrid,
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Warn
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn build_strategy(
    strategy: StrategyArg,
    lambda: f32,
    overfetch: usize,
    keywords: Option<&Path>,
) -> Result<RetrievalStrategy> {
    Ok(match strategy {
        StrategyArg::Similarity => RetrievalStrategy::Similarity,
        StrategyArg::Mmr => RetrievalStrategy::Mmr(MmrParams {
            lambda,
            overfetch_factor: overfetch,
        }),
        StrategyArg::Hybrid => {
            let keyword_matches: Vec<DocChunk> = match keywords {
                Some(path) => {
                    let raw = std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    serde_json::from_str(&raw)
                        .with_context(|| format!("invalid keyword matches in {}", path.display()))?
                }
                None => Vec::new(),
            };
            RetrievalStrategy::Hybrid { keyword_matches }
        }
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Index {
            docs,
            out,
            chunk_size,
            chunk_overlap,
        } => {
            let embedder = embedder_from_env().context("failed to configure embedder")?;
            let indexer = CorpusIndexer::new(
                &docs,
                &out,
                SplitterConfig {
                    chunk_size,
                    chunk_overlap,
                },
                embedder,
            )?;
            let stats = indexer.build().await.context("index build failed")?;
            println!("{}", stats.summary());
        }

        Commands::Search {
            query,
            corpus,
            strategy,
            top_k,
            lambda,
            overfetch,
            keywords,
        } => {
            let embedder = embedder_from_env().context("failed to configure embedder")?;
            let retriever = Retriever::open(&corpus, embedder).await?;
            let strategy = build_strategy(strategy, lambda, overfetch, keywords.as_deref())?;

            let chunks = retriever.retrieve(&query, &strategy, top_k).await?;
            println!("{}", serde_json::to_string_pretty(&chunks)?);
        }

        Commands::Ask {
            query,
            corpus,
            strategy,
            top_k,
            lambda,
            overfetch,
            keywords,
        } => {
            let embedder = embedder_from_env().context("failed to configure embedder")?;
            let provider = provider_from_env().context("failed to configure chat provider")?;
            let retriever = Retriever::open(&corpus, embedder).await?;
            let strategy = build_strategy(strategy, lambda, overfetch, keywords.as_deref())?;

            let pipeline = AnswerPipeline::new(retriever, provider);
            let result = pipeline.answer(&query, &strategy, top_k).await?;
            println!("{}", result.answer);
        }
    }

    Ok(())
}
