use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use docqa_cli::{display_banner, run_chat};
use docqa_core::{DocumentSource, ExtractOptions, VectorIndex};
use docqa_openai::OpenAiClient;
use docqa_rag::{CorpusStore, EngineConfig, MemoryIndex, PlainTextSource, QdrantIndex, RagEngine};

#[derive(Parser)]
#[command(name = "docqa")]
#[command(about = "Chat with your documents over a retrieval-augmented pipeline", long_about = None)]
struct Cli {
    /// Plain-text document to ingest before chatting
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Corpus (collection) name in the vector index
    #[arg(long, default_value = "docqa")]
    corpus: String,

    /// Qdrant endpoint, e.g. http://localhost:6334; omit to use the in-memory index
    #[arg(long)]
    qdrant_url: Option<String>,

    /// Chunks retrieved per question
    #[arg(long, default_value_t = 5)]
    top_k: usize,

    /// Lines shorter than this are dropped during extraction
    #[arg(long, default_value_t = 10)]
    min_line_length: usize,

    /// Inclusive zero-based page range, e.g. 0-4
    #[arg(long)]
    pages: Option<String>,

    /// Inject chat history into each prompt
    #[arg(long)]
    with_history: bool,

    /// Ask a single question and exit instead of chatting
    #[arg(short, long)]
    question: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let client = Arc::new(OpenAiClient::from_env()?);

    match cli.qdrant_url.clone() {
        Some(url) => run(&cli, QdrantIndex::connect(&url)?, client).await,
        None => run(&cli, MemoryIndex::new(), client).await,
    }
}

async fn run<I>(cli: &Cli, index: I, client: Arc<OpenAiClient>) -> Result<()>
where
    I: VectorIndex + 'static,
{
    let store = Arc::new(
        CorpusStore::attach(cli.corpus.clone(), client.clone(), Arc::new(index)).await?,
    );

    if let Some(path) = &cli.file {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let options = ExtractOptions {
            pages: parse_pages(cli.pages.as_deref())?,
            min_line_length: cli.min_line_length,
        };
        let paragraphs = PlainTextSource::new().paragraphs(&bytes, &options)?;
        if paragraphs.is_empty() {
            anyhow::bail!("no paragraphs extracted from {}", path.display());
        }
        let ids = store.ingest(&paragraphs).await?;
        tracing::info!(count = ids.len(), corpus = %cli.corpus, "document ingested");
    }

    let engine = RagEngine::with_config(
        store.clone(),
        client,
        EngineConfig { top_k: cli.top_k },
    );

    if let Some(question) = &cli.question {
        let answer = engine.answer(question).await?;
        println!("{}", answer);
        return Ok(());
    }

    display_banner(store.corpus(), store.count().await?);
    run_chat(&engine, cli.with_history).await?;
    Ok(())
}

fn parse_pages(range: Option<&str>) -> Result<Option<(usize, usize)>> {
    let Some(range) = range else {
        return Ok(None);
    };
    let (start, end) = range
        .split_once('-')
        .context("page range must look like 0-4")?;
    let start: usize = start.trim().parse().context("invalid start page")?;
    let end: usize = end.trim().parse().context("invalid end page")?;
    if end < start {
        anyhow::bail!("page range end before start");
    }
    Ok(Some((start, end)))
}
