//! CLI entry point for the kaiji disclosure pipeline.
//!
//! Fetches watchlisted filings from the disclosure registry for a date
//! range, summarizes each document, and writes Markdown summaries to an
//! output directory.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use kaiji_core::{DateRange, parse_date_token};
use kaiji_embeddings::{RemoteEmbeddingConfig, RemoteEmbeddingService};
use kaiji_llm::{OpenAiConfig, OpenAiProvider, default_financial_prompt, load_prompt};
use kaiji_pipeline::{FsSink, Pipeline, PlainTextExtractor, RegistrySource, load_watchlist};
use kaiji_registry::{RegistryClient, RegistryConfig};
use kaiji_settings::{KaijiSettings, load_from_path, require_env};
use kaiji_summarize::{Chunker, HeuristicTokenCounter, Summarizer, TokenCounter};

#[derive(Debug, Parser)]
#[command(name = "kaiji", about = "Disclosure retrieval and summarization pipeline")]
struct Args {
    /// First date to fetch: `YYYY-MM-DD` or `yesterday`.
    #[arg(long, default_value = "yesterday")]
    start_date: String,

    /// Last date to fetch (inclusive): `YYYY-MM-DD` or `yesterday`.
    #[arg(long, default_value = "yesterday")]
    end_date: String,

    /// Watched company codes, one per line (`#` comments allowed).
    #[arg(long)]
    watchlist: PathBuf,

    /// Settings file; compiled defaults apply when absent.
    #[arg(long, default_value = "kaiji.json")]
    config: PathBuf,

    /// Directory for summary Markdown files.
    #[arg(long, default_value = "summaries")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_from_path(&args.config)
        .with_context(|| format!("failed to load settings from {}", args.config.display()))?;

    init_subscriber(&settings.logging.level);

    let registry_key = require_env("EDINET_API_KEY")?;
    let llm_key = require_env("OPENAI_API_KEY")?;

    let today = chrono::Local::now().date_naive();
    let start = parse_date_token(&args.start_date, today)?;
    let end = parse_date_token(&args.end_date, today)?;
    let range = DateRange::new(start, end)?;

    let watchlist = load_watchlist(&args.watchlist).await?;
    tracing::info!(
        start = %range.start(),
        end = %range.end(),
        companies = watchlist.len(),
        "starting batch"
    );

    let pipeline = build_pipeline(&settings, registry_key, llm_key, &args.output_dir)?;
    let report = pipeline.run(&range, &watchlist).await;

    println!(
        "fetched {} / summarized {} / skipped {} / failed {}",
        report.fetched, report.summarized, report.skipped, report.failed
    );
    if report.failed > 0 {
        anyhow::bail!("{} document(s) failed", report.failed);
    }
    Ok(())
}

fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn build_pipeline(
    settings: &KaijiSettings,
    registry_key: String,
    llm_key: String,
    output_dir: &std::path::Path,
) -> Result<Pipeline> {
    let http = reqwest::Client::new();

    let registry = RegistryClient::with_client(
        RegistryConfig {
            base_url: settings.registry.base_url.clone(),
            api_key: registry_key,
            timeout: Duration::from_secs(settings.registry.timeout_secs),
        },
        http.clone(),
    );
    let source = RegistrySource::new(registry, settings.registry.max_concurrency);

    let provider = OpenAiProvider::with_client(
        OpenAiConfig {
            model: settings.llm.model.clone(),
            api_key: llm_key.clone(),
            base_url: Some(settings.llm.base_url.clone()),
        },
        http.clone(),
    );

    let prompt = match &settings.llm.prompt_path {
        Some(path) => load_prompt(std::path::Path::new(path))
            .with_context(|| format!("failed to load prompt from {path}"))?,
        None => default_financial_prompt(),
    };

    let counter: Arc<dyn TokenCounter> = Arc::new(HeuristicTokenCounter);
    let chunker = Chunker::new(counter.clone(), settings.summarize.max_chunk_tokens);
    let summarizer = Summarizer::new(
        Arc::new(provider),
        counter,
        prompt,
        settings.summarize.max_summary_tokens,
        settings.llm.temperature,
    );

    let mut pipeline = Pipeline::new(
        Arc::new(source),
        Arc::new(PlainTextExtractor),
        chunker,
        summarizer,
        Arc::new(FsSink::new(output_dir)),
        settings.summarize.max_input_tokens,
        settings.summarize.summary_part_chars,
    );

    if settings.embedding.enabled {
        let embedder = RemoteEmbeddingService::with_client(
            RemoteEmbeddingConfig {
                model: settings.embedding.model.clone(),
                api_key: llm_key,
                base_url: settings.embedding.base_url.clone(),
                dimensions: 1536,
            },
            http,
        );
        pipeline = pipeline.with_embedder(Arc::new(embedder));
    }

    Ok(pipeline)
}
