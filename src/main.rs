use chemrank_advisor::{Advisor, Analyzer, FallbackAnalyzer, OpenAiAnalyzer};
use chemrank_core::{ranker, EngineConfig};
use chemrank_storage::CatalogManager;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Rank water-treatment chemicals against a customer need
#[derive(Parser, Debug)]
#[command(name = "chemrank")]
#[command(about = "Lexical product ranking for a chemical catalog", long_about = None)]
struct Args {
    /// Path to the JSONL product records
    #[arg(short, long, default_value = "data/products.jsonl")]
    data: PathBuf,

    /// Optional JSON file overriding heuristics and index settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank products for a free-text need
    Search {
        query: String,
        /// Number of products to return
        #[arg(short = 'k', long, default_value_t = 3)]
        top_k: usize,
    },
    /// Rank products and attach an analysis (uses OPENAI_API_KEY when set)
    Recommend { query: String },
    /// List indexed products
    List {
        /// Only products in this category (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },
    /// Append records from another JSONL file to the catalog
    Import { file: PathBuf },
    /// Show index statistics
    Stats,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn recommend<A: Analyzer>(advisor: Advisor<A>, query: &str) -> anyhow::Result<()> {
    let recommendation = advisor.recommend(query).await?;
    print_json(&recommendation)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            EngineConfig::from_path(path)?
        }
        None => EngineConfig::default(),
    };

    info!("chemrank v{}", env!("CARGO_PKG_VERSION"));
    info!("Data file: {:?}", args.data);

    let catalog = Arc::new(CatalogManager::open(&args.data, config));

    match args.command {
        Command::Search { query, top_k } => {
            let index = catalog.snapshot();
            let outcome = ranker::search_with_tier(&index, &query, top_k);
            info!("{} result(s) from {:?} tier", outcome.results.len(), outcome.tier);
            print_json(&outcome.results)?;
        }
        Command::Recommend { query } => match OpenAiAnalyzer::from_env() {
            Ok(analyzer) => {
                info!("Using analyzer model {}", analyzer.model());
                recommend(Advisor::new(catalog, analyzer), &query).await?;
            }
            Err(e) => {
                warn!("{}; answering with fallback analysis", e);
                recommend(Advisor::new(catalog, FallbackAnalyzer), &query).await?;
            }
        },
        Command::List { category } => {
            let index = catalog.snapshot();
            match category {
                Some(category) => print_json(&index.by_category(&category))?,
                None => print_json(&index.products())?,
            }
        }
        Command::Import { file } => {
            let records = chemrank_storage::load(&file);
            let added = catalog.import(&records)?;
            info!("Imported {} record(s) from {:?}", added, file);
            print_json(&catalog.snapshot().stats())?;
        }
        Command::Stats => {
            print_json(&catalog.snapshot().stats())?;
        }
    }

    Ok(())
}
