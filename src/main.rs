use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scene_ingest::config::Config;
use scene_ingest::ingest::{IngestionService, RunSettings};
use scene_ingest::places::queries::{DEFAULT_NEIGHBORHOODS, DEFAULT_SEARCH_TERMS};
use scene_ingest::places::{
    PlacesClient, QueryGenerator, RandomFacets, RetryPolicy, TransformContext,
};
use scene_ingest::storage::ArtifactWriter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct CliArgs {
    /// Where to write the generated venue module. Overrides PLACES_OUTPUT_PATH.
    #[clap(long)]
    output: Option<PathBuf>,

    /// Pause between search calls in milliseconds. Overrides PLACES_DELAY_MS.
    #[clap(long)]
    delay_ms: Option<u64>,

    /// Results requested per query. Overrides PLACES_PAGE_SIZE.
    #[clap(long)]
    page_size: Option<u32>,

    /// Retries per failed query with exponential backoff. Overrides PLACES_MAX_RETRIES.
    #[clap(long)]
    max_retries: Option<u32>,

    /// Comma separated neighborhoods to sweep instead of the built-in list.
    #[clap(long, value_delimiter = ',')]
    neighborhoods: Vec<String>,

    /// Comma separated search terms to use instead of the built-in list.
    #[clap(long, value_delimiter = ',')]
    terms: Vec<String>,

    /// Stop after this many queries.
    #[clap(long)]
    max_queries: Option<usize>,

    /// Seed for facet assignment, for reproducible output.
    #[clap(long)]
    seed: Option<u64>,

    /// Run the sweep and report, without writing the artifact.
    #[clap(long)]
    dry_run: bool,
}

fn or_defaults(values: Vec<String>, defaults: &[&str]) -> Vec<String> {
    let values: Vec<String> = values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        values
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let mut cfg = Config::from_env()?;
    if let Some(output) = args.output {
        cfg.output_path = output;
    }
    if let Some(delay_ms) = args.delay_ms {
        cfg.delay_ms = delay_ms;
    }
    if let Some(page_size) = args.page_size {
        cfg.page_size = page_size;
    }
    if let Some(max_retries) = args.max_retries {
        cfg.max_retries = max_retries;
    }

    let client = PlacesClient::new(&cfg.base_url, &cfg.api_key)?
        .with_page_size(cfg.page_size)
        .with_retry(RetryPolicy::with_max_retries(cfg.max_retries));

    let transform_ctx = TransformContext {
        city: cfg.city.clone(),
        category: cfg.category.clone(),
        photos: client.photo_urls(cfg.photo_max_px, cfg.photo_max_px),
    };

    let queries = QueryGenerator::new(
        or_defaults(args.neighborhoods, DEFAULT_NEIGHBORHOODS),
        or_defaults(args.terms, DEFAULT_SEARCH_TERMS),
        cfg.city.clone(),
    );

    let facets = match args.seed {
        Some(seed) => RandomFacets::seeded(seed),
        None => RandomFacets::from_os_rng(),
    };

    let settings = RunSettings {
        delay: cfg.delay(),
        max_queries: args.max_queries,
        dry_run: args.dry_run,
    };

    let mut service = IngestionService::new(
        client,
        facets,
        queries,
        transform_ctx,
        ArtifactWriter::new(&cfg.output_path),
        settings,
    );

    let report = service.run().await?;

    println!("\n==============================");
    println!("VENUES: {}", report.venues.len());
    println!("QUERIES: {} ({} failed)", report.stats.queries_issued, report.stats.queries_failed);
    println!("DUPLICATES SKIPPED: {}", report.stats.duplicates_skipped);
    println!("REJECTED: {}", report.stats.rejected_total());
    match &report.output_path {
        Some(path) => println!("WRITTEN TO: {}", path.display()),
        None => println!("DRY RUN: nothing written"),
    }
    println!("==============================\n");

    info!("Done");
    Ok(())
}
