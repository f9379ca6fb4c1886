//! Campus-Corpus main entry point
//!
//! This is the command-line interface for the Campus-Corpus corpus builder.

use anyhow::Context;
use campus_corpus::config::{load_config_with_hash, validate, Config};
use campus_corpus::crawler::{Coordinator, CrawlControl};
use campus_corpus::output::{print_clean_report, print_ingest_report, print_map_report};
use campus_corpus::Normalizer;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Campus-Corpus: a university website corpus builder
///
/// Campus-Corpus maps a university website breadth-first, extracts text
/// from its HTML pages and PDF documents, and cleans the result into a
/// corpus of tagged source blocks.
#[derive(Parser, Debug)]
#[command(name = "campus-corpus")]
#[command(version = "1.0.0")]
#[command(about = "A university website corpus builder", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Crawl the target domain and write the URL map
    Map,

    /// Fetch every mapped URL and write the raw corpus
    Ingest,

    /// Clean the raw corpus into the final corpus
    Clean,

    /// Run map, ingest and clean in sequence
    Run,

    /// Validate the configuration and show what would be crawled
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    let result = match cli.command {
        Command::Check => handle_check(&config),
        Command::Clean => handle_clean(&config),
        command => handle_crawl(config, command).await,
    };

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("campus_corpus=info,warn"),
            1 => EnvFilter::new("campus_corpus=debug,info"),
            2 => EnvFilter::new("campus_corpus=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or the built-in configuration
fn load(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using built-in defaults");
        let config = Config::default();
        validate(&config).context("built-in configuration is invalid")?;
        return Ok(config);
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("could not load {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

/// Handles `check`: validates config and shows what would be crawled
fn handle_check(config: &Config) -> anyhow::Result<()> {
    println!("=== Campus-Corpus Check ===\n");

    println!("Crawler Configuration:");
    println!("  Target domain: {}", config.crawler.target_domain);
    println!("  Max URLs: {}", config.crawler.max_urls);
    println!(
        "  Timeouts: {}ms discovery, {}ms extraction",
        config.crawler.discovery_timeout_ms, config.crawler.extraction_timeout_ms
    );
    println!(
        "  Delays: {}ms discovery, {}ms extraction",
        config.crawler.discovery_delay_ms, config.crawler.request_delay_ms
    );
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.user_agent_string());

    println!("\nFilter:");
    println!("  Stale years: {}", config.filter.stale_years.join(", "));
    println!("  Noise keywords: {}", config.filter.noise_keywords.join(", "));
    println!(
        "  Skipped extensions: {}",
        config.filter.skip_extensions.join(" ")
    );

    println!("\nNormalizer:");
    println!("  Min text length: {}", config.normalizer.min_text_length);
    println!("  Junk rules: {}", config.normalizer.junk.len());

    println!("\nOutput:");
    println!("  URL map: {}", config.output.url_map_path.display());
    println!("  Raw corpus: {}", config.output.raw_corpus_path.display());
    println!("  Final corpus: {}", config.output.final_corpus_path.display());

    println!("\nSeeds ({}):", config.crawler.seeds.len());
    for seed in &config.crawler.seeds {
        println!("  * {}", seed);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles `clean`: normalizes the raw corpus into the final corpus
fn handle_clean(config: &Config) -> anyhow::Result<()> {
    let normalizer =
        Normalizer::from_config(&config.normalizer).context("invalid normalizer rules")?;
    let report = normalizer
        .clean_file(
            &config.output.raw_corpus_path,
            &config.output.final_corpus_path,
        )
        .context("cleaning failed")?;
    print_clean_report(&report);
    Ok(())
}

/// Handles `map`, `ingest` and `run`
async fn handle_crawl(config: Config, command: Command) -> anyhow::Result<()> {
    let control = CrawlControl::new();
    let _signal = control.cancel_on_ctrl_c();
    let coordinator = Coordinator::new(config.clone(), control.clone())
        .context("could not set up the crawler")?;

    if matches!(command, Command::Map | Command::Run) {
        let report = coordinator.map().await.context("discovery failed")?;
        print_map_report(&report);
    }

    if matches!(command, Command::Ingest | Command::Run) {
        if control.is_cancelled() {
            tracing::warn!("Interrupted, skipping ingestion");
            return Ok(());
        }
        let report = coordinator.ingest().await.context("ingestion failed")?;
        print_ingest_report(&report);
    }

    if command == Command::Run {
        if control.is_cancelled() {
            tracing::warn!("Interrupted, skipping cleaning");
            return Ok(());
        }
        handle_clean(&config)?;
    }

    Ok(())
}
