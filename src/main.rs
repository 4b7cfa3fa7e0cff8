//! Subtree-Scribe main entry point
//!
//! This is the command-line interface for the Subtree-Scribe scraper.

use clap::Parser;
use std::path::PathBuf;
use subtree_scribe::config::{load_config_with_hash, validate, Config};
use subtree_scribe::crawler::crawl;
use subtree_scribe::output::{convert_pages, print_report};
use subtree_scribe::url::CrawlRoot;
use tracing_subscriber::EnvFilter;

/// Subtree-Scribe: a polite subtree scraper
///
/// Subtree-Scribe crawls every page below a root URL on the same host,
/// one request at a time, stores the raw HTML and converts it to Markdown.
#[derive(Parser, Debug)]
#[command(name = "subtree-scribe")]
#[command(version)]
#[command(about = "A polite subtree scraper", long_about = None)]
struct Cli {
    /// Crawl root; only pages below this URL on the same host are visited
    #[arg(value_name = "URL", required_unless_present = "convert_only")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum crawl depth (overrides config)
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Consecutive revisits that stop the crawl (overrides config)
    #[arg(long, value_name = "N")]
    max_duplicates: Option<u32>,

    /// Delay before each request in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Directory for raw HTML pages (overrides config)
    #[arg(long, value_name = "DIR")]
    pages_dir: Option<String>,

    /// Directory for Markdown output (overrides config)
    #[arg(long, value_name = "DIR")]
    text_dir: Option<String>,

    /// Drop link targets from the Markdown output
    #[arg(long)]
    ignore_links: bool,

    /// Drop images from the Markdown output
    #[arg(long)]
    ignore_images: bool,

    /// Crawl only, do not convert pages afterwards
    #[arg(long, conflicts_with = "convert_only")]
    skip_convert: bool,

    /// Only convert previously stored pages
    #[arg(long, conflicts_with_all = ["skip_convert", "dry_run"])]
    convert_only: bool,

    /// Validate settings and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_effective_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    if cli.convert_only {
        convert_pages(&config.output)?;
        return Ok(());
    }

    // clap enforces the URL unless --convert-only
    let url = cli.url.as_deref().unwrap_or_default();

    if cli.dry_run {
        handle_dry_run(&config, url)?;
    } else {
        handle_crawl(config, url, cli.skip_convert).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("subtree_scribe=info,warn"),
            1 => EnvFilter::new("subtree_scribe=debug,info"),
            2 => EnvFilter::new("subtree_scribe=trace,debug"),
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

/// Loads the config file (if any) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(max_duplicates) = cli.max_duplicates {
        config.crawler.max_consecutive_duplicates = max_duplicates;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.request_delay = delay_ms;
    }
    if let Some(pages_dir) = &cli.pages_dir {
        config.output.pages_dir = pages_dir.clone();
    }
    if let Some(text_dir) = &cli.text_dir {
        config.output.text_dir = text_dir.clone();
    }
    config.output.ignore_links |= cli.ignore_links;
    config.output.ignore_images |= cli.ignore_images;

    // Re-check after applying flag overrides
    validate(&config)?;

    Ok(config)
}

/// Handles the --dry-run mode: validates settings and shows the crawl plan
fn handle_dry_run(config: &Config, url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let root = CrawlRoot::parse(url)?;

    println!("=== Subtree-Scribe Dry Run ===\n");

    println!("Crawl Root:");
    println!("  URL: {}", root);
    println!("  Host: {}", root.domain());
    println!("  Path prefix: {}", root.url().path());

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!(
        "  Max consecutive duplicates: {}",
        config.crawler.max_consecutive_duplicates
    );
    println!("  Request delay: {}ms", config.crawler.request_delay);
    println!("  Request timeout: {}s", config.crawler.request_timeout);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Pages: {}", config.output.pages_dir);
    println!("  Markdown: {}", config.output.text_dir);
    println!("  Ignore links: {}", config.output.ignore_links);
    println!("  Ignore images: {}", config.output.ignore_images);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation followed by conversion
async fn handle_crawl(
    config: Config,
    url: &str,
    skip_convert: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = config.output.clone();

    let report = match crawl(config, url).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_report(&report);

    if skip_convert {
        tracing::info!("Skipping conversion");
        return Ok(());
    }

    if report.pages_saved.is_empty() {
        tracing::warn!("No pages were saved, nothing to convert");
        return Ok(());
    }

    convert_pages(&output)?;
    Ok(())
}
