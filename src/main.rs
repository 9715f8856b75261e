//! Shelf-Scout main entry point
//!
//! This is the command-line interface for the Shelf-Scout catalog crawler.

use clap::Parser;
use rust_decimal::Decimal;
use shelf_scout::config::{load_config_with_hash, validate, Config, ConfigOverrides};
use shelf_scout::crawler::Coordinator;
use shelf_scout::filter::ListingFilter;
use shelf_scout::output::{
    compute_statistics, configured_outputs, print_receipt, print_statistics, publish_records,
    write_all,
};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Shelf-Scout: a book-catalog crawler
///
/// Shelf-Scout discovers the categories of a book-catalog site, walks every
/// listing page of the requested categories and exports one record per book
/// as JSON and XML, optionally forwarding them to an HTTP endpoint.
#[derive(Parser, Debug)]
#[command(name = "shelf-scout")]
#[command(version = "1.0.0")]
#[command(about = "A book-catalog crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE", env = "SHELF_SCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Root URL of the catalog site
    #[arg(long, env = "SHELF_SCOUT_BASE_URL")]
    base_url: Option<String>,

    /// Category to crawl (repeatable)
    #[arg(
        long = "category",
        value_name = "NAME",
        env = "SHELF_SCOUT_CATEGORIES",
        value_delimiter = ','
    )]
    categories: Vec<String>,

    /// Listing pages fetched per category before giving up on it
    #[arg(long, env = "SHELF_SCOUT_MAX_PAGES")]
    max_pages: Option<u32>,

    /// Keep only books priced at or above this
    #[arg(long, env = "SHELF_SCOUT_MIN_PRICE")]
    min_price: Option<Decimal>,

    /// Keep only books priced at or below this
    #[arg(long, env = "SHELF_SCOUT_MAX_PRICE")]
    max_price: Option<Decimal>,

    /// Keep only books with exactly this star rating
    #[arg(long, env = "SHELF_SCOUT_RATING", value_parser = clap::value_parser!(u8).range(0..=5))]
    rating: Option<u8>,

    /// Where to write the JSON export
    #[arg(long, env = "SHELF_SCOUT_JSON_PATH")]
    json_path: Option<String>,

    /// Where to write the XML export
    #[arg(long, env = "SHELF_SCOUT_XML_PATH")]
    xml_path: Option<String>,

    /// Endpoint that receives the filtered records
    #[arg(long, env = "SHELF_SCOUT_ENDPOINT")]
    endpoint: Option<String>,

    /// Skip posting the records to the endpoint
    #[arg(long)]
    no_publish: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the categories the site offers and exit
    #[arg(long, conflicts_with = "dry_run")]
    list_categories: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "list_categories")]
    dry_run: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            categories: self.categories.clone(),
            max_pages_per_category: self.max_pages,
            min_price: self.min_price,
            max_price: self.max_price,
            rating: self.rating,
            json_path: self.json_path.clone(),
            xml_path: self.xml_path.clone(),
            endpoint: self.endpoint.clone(),
            no_publish: self.no_publish,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, then layer the command line on top
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };
    config.apply_overrides(cli.overrides());

    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.list_categories {
        handle_list_categories(&config).await?;
    } else {
        handle_crawl(&config).await?;
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
            0 => EnvFilter::new("shelf_scout=info,warn"),
            1 => EnvFilter::new("shelf_scout=debug,info"),
            2 => EnvFilter::new("shelf_scout=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Shelf-Scout Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Base URL: {}", config.scraper.base_url);
    println!(
        "  Max pages per category: {}",
        config.scraper.max_pages_per_category
    );
    println!("  HTTP timeout: {}s", config.http.timeout_seconds);
    println!(
        "  User agent: {}/{}",
        config.user_agent.name, config.user_agent.version
    );

    let categories = config.requested_categories();
    println!("\nCategories ({}):", categories.len());
    for name in &categories {
        println!("  - {}", name);
    }

    println!("\nFilters:");
    print_bound("Min price", config.filters.min_price);
    print_bound("Max price", config.filters.max_price);
    match config.filters.rating {
        Some(rating) => println!("  Rating: {}", rating),
        None => println!("  Rating: any"),
    }

    println!("\nOutput:");
    println!("  JSON: {}", config.output.json_path);
    println!("  XML: {}", config.output.xml_path);
    if config.api.enabled {
        println!("  Publish to: {}", config.api.endpoint);
    } else {
        println!("  Publish: disabled");
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} categories", categories.len());
}

fn print_bound(label: &str, bound: Option<Decimal>) {
    match bound {
        Some(value) => println!("  {}: {}", label, value),
        None => println!("  {}: none", label),
    }
}

/// Handles the --list-categories mode: prints the site's category map
async fn handle_list_categories(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = Coordinator::from_config(config)?;
    let map = coordinator.discover_categories().await?;

    println!("Categories on {} ({}):", coordinator.base_url(), map.len());
    for entry in map.iter() {
        println!("  {} -> {}", entry.label, entry.path);
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let cancel = CancellationToken::new();
    let coordinator = Coordinator::from_config(config)?.with_cancellation(cancel.clone());

    // Stop between pages on Ctrl-C
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            cancel.cancel();
        }
    });

    let categories = config.requested_categories();
    tracing::info!(
        "Crawling {} categories from {}",
        categories.len(),
        coordinator.base_url()
    );

    let report = match coordinator.crawl_report(&categories).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if report.was_cancelled() {
        tracing::warn!("Crawl was interrupted; exporting partial results");
    }

    print_statistics(&compute_statistics(&report));

    let filter = ListingFilter::from(&config.filters);
    let records = filter.apply(&report.records);
    if !filter.is_empty() {
        tracing::info!(
            "Filter kept {} of {} records",
            records.len(),
            report.records.len()
        );
    }

    for (name, result) in write_all(&configured_outputs(&config.output), &records) {
        match result {
            Ok(()) => println!("✓ {} export written", name),
            Err(e) => println!("✗ {} export failed: {}", name, e),
        }
    }

    if config.api.enabled {
        match publish_records(coordinator.fetcher().client(), &config.api, &records).await {
            Ok(receipt) => print_receipt(&receipt),
            Err(e) => tracing::error!("Publishing failed: {}", e),
        }
    }

    Ok(())
}
