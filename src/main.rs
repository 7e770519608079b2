//! Kumo main entry point.

use clap::Parser;
use kumo::config::load_config;
use kumo::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Kumo: a single-site link mapper
///
/// Kumo crawls one website from a seed URL, following same-site links up
/// to a configurable depth while honoring robots.txt, and writes the
/// deduplicated list of discovered URLs to a text file.
#[derive(Parser, Debug)]
#[command(name = "kumo")]
#[command(version)]
#[command(about = "Maps the reachable pages of a single site", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)?;

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let summary = crawl(config).await?;

    println!();
    println!("Crawl finished in {:.2?}", summary.elapsed);
    println!("  Pages fetched:    {}", summary.pages_fetched);
    println!("  URLs discovered:  {}", summary.urls_discovered);
    println!("  Denied by robots: {}", summary.denied_by_robots);
    println!("  Non-HTML skipped: {}", summary.non_html);
    println!("  Fetch errors:     {}", summary.fetch_errors);
    println!("  URL list:         {}", summary.output_path.display());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kumo=info,warn"),
            1 => EnvFilter::new("kumo=debug,info"),
            2 => EnvFilter::new("kumo=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Handles --dry-run: shows the validated configuration without crawling
fn print_dry_run(config: &kumo::Config) {
    println!("=== Kumo Dry Run ===\n");

    println!("Site:");
    println!("  Seed: {}", config.site.seed);

    println!("\nCrawler:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!(
        "  Max concurrent requests: {}",
        config.crawler.max_concurrent_requests
    );
    println!("  Ignore robots.txt: {}", config.crawler.ignore_robots);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.full_user_agent());

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);

    println!("\n✓ Configuration is valid");
}
