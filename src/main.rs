use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{ArgAction, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use muse_trending::config::Config;
use muse_trending::muse::client::MuseClient;
use muse_trending::output::{self, terminal};
use muse_trending::pipeline::trending::{self, ProcessParams};
use muse_trending::trends::normalizer::Normalizer;
use muse_trending::trends::stop_words::load_stop_words;

/// muse-trending: find the vocabulary that is trending in recent job postings.
///
/// Recent postings (optionally in one location) are compared against the
/// whole retrieved population, and terms over-represented in the recent
/// set are ranked by TF-IDF.
#[derive(Parser)]
#[command(name = "muse-trending", version, about)]
struct Cli {
    /// Number of pages to process
    #[arg(long, default_value = "10")]
    num_pages: u32,

    /// First page to request
    #[arg(long, default_value = "0")]
    start_page: u32,

    /// Include jobs with flexible location in the analysis
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    flexible: bool,

    /// Analyze jobs for a specific location (exact match, e.g. "New York, NY")
    #[arg(long)]
    location: Option<String>,

    /// Analyze jobs published in the last N days
    #[arg(long, default_value = "30")]
    days: u32,

    /// Number of trending terms to display
    #[arg(long, default_value = "10")]
    num_results: usize,

    /// Number of pages fetched in parallel (default: MUSE_CONCURRENCY or 8)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    concurrency: Option<u32>,

    /// Stop-word file, one word per line (default: MUSE_STOP_WORDS or built-in English)
    #[arg(long)]
    stop_words: Option<PathBuf>,

    /// Print the full report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("muse_trending=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let stop_words_path = cli.stop_words.or(config.stop_words_path.clone());
    let stop_words = load_stop_words(stop_words_path.as_deref())?;
    let normalizer = Arc::new(Normalizer::new(stop_words)?);
    info!(stop_words = normalizer.stop_word_count(), "Normalizer ready");

    let client = MuseClient::new(&config.api_url, config.http_timeout)?;

    let params = ProcessParams {
        start_page: cli.start_page,
        num_pages: cli.num_pages,
        flexible: cli.flexible,
        location: cli.location,
        window_days: cli.days,
        concurrency: cli
            .concurrency
            .map(|n| n as usize)
            .unwrap_or(config.concurrency),
    };

    let pb = if cli.json {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(u64::from(params.num_pages));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Pages [{bar:30}] {pos}/{len} ({eta})")?,
        );
        pb
    };

    let report = trending::run(&client, normalizer, &params, &pb).await?;
    pb.finish_and_clear();

    if cli.json {
        println!("{}", output::report_json(&report)?);
        return Ok(());
    }

    println!("{}", "Finished processing".bold());
    terminal::display_summary(&report);
    terminal::display_trending_terms(&report.terms, cli.num_results);

    Ok(())
}
