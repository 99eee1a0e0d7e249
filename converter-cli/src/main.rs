//! Converter CLI
//!
//! Prints expense totals, then the same totals converted through a live
//! exchange rate:
//! - Load configuration from flags and environment
//! - Build the rate fetcher and conversion controller
//! - Render the dashboard before and after conversion

mod config;
mod dashboard;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_client::{DEFAULT_ENDPOINT, RateFetcher};
use converter_core::ConversionController;

use crate::config::Config;
use crate::dashboard::{Dashboard, Expense, FAILURE_NOTICE, parse_expense};

#[derive(Parser)]
#[command(name = "convert")]
#[command(author, version, about = "Show expense totals converted between currencies", long_about = None)]
struct Cli {
    /// Conversion endpoint URL
    #[arg(long, env = "CONVERTER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, env = "CONVERTER_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Quiet period before a refresh, in milliseconds
    #[arg(long, env = "CONVERTER_DEBOUNCE_MS", default_value_t = 250)]
    debounce_ms: u64,

    /// Currency the expenses are recorded in (USD, EUR)
    #[arg(long, default_value = "USD")]
    from: String,

    /// Currency to convert into (USD, EUR)
    #[arg(long, default_value = "EUR")]
    to: String,

    /// Print the converted report as JSON
    #[arg(long)]
    json: bool,

    /// Expense totals as category=amount
    #[arg(value_parser = parse_expense)]
    expenses: Vec<Expense>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so the rendered dashboard stays clean on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,converter_core=debug,converter_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::new(
        &cli.from,
        &cli.to,
        cli.endpoint,
        cli.timeout_secs,
        cli.debounce_ms,
    )?;

    tracing::info!("Converting {} via {}", config.pair, config.fetcher.endpoint);

    let fetcher = RateFetcher::new(config.fetcher.clone())?;
    let controller =
        ConversionController::with_config(config.pair, fetcher, config.controller.clone());
    let dashboard = Dashboard::new(controller, cli.expenses);

    if !cli.json {
        print!("{}", dashboard.render());
        println!();
    }

    let state = dashboard.show_converted(config.settle_deadline()).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&dashboard.report())?);
    } else if !state.failed {
        print!("{}", dashboard.render());
    }

    if state.failed {
        eprintln!("✗ {}", FAILURE_NOTICE);
        std::process::exit(1);
    }

    Ok(())
}
