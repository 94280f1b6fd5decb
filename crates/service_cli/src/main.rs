//! Option pricer CLI
//!
//! Command-line entry point for the option pricing library.
//!
//! # Commands
//!
//! - `pricer price` - Price a call and a put (Black-Scholes, Monte Carlo or binomial)
//! - `pricer vol --prices <file>` - Historical volatility from closing prices
//! - `pricer check` - Show the effective configuration
//!
//! # Configuration
//!
//! Defaults come from `pricer.toml` (or `--config`), then `PRICER_*`
//! environment variables, then command-line flags. Logging goes to stderr
//! and honours `RUST_LOG`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod market_data;
mod output;

pub use error::{CliError, Result};

/// European and American option pricer
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (default: ./pricer.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a call and a put with the selected model
    Price(commands::price::PriceArgs),

    /// Estimate annualised volatility from a CSV of closing prices
    Vol {
        /// CSV file of closing prices
        #[arg(short, long)]
        prices: PathBuf,

        /// Price column in the CSV file
        #[arg(long, default_value = "Close")]
        column: String,

        /// Return definition (simple, log)
        #[arg(short, long, default_value = "simple")]
        returns: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check the effective configuration
    Check,
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: Commands, config: &config::PricerConfig) -> Result<()> {
    match command {
        Commands::Price(args) => commands::price::run(&args, config),
        Commands::Vol {
            prices,
            column,
            returns,
            format,
        } => commands::vol::run(&prices, &column, &returns, &format),
        Commands::Check => commands::check::run(config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = config::load(cli.config.as_deref());
    let level = if cli.verbose {
        "debug"
    } else {
        config
            .as_ref()
            .map(|c| c.logging.level.as_filter_str())
            .unwrap_or("info")
    };
    init_tracing(level);

    if cli.verbose {
        debug!("Verbose mode enabled");
    }

    match config
        .map_err(CliError::from)
        .and_then(|config| run(cli.command, &config))
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
