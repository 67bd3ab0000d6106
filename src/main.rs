use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playtrend::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "playtrend",
    version,
    about = "Play Store review trend analyzer with topic classification and week-over-week growth",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file (environment variables are used otherwise)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate mock reviews for each day of the window and analyze them
    Analyze {
        /// Target date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        target_date: Option<NaiveDate>,

        /// Number of days to look back
        #[arg(short, long)]
        lookback_days: Option<u32>,

        /// Maximum reviews per day
        #[arg(short, long)]
        max_reviews: Option<usize>,

        /// Output directory for reports
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Seed for mock review generation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write the seeded synthetic demonstration report
    Sample {
        /// Target date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        target_date: Option<NaiveDate>,

        /// Output directory for reports
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// List topics and their matching patterns
    Topics,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    // Initialize tracing/logging
    let log_format = cli.log_format.as_deref().unwrap_or(&config.logging.format);
    setup_tracing(log_format, &config.logging.level, cli.verbose)?;

    config.validate()?;

    tracing::info!(app_id = %config.app.app_id, "playtrend starting");

    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Analyze {
            target_date,
            lookback_days,
            max_reviews,
            output_dir,
            seed,
        } => {
            let params = commands::AnalyzeParams {
                target_date: target_date.unwrap_or(today),
                lookback_days: lookback_days.unwrap_or(config.analysis.lookback_days),
                max_reviews: max_reviews.unwrap_or(config.analysis.max_reviews_per_day),
                output_dir: output_dir.unwrap_or_else(|| config.output.reports_dir.clone()),
                seed,
            };
            tracing::info!(
                target_date = %params.target_date,
                lookback_days = %params.lookback_days,
                max_reviews = %params.max_reviews,
                seed = ?params.seed,
                "Starting analyze command"
            );
            commands::analyze(&config, params)?;
        }

        Commands::Sample {
            target_date,
            output_dir,
        } => {
            let target_date = target_date.unwrap_or(today);
            let output_dir = output_dir.unwrap_or_else(|| config.output.reports_dir.clone());
            tracing::info!(target_date = %target_date, "Starting sample command");
            commands::sample(&config, target_date, &output_dir)?;
        }

        Commands::Topics => {
            commands::topics(&config)?;
        }
    }

    tracing::info!("playtrend completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("playtrend=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("playtrend={level},warn"))?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
