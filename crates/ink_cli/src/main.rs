//! INK Token Model Command Line Interface
//!
//! Runs the emission, network growth and valuation projection and prints the
//! first months of the combined table followed by the key launch metrics.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ink_economics::{ModelConfig, Projection, Report, SchedulePolicy, DEFAULT_REPORT_ROWS};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ink-model")]
#[command(about = "INK token emission, network growth and valuation projections", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML model configuration (defaults to the built-in launch model)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Total token supply
    #[arg(long)]
    total_supply: Option<Decimal>,

    /// Projection horizon in months
    #[arg(long)]
    months: Option<usize>,

    /// Flat token price in USD
    #[arg(long)]
    initial_price: Option<Decimal>,

    /// Active users in month 0
    #[arg(long)]
    initial_users: Option<Decimal>,

    /// Models processed in month 0
    #[arg(long)]
    initial_models: Option<Decimal>,

    /// Cut allocation schedules that run past the horizon instead of failing
    #[arg(long)]
    truncate_schedules: bool,

    /// Number of monthly rows to print
    #[arg(long, default_value_t = DEFAULT_REPORT_ROWS)]
    rows: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Log output style
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    let config = build_config(&cli)?;
    debug!("Effective configuration: {:?}", config);

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let projection = Projection::from_config(&config).context("Projection failed")?;
    let report = Report::new(&projection, cli.rows);

    match cli.format {
        OutputFormat::Table => print!("{}", report),
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
    }

    Ok(())
}

/// Layer CLI flags over the config file (or the built-in defaults).
fn build_config(cli: &Cli) -> Result<ModelConfig> {
    let mut config = match &cli.config {
        Some(path) => ModelConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ModelConfig::default(),
    };

    if let Some(total_supply) = cli.total_supply {
        config.token.total_supply = total_supply;
    }
    if let Some(months) = cli.months {
        config.months = months;
    }
    if let Some(price) = cli.initial_price {
        config.token.initial_price = price;
    }
    if let Some(users) = cli.initial_users {
        config.network.initial_users = users;
    }
    if let Some(models) = cli.initial_models {
        config.network.initial_models = models;
    }
    if cli.truncate_schedules {
        config.token.schedule_policy = SchedulePolicy::Truncate;
    }

    Ok(config)
}

fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the report
    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
