//! togglq - time-tracking report queries from the command line
//!
//! Parses report queries and runs them against detailed report exports.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Config: $XDG_CONFIG_HOME/togglq/config.toml (~/.config/togglq/config.toml)
//! - Logs: $XDG_STATE_HOME/togglq/ (~/.local/state/togglq/)

mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use togglq_core::query::{self, Query};
use togglq_core::retrieval::{ExportSource, ReportCoordinator, ReportExport};
use togglq_core::Config;

#[derive(Parser)]
#[command(name = "togglq")]
#[command(about = "Parse time-tracking report queries and run them against exports")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a query and print the resulting descriptor
    Parse {
        /// Query text, e.g. "LIST PAST 2 WEEKS SORT DESC"
        query: String,

        /// Evaluate relative intervals against this date instead of today
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Run a query against a detailed report export
    Report {
        /// Query text
        query: String,

        /// JSON export holding `directory` and `rows`
        #[arg(short, long)]
        data: PathBuf,

        /// Evaluate relative intervals against this date instead of today
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_query(input: &str, today: Option<NaiveDate>) -> Result<Query> {
    let query = match today {
        Some(today) => query::parse_at(input, today)?,
        None => query::parse(input)?,
    };
    Ok(query)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging (to file, stdout carries the report)
    let _log_guard =
        togglq_core::logging::init(&config.logging).context("failed to initialize logging")?;

    match args.command {
        Command::Parse {
            query,
            today,
            format,
        } => {
            let query = parse_query(&query, today)?;
            match format {
                OutputFormat::Text => print!("{}", output::describe_query(&query)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&query)?),
            }
        }
        Command::Report {
            query,
            data,
            today,
            format,
        } => {
            let query = parse_query(&query, today)?;
            let export = ReportExport::load(&data)
                .with_context(|| format!("failed to load report export {}", data.display()))?;
            tracing::info!(path = %data.display(), rows = export.rows.len(), "Loaded report export");

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to create tokio runtime")?;

            let directory = export.directory.clone();
            let rows = runtime.block_on(async {
                let coordinator = ReportCoordinator::from_config(
                    ExportSource::new(export),
                    directory.clone(),
                    &config,
                );
                coordinator.detailed_report(&query).await
            })?;

            match format {
                OutputFormat::Text => print!("{}", output::render_report(&query, &rows, &directory)),
                OutputFormat::Json => {
                    let value = output::report_json(&query, &rows, &directory);
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
            }
        }
    }

    Ok(())
}
