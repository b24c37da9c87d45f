//! Workforce Insights CLI
//!
//! Loads the workforce table, applies a state/industry selection and prints
//! the dashboard summary or chart series.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::warn;

use workforce_insights::analysis::{build_charts, build_summary_with};
use workforce_insights::config::{DATA_PATH_ENV, DEFAULT_DATA_FILE, DEFAULT_TOP_N};
use workforce_insights::data::{filter, shared, Dataset, Selection};
use workforce_insights::report::SummaryReport;

/// Industrial workforce dashboard over Indian state statistics
#[derive(Parser, Debug)]
#[command(name = "workforce-insights")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Data file (.csv, .tsv, .json or .parquet)
    #[arg(short, long, global = true, env = DATA_PATH_ENV, default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// KPIs, top-N tables and take-aways for a selection
    Summary {
        #[command(flatten)]
        filters: FilterArgs,

        /// Rows per top-N table
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Chart series (JSON) for a selection
    Charts {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List distinct states
    States,

    /// List distinct industry groups
    Industries,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// State to include (repeatable; all states when omitted)
    #[arg(short, long = "state")]
    states: Vec<String>,

    /// Industry group to include (repeatable; all industries when omitted)
    #[arg(short, long = "industry")]
    industries: Vec<String>,
}

impl FilterArgs {
    /// Omitted flags mean "everything", the dashboard's initial state.
    fn selection(&self, dataset: &Dataset) -> Selection {
        let all = Selection::all(dataset);
        Selection {
            states: if self.states.is_empty() {
                all.states
            } else {
                self.states.iter().cloned().collect()
            },
            industries: if self.industries.is_empty() {
                all.industries
            } else {
                self.industries.iter().cloned().collect()
            },
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let dataset = shared(&cli.data)
        .with_context(|| format!("loading workforce data from {}", cli.data.display()))?;

    match cli.command {
        Commands::Summary {
            filters,
            top,
            format,
        } => {
            let view = filter(dataset, &filters.selection(dataset));
            if view.is_empty() {
                warn!("No data available for selected filters. Please select other options.");
                return Ok(());
            }
            let summary = build_summary_with(&view, top)?;
            match format {
                Format::Text => print!("{}", SummaryReport(&summary)),
                Format::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&summary).context("serializing summary")?
                ),
            }
        }

        Commands::Charts { filters } => {
            let view = filter(dataset, &filters.selection(dataset));
            if view.is_empty() {
                warn!("No data available for selected filters. Please select other options.");
            }
            let charts = build_charts(&view);
            println!(
                "{}",
                serde_json::to_string_pretty(&charts).context("serializing chart data")?
            );
        }

        Commands::States => {
            for state in dataset.distinct_states() {
                println!("{state}");
            }
        }

        Commands::Industries => {
            for industry in dataset.distinct_industries() {
                println!("{industry}");
            }
        }
    }

    Ok(())
}
