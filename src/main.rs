//! CLI entry point for the bike-sharing dashboard.
//!
//! Loads the day and hour tables once, then renders the five charts either
//! for a single selection (`render`) or interactively (`shell`).

mod shell;

use anyhow::Result;
use bikeshare_dashboard::config::DashboardConfig;
use bikeshare_dashboard::dashboard::{AppState, Selection};
use bikeshare_dashboard::output::{print_json, write_correlations_csv};
use bikeshare_dashboard::schema::Measure;
use bikeshare_dashboard::transforms::{Year, correlate};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare-dashboard")]
#[command(about = "Charts and statistics for the bike-sharing dataset", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: DashboardConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render all charts once for the given selection
    Render {
        /// Day shown in the hourly chart (defaults to the first day in the data)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Measure to correlate against: cnt, casual or registered
        #[arg(short, long, default_value = "cnt")]
        target: Measure,

        /// Restrict the yearly chart to 2011 or 2012
        #[arg(short, long)]
        year: Option<Year>,

        /// Also log every chart model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive prompt that re-renders on every change
    Shell,
    /// Rank covariates by correlation with a measure
    Correlate {
        /// Measure to correlate against: cnt, casual or registered
        #[arg(short, long, default_value = "cnt")]
        target: Measure,

        /// Optional: also write the ranking to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    // Load errors are fatal: nothing renders without both tables.
    let state = AppState::load(&config)?;

    match cli.command {
        Commands::Render {
            date,
            target,
            year,
            json,
        } => {
            let mut selection = Selection {
                target,
                year,
                ..state.default_selection()
            };
            if let Some(date) = date {
                if state.contains_date(date) {
                    selection.date = date;
                } else {
                    let (first, last) = state.date_bounds();
                    warn!(%date, %first, %last, "Date outside the data range, using the first day");
                }
            }
            let rendered = shell::render_cycle(&state, &selection, &config)?;
            if json {
                for figure in rendered.iter().filter_map(|r| r.figure.as_ref().ok()) {
                    print_json(figure)?;
                }
            }
        }
        Commands::Shell => {
            shell::run(&state, &config)?;
        }
        Commands::Correlate { target, csv } => {
            let result = correlate(state.hour().rows(), target)?;

            for (rank, c) in result
                .sorted(bikeshare_dashboard::transforms::SortOrder::Descending)
                .iter()
                .enumerate()
            {
                info!(
                    rank = rank + 1,
                    covariate = c.label,
                    abs_correlation = c.value,
                    "Correlation with {}",
                    target
                );
            }

            let top: Vec<_> = result.most(config.top_n).iter().map(|c| c.label).collect();
            let bottom: Vec<_> = result.least(config.top_n).iter().map(|c| c.label).collect();
            info!(most = ?top, least = ?bottom, "Correlation summary");

            if let Some(path) = csv {
                write_correlations_csv(&path, &result)?;
                info!(path = %path.display(), "Correlation ranking written");
            }
        }
    }

    Ok(())
}
