//! Runtime configuration.
//!
//! Every setting can come from a flag or an environment variable (a `.env`
//! file is loaded first by the binary).

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct DashboardConfig {
    /// Per-day CSV (may be gzip-compressed with a .gz suffix)
    #[arg(long = "day", env = "BIKESHARE_DAY_CSV", default_value = "data/day.csv")]
    pub day_path: PathBuf,

    /// Per-hour CSV (may be gzip-compressed with a .gz suffix)
    #[arg(long = "hour", env = "BIKESHARE_HOUR_CSV", default_value = "data/hour.csv")]
    pub hour_path: PathBuf,

    /// Directory the rendered charts are written to
    #[arg(short, long, env = "BIKESHARE_OUTPUT_DIR", default_value = "dashboard")]
    pub output_dir: PathBuf,

    /// Number of covariates shown in each correlation panel
    #[arg(long = "top", env = "BIKESHARE_TOP_N", default_value_t = 5)]
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            day_path: PathBuf::from("data/day.csv"),
            hour_path: PathBuf::from("data/hour.csv"),
            output_dir: PathBuf::from("dashboard"),
            top_n: 5,
        }
    }
}
