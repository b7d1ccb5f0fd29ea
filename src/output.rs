//! Writing rendered charts to disk.
//!
//! Each figure becomes `<name>.svg`; the whole cycle is also captured as a
//! `dashboard.json` snapshot so another front end can redraw it.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::charts::{Figure, to_svg};
use crate::dashboard::{ChartKind, Rendered, Selection};
use crate::transforms::CorrelationResult;

pub const SNAPSHOT_FILE: &str = "dashboard.json";

#[derive(Debug, Serialize)]
pub struct ChartEntry<'a> {
    pub chart: ChartKind,
    pub heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figure: Option<&'a Figure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything shown for one selection.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub generated_at: DateTime<Utc>,
    pub selection: &'a Selection,
    pub charts: Vec<ChartEntry<'a>>,
}

impl<'a> Snapshot<'a> {
    pub fn new(selection: &'a Selection, rendered: &'a [Rendered]) -> Self {
        let charts = rendered
            .iter()
            .map(|r| ChartEntry {
                chart: r.kind,
                heading: r.kind.heading(selection),
                figure: r.figure.as_ref().ok(),
                error: r.figure.as_ref().err().map(|e| e.to_string()),
            })
            .collect();
        Self {
            generated_at: Utc::now(),
            selection,
            charts,
        }
    }
}

/// Writes `figure` as `<dir>/<name>.svg` and returns the path.
pub fn write_svg(dir: &Path, figure: &Figure) -> Result<PathBuf> {
    let path = dir.join(format!("{}.svg", figure.name));
    fs::write(&path, to_svg(figure))?;
    debug!(path = %path.display(), "Chart written");
    Ok(path)
}

/// Writes every successfully rendered chart plus the JSON snapshot.
/// Returns the paths of the files written.
pub fn write_dashboard(dir: &Path, selection: &Selection, rendered: &[Rendered]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for figure in rendered.iter().filter_map(|r| r.figure.as_ref().ok()) {
        written.push(write_svg(dir, figure)?);
    }

    let snapshot_path = dir.join(SNAPSHOT_FILE);
    let writer = BufWriter::new(File::create(&snapshot_path)?);
    serde_json::to_writer_pretty(writer, &Snapshot::new(selection, rendered))?;
    written.push(snapshot_path);

    info!(dir = %dir.display(), files = written.len(), "Dashboard written");
    Ok(written)
}

#[derive(Debug, Serialize)]
struct CorrelationRow<'a> {
    rank: usize,
    target: String,
    covariate: &'a str,
    column: &'a str,
    abs_correlation: f64,
}

/// Writes the ranked correlations (strongest first) as CSV.
pub fn write_correlations_csv(path: &Path, result: &CorrelationResult) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;

    for (i, c) in result
        .sorted(crate::transforms::SortOrder::Descending)
        .iter()
        .enumerate()
    {
        writer.serialize(CorrelationRow {
            rank: i + 1,
            target: result.target.to_string(),
            covariate: c.label,
            column: c.column.name(),
            abs_correlation: c.value,
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// Logs a figure as pretty-printed JSON.
pub fn print_json(figure: &Figure) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(figure)?);
    Ok(())
}
