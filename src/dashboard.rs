//! Application state and the render cycle.
//!
//! [`AppState`] owns the two tables for the life of the process. Each user
//! interaction produces a new [`Selection`] and a full, synchronous
//! [`render_all`].

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::{error, info};

use crate::charts::{self, Figure};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::loader::{load_day_table, load_hour_table};
use crate::schema::Measure;
use crate::table::{DayTable, HourTable};
use crate::transforms::Year;

pub struct AppState {
    day: DayTable,
    hour: HourTable,
    first_date: NaiveDate,
    last_date: NaiveDate,
}

impl AppState {
    pub fn new(day: DayTable, hour: HourTable) -> Result<Self> {
        let (first_date, last_date) = day.date_range().ok_or_else(|| DashboardError::EmptyTable {
            path: day.source().to_path_buf(),
        })?;
        Ok(Self {
            day,
            hour,
            first_date,
            last_date,
        })
    }

    /// Loads both tables. Any failure here is fatal.
    pub fn load(config: &DashboardConfig) -> Result<Self> {
        let day = load_day_table(&config.day_path)?;
        let hour = load_hour_table(&config.hour_path)?;
        Self::new(day, hour)
    }

    pub fn day(&self) -> &DayTable {
        &self.day
    }

    pub fn hour(&self) -> &HourTable {
        &self.hour
    }

    /// Range the date selector is constrained to.
    pub fn date_bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.first_date, self.last_date)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        (self.first_date..=self.last_date).contains(&date)
    }

    /// First date, all users, both years.
    pub fn default_selection(&self) -> Selection {
        Selection {
            date: self.first_date,
            target: Measure::Total,
            year: None,
        }
    }
}

/// The user-controlled inputs of one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Selection {
    pub date: NaiveDate,
    pub target: Measure,
    pub year: Option<Year>,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "date={} target={}", self.date, self.target.label())?;
        match self.year {
            Some(y) => write!(f, " year={y}"),
            None => write!(f, " year=all"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Hourly,
    HourGroups,
    Weekly,
    Yearly,
    Correlation,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Hourly,
        ChartKind::HourGroups,
        ChartKind::Weekly,
        ChartKind::Yearly,
        ChartKind::Correlation,
    ];

    /// Heading shown above the chart.
    pub fn heading(self, selection: &Selection) -> String {
        match self {
            ChartKind::Hourly => format!("Daily view: {}", selection.date),
            ChartKind::HourGroups => "Hourly statistics".to_string(),
            ChartKind::Weekly => "Weekly statistics".to_string(),
            ChartKind::Yearly => "Yearly statistics".to_string(),
            ChartKind::Correlation => "Correlation comparison".to_string(),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Hourly => "hourly",
            ChartKind::HourGroups => "hour_groups",
            ChartKind::Weekly => "weekly",
            ChartKind::Yearly => "yearly",
            ChartKind::Correlation => "correlation",
        };
        f.write_str(name)
    }
}

/// Result of building one chart.
#[derive(Debug)]
pub struct Rendered {
    pub kind: ChartKind,
    pub figure: Result<Figure>,
}

/// Builds one chart for `selection`.
pub fn render_chart(state: &AppState, selection: &Selection, kind: ChartKind, top_n: usize) -> Result<Figure> {
    match kind {
        ChartKind::Hourly => Ok(charts::hourly::build(&state.hour, selection.date)),
        ChartKind::HourGroups => charts::hour_groups::build(&state.hour),
        ChartKind::Weekly => charts::weekly::build(&state.day),
        ChartKind::Yearly => charts::yearly::build(&state.hour, selection.year),
        ChartKind::Correlation => charts::correlation::build(state.hour.rows(), selection.target, top_n),
    }
}

/// Builds all five charts. A failing chart is logged and reported in its
/// slot; the others still render.
#[tracing::instrument(skip(state, selection), fields(selection = %selection))]
pub fn render_all(state: &AppState, selection: &Selection, top_n: usize) -> Vec<Rendered> {
    let rendered: Vec<Rendered> = ChartKind::ALL
        .into_iter()
        .map(|kind| {
            let figure = render_chart(state, selection, kind, top_n);
            if let Err(e) = &figure {
                error!(chart = %kind, error = %e, "Chart failed to render");
            }
            Rendered { kind, figure }
        })
        .collect();

    let ok = rendered.iter().filter(|r| r.figure.is_ok()).count();
    info!(ok, failed = rendered.len() - ok, "Render cycle complete");
    rendered
}
