//! Immutable in-memory tables.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::schema::{DailyRecord, HourlyRecord, Record};

/// Rows loaded from one source file. Never mutated after load; filtering
/// always yields a fresh `Vec`.
#[derive(Debug, Clone)]
pub struct Table<R> {
    source: PathBuf,
    rows: Vec<R>,
}

pub type DayTable = Table<DailyRecord>;
pub type HourTable = Table<HourlyRecord>;

impl<R: Record + Clone> Table<R> {
    pub fn new(source: impl Into<PathBuf>, rows: Vec<R>) -> Self {
        Self {
            source: source.into(),
            rows,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest date in the table.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(Record::date).min()?;
        let max = self.rows.iter().map(Record::date).max()?;
        Some((min, max))
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<R>
    where
        F: Fn(&R) -> bool,
    {
        self.rows.iter().filter(|r| predicate(r)).cloned().collect()
    }

    pub fn on_date(&self, date: NaiveDate) -> Vec<R> {
        self.filter(|r| r.date() == date)
    }
}
