//! Typed schema for the bike-sharing tables.
//!
//! Column names from the CSV headers are resolved once into [`Column`];
//! transforms then read rows through the [`Record`] trait instead of by
//! string lookup.

mod columns;
mod hour_group;
mod records;

pub use columns::{Column, Measure};
pub use hour_group::HourGroup;
pub use records::{DailyRecord, GroupValue, HourlyRecord, Observation, Record};

#[cfg(test)]
pub(crate) use records::fixtures;

use crate::error::{DashboardError, Result};

/// Resolves a raw column name against a table's schema.
pub fn resolve_column<R: Record>(name: &str) -> Result<Column> {
    Column::from_name(name)
        .filter(|c| R::has_column(*c))
        .ok_or_else(|| DashboardError::invalid_column(name, R::TABLE))
}
