//! Error types shared by the loader and the transforms.

use std::path::PathBuf;
use thiserror::Error;

/// Which of the two loaded tables a request was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Day,
    Hour,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Day => write!(f, "day"),
            TableKind::Hour => write!(f, "hour"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Source file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content (bad row shape, unparseable number or date).
    #[error("malformed data in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{} row {row}: {reason}", path.display())]
    InvalidRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("{} contains no data rows", path.display())]
    EmptyTable { path: PathBuf },

    /// A transform referenced a column the table does not carry, or one that
    /// cannot be used in the requested role.
    #[error("invalid column '{column}' for {table} table")]
    InvalidColumn { column: String, table: TableKind },
}

impl DashboardError {
    /// True for errors raised while loading the source tables. These halt
    /// startup; everything else is local to a single chart.
    pub fn is_load_error(&self) -> bool {
        !matches!(self, DashboardError::InvalidColumn { .. })
    }

    pub(crate) fn invalid_column(column: impl Into<String>, table: TableKind) -> Self {
        DashboardError::InvalidColumn {
            column: column.into(),
            table,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
