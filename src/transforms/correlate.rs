use serde::Serialize;
use std::cmp::Ordering;

use crate::error::{DashboardError, Result};
use crate::schema::{Column, Measure, Record};
use crate::transforms::normalize::{is_constant, mean};

/// Explanatory columns correlated against the selected measure, with their
/// display labels. Order is the display order for ties.
pub static COVARIATES: &[(Column, &str)] = &[
    (Column::Month, "Month"),
    (Column::Holiday, "Holiday"),
    (Column::Weekday, "Weekday"),
    (Column::WorkingDay, "Working Day"),
    (Column::WeatherSituation, "Weather"),
    (Column::Temperature, "Temperature"),
    (Column::FeelingTemperature, "Feeling Temperature"),
    (Column::Humidity, "Humidity"),
    (Column::Windspeed, "Windspeed"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Magnitude of the Pearson correlation between one covariate and the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub label: &'static str,
    pub column: Column,
    /// `|r|`; NaN when either series has zero variance.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub target: Measure,
    entries: Vec<Correlation>,
}

impl CorrelationResult {
    /// Entries in covariate order.
    pub fn entries(&self) -> &[Correlation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&Correlation> {
        self.entries.iter().find(|c| c.label == label)
    }

    /// All entries ranked by magnitude. NaN entries go last in either order.
    ///
    /// The ascending ranking is the exact reverse of the descending one over
    /// the finite entries, so ties break the same way in both and a top-5 /
    /// bottom-5 split of nine entries always shares exactly one label.
    pub fn sorted(&self, order: SortOrder) -> Vec<Correlation> {
        let (mut finite, undefined): (Vec<_>, Vec<_>) =
            self.entries.iter().cloned().partition(|c| !c.value.is_nan());

        finite.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        if order == SortOrder::Ascending {
            finite.reverse();
        }

        finite.extend(undefined);
        finite
    }

    /// The `n` most correlated covariates, strongest first.
    pub fn most(&self, n: usize) -> Vec<Correlation> {
        let mut ranked = self.sorted(SortOrder::Descending);
        ranked.truncate(n);
        ranked
    }

    /// The `n` least correlated covariates, weakest first.
    pub fn least(&self, n: usize) -> Vec<Correlation> {
        let mut ranked = self.sorted(SortOrder::Ascending);
        ranked.truncate(n);
        ranked
    }
}

/// Pearson correlation coefficient of two equally long series.
///
/// NaN if there are fewer than two points or either series is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    if is_constant(xs) || is_constant(ys) {
        return f64::NAN;
    }
    let (mx, my) = (mean(xs), mean(ys));

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mx, y - my);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x * var_y).sqrt()
}

/// Correlates every covariate in [`COVARIATES`] with `target` over all rows.
pub fn correlate<R: Record>(rows: &[R], target: Measure) -> Result<CorrelationResult> {
    let target_values = column_values(rows, target.column())?;

    let entries = COVARIATES
        .iter()
        .map(|&(column, label)| {
            let values = column_values(rows, column)?;
            Ok(Correlation {
                label,
                column,
                value: pearson(&values, &target_values).abs(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorrelationResult { target, entries })
}

/// Same as [`correlate`] with the target given by name (`cnt`, `casual`,
/// `registered`, or a selector label).
pub fn correlate_by_name<R: Record>(rows: &[R], target: &str) -> Result<CorrelationResult> {
    let measure = target
        .parse::<Measure>()
        .map_err(|_| DashboardError::invalid_column(target, R::TABLE))?;
    correlate(rows, measure)
}

fn column_values<R: Record>(rows: &[R], column: Column) -> Result<Vec<f64>> {
    if !R::has_column(column) {
        return Err(DashboardError::invalid_column(column.name(), R::TABLE));
    }
    rows.iter()
        .map(|r| {
            r.numeric(column)
                .ok_or_else(|| DashboardError::invalid_column(column.name(), R::TABLE))
        })
        .collect()
}
