//! Data transforms feeding the charts.
//!
//! Group-by aggregation, z-score normalization and covariate correlation,
//! plus the per-chart views composed from them. Everything here is a pure
//! function of its inputs.

pub mod aggregate;
pub mod correlate;
pub mod normalize;
pub mod views;

pub use aggregate::{AggregationResult, aggregate, aggregate_by_name};
pub use correlate::{
    COVARIATES, Correlation, CorrelationResult, SortOrder, correlate, correlate_by_name, pearson,
};
pub use normalize::{is_constant, mean, sample_stddev, zscore};
pub use views::{
    HourGroupShare, HourlyPoint, LabeledTotal, WeekdayStats, WeeklyView, Year, YearlyView,
    hour_group_shares, hourly_slice, weekly_view, yearly_slice,
};
