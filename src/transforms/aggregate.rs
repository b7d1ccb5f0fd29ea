use std::collections::BTreeMap;

use crate::error::{DashboardError, Result};
use crate::schema::{Column, GroupValue, Record, resolve_column};

/// Per-group sums of the requested measures, keyed in ascending group order.
///
/// Groups with no rows are simply absent. Callers attach display labels
/// (weekday names, month names, ...) themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    key: Column,
    measures: Vec<Column>,
    groups: BTreeMap<GroupValue, Vec<f64>>,
}

impl AggregationResult {
    pub fn key(&self) -> Column {
        self.key
    }

    pub fn measures(&self) -> &[Column] {
        &self.measures
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = GroupValue> + '_ {
        self.groups.keys().copied()
    }

    /// Sum of `measure` for the group `value`.
    pub fn get(&self, value: GroupValue, measure: Column) -> Option<f64> {
        let idx = self.measure_index(measure)?;
        self.groups.get(&value).map(|sums| sums[idx])
    }

    /// `(group, sum)` pairs for one measure, in ascending group order.
    pub fn series(&self, measure: Column) -> Option<Vec<(GroupValue, f64)>> {
        let idx = self.measure_index(measure)?;
        Some(self.groups.iter().map(|(k, sums)| (*k, sums[idx])).collect())
    }

    /// Just the sums for one measure, in ascending group order.
    pub fn values(&self, measure: Column) -> Option<Vec<f64>> {
        let idx = self.measure_index(measure)?;
        Some(self.groups.values().map(|sums| sums[idx]).collect())
    }

    /// Sum of `measure` across all groups.
    pub fn total(&self, measure: Column) -> Option<f64> {
        Some(self.values(measure)?.iter().sum())
    }

    fn measure_index(&self, measure: Column) -> Option<usize> {
        self.measures.iter().position(|m| *m == measure)
    }
}

/// Groups `rows` by the distinct values of `key` and sums each of `measures`
/// per group.
///
/// # Errors
///
/// [`DashboardError::InvalidColumn`] if `key` is not a categorical column of
/// the table, or a measure is not a numeric column of the table.
pub fn aggregate<R: Record>(rows: &[R], key: Column, measures: &[Column]) -> Result<AggregationResult> {
    if !R::has_column(key) || !key.is_categorical() {
        return Err(DashboardError::invalid_column(key.name(), R::TABLE));
    }
    if let Some(bad) = measures.iter().find(|m| !R::has_column(**m) || !m.is_numeric()) {
        return Err(DashboardError::invalid_column(bad.name(), R::TABLE));
    }

    let mut groups: BTreeMap<GroupValue, Vec<f64>> = BTreeMap::new();

    for row in rows {
        let value = row
            .category(key)
            .ok_or_else(|| DashboardError::invalid_column(key.name(), R::TABLE))?;
        let sums = groups
            .entry(value)
            .or_insert_with(|| vec![0.0; measures.len()]);

        for (sum, measure) in sums.iter_mut().zip(measures) {
            *sum += row
                .numeric(*measure)
                .ok_or_else(|| DashboardError::invalid_column(measure.name(), R::TABLE))?;
        }
    }

    Ok(AggregationResult {
        key,
        measures: measures.to_vec(),
        groups,
    })
}

/// Same as [`aggregate`] but with raw column names, as they appear in the
/// CSV headers.
pub fn aggregate_by_name<R: Record>(rows: &[R], key: &str, measures: &[&str]) -> Result<AggregationResult> {
    let key = resolve_column::<R>(key)?;
    let measures = measures
        .iter()
        .map(|m| resolve_column::<R>(m))
        .collect::<Result<Vec<_>>>()?;
    aggregate(rows, key, &measures)
}
