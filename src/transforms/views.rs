//! Chart-ready views built from the aggregation and normalization
//! primitives. Each view is recomputed from the immutable tables on every
//! render.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::Result;
use crate::schema::{Column, DailyRecord, GroupValue, HourGroup, HourlyRecord};
use crate::table::{DayTable, HourTable};
use crate::transforms::aggregate::{AggregationResult, aggregate};
use crate::transforms::normalize::zscore;

/// Weekday labels assigned positionally from code 0.
pub static WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub static MONTH_LABELS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Season labels for raw codes 1..=4, taken positionally. The source data
/// dictionary has not been checked against this order.
pub static SEASON_LABELS: [&str; 4] = ["Spring", "Summer", "Fall", "Winter"];

/// The two years covered by the dataset, stored as `yr` 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Year {
    Y2011,
    Y2012,
}

impl Year {
    pub fn code(self) -> u8 {
        match self {
            Year::Y2011 => 0,
            Year::Y2012 => 1,
        }
    }

    pub fn calendar_year(self) -> i32 {
        2011 + self.code() as i32
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.calendar_year())
    }
}

impl FromStr for Year {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "0" | "2011" => Ok(Year::Y2011),
            "1" | "2012" => Ok(Year::Y2012),
            other => Err(format!("'{other}' is not a dataset year (2011 or 2012)")),
        }
    }
}

/// Normalized casual and registered counts for one hour of the selected day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub hour: u8,
    pub casual: f64,
    pub registered: f64,
}

/// Rows for `date` ordered by hour, with casual and registered counts
/// z-scored independently. Empty when the date has no rows.
pub fn hourly_slice(hours: &HourTable, date: NaiveDate) -> Vec<HourlyPoint> {
    let mut rows = hours.on_date(date);
    rows.sort_by_key(|r| r.hour);
    debug!(%date, rows = rows.len(), "Hourly slice");

    let casual = zscore(&rows.iter().map(|r| r.casual as f64).collect::<Vec<_>>());
    let registered = zscore(&rows.iter().map(|r| r.registered as f64).collect::<Vec<_>>());

    rows.iter()
        .zip(casual)
        .zip(registered)
        .map(|((row, casual), registered)| HourlyPoint {
            hour: row.hour,
            casual,
            registered,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourGroupShare {
    pub group: HourGroup,
    pub casual: f64,
    pub registered: f64,
    /// Percent of all casual rentals falling in this group.
    pub casual_share: f64,
    pub registered_share: f64,
}

/// Casual and registered totals per hour-group, with percentage shares.
pub fn hour_group_shares(rows: &[HourlyRecord]) -> Result<Vec<HourGroupShare>> {
    let by_group = aggregate(rows, Column::HourGroup, &[Column::Casual, Column::Registered])?;
    let casual_total = by_group.total(Column::Casual).unwrap_or(0.0);
    let registered_total = by_group.total(Column::Registered).unwrap_or(0.0);

    Ok(by_group
        .keys()
        .filter_map(|key| match key {
            GroupValue::HourGroup(group) => Some((key, group)),
            _ => None,
        })
        .map(|(key, group)| {
            let casual = by_group.get(key, Column::Casual).unwrap_or(0.0);
            let registered = by_group.get(key, Column::Registered).unwrap_or(0.0);
            HourGroupShare {
                group,
                casual,
                registered,
                casual_share: percent(casual, casual_total),
                registered_share: percent(registered, registered_total),
            }
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayStats {
    pub code: u8,
    pub label: &'static str,
    pub casual: f64,
    pub registered: f64,
    pub total: f64,
    pub casual_z: f64,
    pub registered_z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyView {
    /// One entry per weekday present, in code order.
    pub days: Vec<WeekdayStats>,
    /// `(label, total)` sorted by ascending total.
    pub ranking: Vec<(&'static str, f64)>,
    pub busiest: Option<&'static str>,
}

/// Per-weekday totals over the day table, normalized across weekdays.
pub fn weekly_view(days: &DayTable) -> Result<WeeklyView> {
    weekly_view_of(days.rows())
}

pub fn weekly_view_of(rows: &[DailyRecord]) -> Result<WeeklyView> {
    let by_weekday = aggregate(
        rows,
        Column::Weekday,
        &[Column::Casual, Column::Registered, Column::Count],
    )?;

    let casual = by_weekday.values(Column::Casual).unwrap_or_default();
    let registered = by_weekday.values(Column::Registered).unwrap_or_default();
    let total = by_weekday.values(Column::Count).unwrap_or_default();
    let casual_z = zscore(&casual);
    let registered_z = zscore(&registered);

    let days: Vec<WeekdayStats> = by_weekday
        .keys()
        .enumerate()
        .filter_map(|(i, key)| {
            let code = key.code()?;
            Some(WeekdayStats {
                code: code as u8,
                label: label_for(&WEEKDAY_LABELS, code),
                casual: casual[i],
                registered: registered[i],
                total: total[i],
                casual_z: casual_z[i],
                registered_z: registered_z[i],
            })
        })
        .collect();

    let mut ranking: Vec<_> = days.iter().map(|d| (d.label, d.total)).collect();
    ranking.sort_by(|a, b| a.1.total_cmp(&b.1));
    let busiest = ranking.last().map(|(label, _)| *label);

    Ok(WeeklyView {
        days,
        ranking,
        busiest,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledTotal {
    pub label: &'static str,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyView {
    pub year: Option<Year>,
    /// Month totals in calendar order.
    pub monthly: Vec<LabeledTotal>,
    /// Season totals in code order (Spring, Summer, Fall, Winter).
    pub seasonal: Vec<LabeledTotal>,
}

/// Total rentals per month and per season, for one year or both.
pub fn yearly_slice(hours: &HourTable, year: Option<Year>) -> Result<YearlyView> {
    let rows = match year {
        Some(y) => hours.filter(|r| r.year == y.code()),
        None => hours.rows().to_vec(),
    };
    debug!(year = ?year, rows = rows.len(), "Yearly slice");

    let by_month = aggregate(&rows, Column::Month, &[Column::Count])?;
    let by_season = aggregate(&rows, Column::Season, &[Column::Count])?;

    Ok(YearlyView {
        year,
        monthly: labeled_totals(&by_month, &MONTH_LABELS),
        seasonal: labeled_totals(&by_season, &SEASON_LABELS),
    })
}

/// Relabels 1-based codes with `labels`.
fn labeled_totals(result: &AggregationResult, labels: &[&'static str]) -> Vec<LabeledTotal> {
    result
        .series(Column::Count)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, total)| {
            let code = key.code()?;
            Some(LabeledTotal {
                label: label_for(labels, code - 1),
                total,
            })
        })
        .collect()
}

fn label_for(labels: &[&'static str], index: i64) -> &'static str {
    usize::try_from(index)
        .ok()
        .and_then(|i| labels.get(i).copied())
        .unwrap_or("Unknown")
}

fn percent(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        f64::NAN
    } else {
        part / total * 100.0
    }
}
