//! Row types for the two source tables.

use chrono::NaiveDate;
use std::fmt;
use std::ops::Deref;

use super::columns::Column;
use super::hour_group::HourGroup;
use crate::error::TableKind;

/// Calendar and weather covariates plus the three measures, shared by both
/// tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub season: u8,
    pub year: u8,
    pub month: u8,
    pub holiday: u8,
    pub weekday: u8,
    pub working_day: u8,
    pub weather_situation: u8,
    pub temperature: f64,
    pub feeling_temperature: f64,
    pub humidity: f64,
    pub windspeed: f64,
    pub casual: u32,
    pub registered: u32,
    pub count: u32,
}

impl Observation {
    fn numeric(&self, column: Column) -> Option<f64> {
        let value = match column {
            Column::Season => self.season as f64,
            Column::Year => self.year as f64,
            Column::Month => self.month as f64,
            Column::Holiday => self.holiday as f64,
            Column::Weekday => self.weekday as f64,
            Column::WorkingDay => self.working_day as f64,
            Column::WeatherSituation => self.weather_situation as f64,
            Column::Temperature => self.temperature,
            Column::FeelingTemperature => self.feeling_temperature,
            Column::Humidity => self.humidity,
            Column::Windspeed => self.windspeed,
            Column::Casual => self.casual as f64,
            Column::Registered => self.registered as f64,
            Column::Count => self.count as f64,
            Column::Date | Column::Hour | Column::HourGroup => return None,
        };
        Some(value)
    }

    fn category(&self, column: Column) -> Option<GroupValue> {
        let code = match column {
            Column::Date => return Some(GroupValue::Date(self.date)),
            Column::Season => self.season,
            Column::Year => self.year,
            Column::Month => self.month,
            Column::Holiday => self.holiday,
            Column::Weekday => self.weekday,
            Column::WorkingDay => self.working_day,
            Column::WeatherSituation => self.weather_situation,
            _ => return None,
        };
        Some(GroupValue::Code(code as i64))
    }
}

/// One row per calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord(pub Observation);

impl Deref for DailyRecord {
    type Target = Observation;

    fn deref(&self) -> &Observation {
        &self.0
    }
}

/// One row per (date, hour).
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    pub hour: u8,
    pub hour_group: HourGroup,
    pub observation: Observation,
}

impl Deref for HourlyRecord {
    type Target = Observation;

    fn deref(&self) -> &Observation {
        &self.observation
    }
}

/// A distinct value of a categorical column, usable as a group-by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupValue {
    Code(i64),
    Date(NaiveDate),
    HourGroup(HourGroup),
}

impl GroupValue {
    pub fn code(self) -> Option<i64> {
        match self {
            GroupValue::Code(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Code(c) => write!(f, "{c}"),
            GroupValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            GroupValue::HourGroup(g) => write!(f, "{g}"),
        }
    }
}

/// Typed, by-column access to a table row.
pub trait Record {
    const TABLE: TableKind;
    /// Columns this table carries.
    const SCHEMA: &'static [Column];

    fn date(&self) -> NaiveDate;
    fn numeric(&self, column: Column) -> Option<f64>;
    fn category(&self, column: Column) -> Option<GroupValue>;

    fn has_column(column: Column) -> bool {
        Self::SCHEMA.contains(&column)
    }
}

const SHARED_COLUMNS: [Column; 15] = [
    Column::Date,
    Column::Season,
    Column::Year,
    Column::Month,
    Column::Holiday,
    Column::Weekday,
    Column::WorkingDay,
    Column::WeatherSituation,
    Column::Temperature,
    Column::FeelingTemperature,
    Column::Humidity,
    Column::Windspeed,
    Column::Casual,
    Column::Registered,
    Column::Count,
];

const HOURLY_COLUMNS: [Column; 17] = [
    Column::Date,
    Column::Season,
    Column::Year,
    Column::Month,
    Column::Hour,
    Column::HourGroup,
    Column::Holiday,
    Column::Weekday,
    Column::WorkingDay,
    Column::WeatherSituation,
    Column::Temperature,
    Column::FeelingTemperature,
    Column::Humidity,
    Column::Windspeed,
    Column::Casual,
    Column::Registered,
    Column::Count,
];

impl Record for DailyRecord {
    const TABLE: TableKind = TableKind::Day;
    const SCHEMA: &'static [Column] = &SHARED_COLUMNS;

    fn date(&self) -> NaiveDate {
        self.0.date
    }

    fn numeric(&self, column: Column) -> Option<f64> {
        self.0.numeric(column)
    }

    fn category(&self, column: Column) -> Option<GroupValue> {
        self.0.category(column)
    }
}

impl Record for HourlyRecord {
    const TABLE: TableKind = TableKind::Hour;
    const SCHEMA: &'static [Column] = &HOURLY_COLUMNS;

    fn date(&self) -> NaiveDate {
        self.observation.date
    }

    fn numeric(&self, column: Column) -> Option<f64> {
        match column {
            Column::Hour => Some(self.hour as f64),
            _ => self.observation.numeric(column),
        }
    }

    fn category(&self, column: Column) -> Option<GroupValue> {
        match column {
            Column::Hour => Some(GroupValue::Code(self.hour as i64)),
            Column::HourGroup => Some(GroupValue::HourGroup(self.hour_group)),
            _ => self.observation.category(column),
        }
    }
}
