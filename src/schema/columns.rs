use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Every column the loader understands, keyed by its raw dataset name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Column {
    Date,
    Season,
    Year,
    Month,
    Hour,
    HourGroup,
    Holiday,
    Weekday,
    WorkingDay,
    WeatherSituation,
    Temperature,
    FeelingTemperature,
    Humidity,
    Windspeed,
    Casual,
    Registered,
    Count,
}

impl Column {
    pub const ALL: [Column; 17] = [
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

    pub fn name(self) -> &'static str {
        match self {
            Column::Date => "dteday",
            Column::Season => "season",
            Column::Year => "yr",
            Column::Month => "mnth",
            Column::Hour => "hr",
            Column::HourGroup => "hr_group",
            Column::Holiday => "holiday",
            Column::Weekday => "weekday",
            Column::WorkingDay => "workingday",
            Column::WeatherSituation => "weathersit",
            Column::Temperature => "temp",
            Column::FeelingTemperature => "atemp",
            Column::Humidity => "hum",
            Column::Windspeed => "windspeed",
            Column::Casual => "casual",
            Column::Registered => "registered",
            Column::Count => "cnt",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Columns with a discrete set of values that rows can be grouped by.
    pub fn is_categorical(self) -> bool {
        !matches!(
            self,
            Column::Temperature
                | Column::FeelingTemperature
                | Column::Humidity
                | Column::Windspeed
                | Column::Casual
                | Column::Registered
                | Column::Count
        )
    }

    /// Columns that can be read as a number (summed or correlated).
    pub fn is_numeric(self) -> bool {
        !matches!(self, Column::Date | Column::HourGroup)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three rental-count columns a chart can be driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Measure {
    Total,
    Casual,
    Registered,
}

impl Measure {
    pub const ALL: [Measure; 3] = [Measure::Total, Measure::Casual, Measure::Registered];

    pub fn column(self) -> Column {
        match self {
            Measure::Total => Column::Count,
            Measure::Casual => Column::Casual,
            Measure::Registered => Column::Registered,
        }
    }

    /// Label shown in the target selector.
    pub fn label(self) -> &'static str {
        match self {
            Measure::Total => "All Users",
            Measure::Casual => "Casual Users",
            Measure::Registered => "Registered Users",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().name())
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "cnt" | "total" | "all" | "all users" => Ok(Measure::Total),
            "casual" | "casual users" => Ok(Measure::Casual),
            "registered" | "registered users" => Ok(Measure::Registered),
            _ => Err(format!(
                "'{}' is not a measure (expected cnt, casual or registered)",
                s.trim()
            )),
        }
    }
}
