//! CSV loading for the day and hour tables.
//!
//! Files ending in `.gz` are decompressed on the fly. Every row is checked
//! against the table invariants before the table is handed out, so the
//! transforms can assume clean input.

use chrono::NaiveDate;
use flate2::read::GzDecoder;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result};
use crate::schema::{Column, DailyRecord, HourGroup, HourlyRecord, Observation, Record};
use crate::table::{DayTable, HourTable, Table};

/// A single CSV row before validation. `hr` and `hr_group` are only
/// present in the hourly file; `hr_group` may be absent there too.
#[derive(Debug, Deserialize)]
struct RawRow {
    dteday: NaiveDate,
    season: u8,
    yr: u8,
    mnth: u8,
    #[serde(default)]
    hr: Option<u8>,
    #[serde(default)]
    hr_group: Option<String>,
    holiday: u8,
    weekday: u8,
    workingday: u8,
    weathersit: u8,
    temp: f64,
    atemp: f64,
    hum: f64,
    windspeed: f64,
    casual: u32,
    registered: u32,
    cnt: u32,
}

impl RawRow {
    fn into_observation(self, path: &Path, row: usize) -> Result<Observation> {
        let invalid = |reason: String| DashboardError::InvalidRow {
            path: path.to_path_buf(),
            row,
            reason,
        };

        if self.casual as u64 + self.registered as u64 != self.cnt as u64 {
            return Err(invalid(format!(
                "cnt {} != casual {} + registered {}",
                self.cnt, self.casual, self.registered
            )));
        }
        if self.weekday > 6 {
            return Err(invalid(format!("weekday {} outside 0..=6", self.weekday)));
        }
        if !(1..=12).contains(&self.mnth) {
            return Err(invalid(format!("mnth {} outside 1..=12", self.mnth)));
        }
        if self.yr > 1 {
            return Err(invalid(format!("yr {} outside 0..=1", self.yr)));
        }
        if !(1..=4).contains(&self.season) {
            return Err(invalid(format!("season {} outside 1..=4", self.season)));
        }

        Ok(Observation {
            date: self.dteday,
            season: self.season,
            year: self.yr,
            month: self.mnth,
            holiday: self.holiday,
            weekday: self.weekday,
            working_day: self.workingday,
            weather_situation: self.weathersit,
            temperature: self.temp,
            feeling_temperature: self.atemp,
            humidity: self.hum,
            windspeed: self.windspeed,
            casual: self.casual,
            registered: self.registered,
            count: self.cnt,
        })
    }
}

/// Loads the per-day table from `path`.
pub fn load_day_table(path: impl AsRef<Path>) -> Result<DayTable> {
    let path = path.as_ref();
    let table = read_day_table(open(path)?, path)?;
    log_loaded("day", &table);
    Ok(table)
}

/// Loads the per-hour table from `path`.
pub fn load_hour_table(path: impl AsRef<Path>) -> Result<HourTable> {
    let path = path.as_ref();
    let table = read_hour_table(open(path)?, path)?;
    log_loaded("hour", &table);
    Ok(table)
}

/// Parses a day table from any reader. `source` is only used in errors.
pub fn read_day_table<T: Read>(reader: T, source: &Path) -> Result<DayTable> {
    let mut rows = Vec::new();
    for (row, raw) in raw_rows(reader, source, DailyRecord::SCHEMA)? {
        rows.push(DailyRecord(raw.into_observation(source, row)?));
    }
    non_empty(Table::new(source, rows))
}

/// Parses an hour table from any reader. `source` is only used in errors.
pub fn read_hour_table<T: Read>(reader: T, source: &Path) -> Result<HourTable> {
    let mut required = DailyRecord::SCHEMA.to_vec();
    required.push(Column::Hour);

    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for (row, mut raw) in raw_rows(reader, source, &required)? {
        let invalid = |reason: String| DashboardError::InvalidRow {
            path: source.to_path_buf(),
            row,
            reason,
        };

        let hour = raw.hr.ok_or_else(|| invalid("hr is empty".to_string()))?;
        if hour > 23 {
            return Err(invalid(format!("hr {hour} outside 0..=23")));
        }
        if !seen.insert((raw.dteday, hour)) {
            return Err(invalid(format!("duplicate row for {} hour {hour}", raw.dteday)));
        }

        let derived = HourGroup::from_hour(hour);
        let hour_group = match raw.hr_group.take().filter(|g| !g.trim().is_empty()) {
            Some(label) => label.parse::<HourGroup>().unwrap_or_else(|_| {
                warn!(row, label = %label, derived = %derived, "Unknown hr_group label, deriving from hr");
                derived
            }),
            None => derived,
        };

        rows.push(HourlyRecord {
            hour,
            hour_group,
            observation: raw.into_observation(source, row)?,
        });
    }

    non_empty(Table::new(source, rows))
}

fn open(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        debug!(path = %path.display(), "Reading gzip-compressed table");
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Checks the header row and deserializes every data row, numbering rows
/// from 1 (header excluded).
fn raw_rows<T: Read>(reader: T, source: &Path, required: &[Column]) -> Result<Vec<(usize, RawRow)>> {
    let csv_error = |e: csv::Error| DashboardError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    for column in required {
        if !headers.iter().any(|h| h == column.name()) {
            return Err(DashboardError::MissingColumn {
                path: source.to_path_buf(),
                column: column.name(),
            });
        }
    }

    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize::<RawRow>().enumerate() {
        rows.push((i + 1, result.map_err(csv_error)?));
    }
    Ok(rows)
}

fn non_empty<R>(table: Table<R>) -> Result<Table<R>>
where
    R: Record + Clone,
{
    if table.is_empty() {
        return Err(DashboardError::EmptyTable {
            path: table.source().to_path_buf(),
        });
    }
    Ok(table)
}

fn log_loaded<R>(kind: &str, table: &Table<R>)
where
    R: Record + Clone,
{
    let (first, last) = table
        .date_range()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .unwrap_or_default();
    info!(
        table = kind,
        path = %table.source().display(),
        rows = table.len(),
        first = %first,
        last = %last,
        "Table loaded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::io::Write;

    const DAY_HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";
    const HOUR_HEADER: &str = "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn read_day(body: &str) -> Result<DayTable> {
        read_day_table(body.as_bytes(), Path::new("day.csv"))
    }

    fn read_hour(body: &str) -> Result<HourTable> {
        read_hour_table(body.as_bytes(), Path::new("hour.csv"))
    }

    #[test]
    fn test_read_day_table() {
        let body = format!(
            "{DAY_HEADER}\n\
             1,2011-01-01,1,0,1,0,6,0,2,0.344167,0.363625,0.805833,0.160446,331,654,985\n\
             2,2011-01-02,1,0,1,0,0,0,2,0.363478,0.353739,0.696087,0.248539,131,670,801\n"
        );
        let table = read_day(&body).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.rows()[0];
        assert_eq!(first.date.to_string(), "2011-01-01");
        assert_eq!(first.weekday, 6);
        assert_eq!(first.count, 985);
    }

    #[test]
    fn test_total_must_equal_casual_plus_registered() {
        let body = format!(
            "{DAY_HEADER}\n1,2011-01-01,1,0,1,0,6,0,2,0.34,0.36,0.80,0.16,331,654,1000\n"
        );
        let err = read_day(&body).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRow { row: 1, .. }));
    }

    #[test]
    fn test_missing_column_is_reported_by_name() {
        let body = "dteday,season,yr,mnth\n2011-01-01,1,0,1\n";
        let err = read_day(body).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn { column: "holiday", .. }));
    }

    #[test]
    fn test_bad_date_is_csv_error() {
        let body = format!(
            "{DAY_HEADER}\n1,not-a-date,1,0,1,0,6,0,2,0.34,0.36,0.80,0.16,331,654,985\n"
        );
        assert!(matches!(read_day(&body).unwrap_err(), DashboardError::Csv { .. }));
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let err = read_day(&format!("{DAY_HEADER}\n")).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyTable { .. }));
        assert!(err.is_load_error());
    }

    #[test]
    fn test_hour_group_derived_when_column_absent() {
        let body = format!(
            "{HOUR_HEADER}\n\
             1,2011-01-01,1,0,1,0,0,6,0,1,0.24,0.2879,0.81,0,3,13,16\n\
             2,2011-01-01,1,0,1,13,0,6,0,1,0.24,0.2879,0.81,0,8,32,40\n"
        );
        let table = read_hour(&body).unwrap();
        assert_eq!(table.rows()[0].hour_group, HourGroup::Night);
        assert_eq!(table.rows()[1].hour_group, HourGroup::Afternoon);
    }

    #[test]
    fn test_hour_group_column_is_honoured() {
        let body = "dteday,season,yr,mnth,hr,hr_group,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt\n\
                    2011-01-01,1,0,1,5,Morning,0,6,0,1,0.24,0.2879,0.81,0,3,13,16\n";
        let table = read_hour(body).unwrap();
        assert_eq!(table.rows()[0].hour_group, HourGroup::Morning);
    }

    #[test]
    fn test_unknown_hour_group_label_falls_back_to_hour() {
        let body = "dteday,season,yr,mnth,hr,hr_group,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt\n\
                    2011-01-01,1,0,1,19,rush,0,6,0,1,0.24,0.2879,0.81,0,3,13,16\n";
        let table = read_hour(body).unwrap();
        assert_eq!(table.rows()[0].hour_group, HourGroup::Evening);
    }

    #[test]
    fn test_year_code_out_of_range_rejected() {
        let body = format!(
            "{DAY_HEADER}\n1,2013-01-01,1,2,1,0,6,0,2,0.34,0.36,0.80,0.16,331,654,985\n"
        );
        let err = read_day(&body).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRow { row: 1, .. }));
        assert!(err.to_string().contains("yr 2"));
    }

    #[test]
    fn test_duplicate_hour_rejected() {
        let body = format!(
            "{HOUR_HEADER}\n\
             1,2011-01-01,1,0,1,4,0,6,0,1,0.24,0.2879,0.81,0,3,13,16\n\
             2,2011-01-01,1,0,1,4,0,6,0,1,0.24,0.2879,0.81,0,3,13,16\n"
        );
        let err = read_hour(&body).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRow { row: 2, .. }));
    }

    #[test]
    fn test_hour_out_of_range_rejected() {
        let body = format!("{HOUR_HEADER}\n1,2011-01-01,1,0,1,24,0,6,0,1,0.24,0.28,0.81,0,3,13,16\n");
        assert!(matches!(read_hour(&body).unwrap_err(), DashboardError::InvalidRow { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_day_table(temp_path("bikeshare_does_not_exist.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::Io { .. }));
    }

    #[test]
    fn test_load_gzip_table() {
        use flate2::Compression;
        use flate2::write::GzEncoder;

        let path = temp_path("bikeshare_loader_test_day.csv.gz");
        let _ = fs::remove_file(&path);

        let body = format!(
            "{DAY_HEADER}\n1,2011-01-01,1,0,1,0,6,0,2,0.34,0.36,0.80,0.16,331,654,985\n"
        );
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(body.as_bytes()).unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let table = load_day_table(&path).unwrap();
        assert_eq!(table.len(), 1);

        fs::remove_file(&path).unwrap();
    }
}
