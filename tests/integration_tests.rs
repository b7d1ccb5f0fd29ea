use bikeshare_dashboard::config::DashboardConfig;
use bikeshare_dashboard::dashboard::{AppState, ChartKind, Selection, render_all};
use bikeshare_dashboard::loader::{load_day_table, load_hour_table};
use bikeshare_dashboard::output::{SNAPSHOT_FILE, write_correlations_csv, write_dashboard};
use bikeshare_dashboard::schema::{Column, Measure};
use bikeshare_dashboard::transforms::{Year, aggregate, correlate, hourly_slice, yearly_slice};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

const HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";
const HOUR_HEADER: &str = "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

/// One week in January 2011 and one in July 2012.
fn dates() -> Vec<NaiveDate> {
    let jan = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
    let jul = NaiveDate::from_ymd_opt(2012, 7, 1).unwrap();
    (0..7)
        .map(|i| jan + chrono::Days::new(i))
        .chain((0..7).map(|i| jul + chrono::Days::new(i)))
        .collect()
}

/// `season,yr,mnth` for `date`.
fn calendar(date: NaiveDate) -> String {
    let season = if date.month() == 1 { 1 } else { 3 };
    format!("{},{},{}", season, date.year() - 2011, date.month())
}

/// `holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed`.
fn conditions(date: NaiveDate, salt: u32) -> String {
    let yr = (date.year() - 2011) as f64;
    let weekday = date.weekday().num_days_from_sunday();
    let working = (1..=5).contains(&weekday) as u32;
    format!(
        "{},{},{},{},{:.3},{:.3},{:.3},{:.3}",
        (date.day() == 4) as u32,
        weekday,
        working,
        1 + (date.day() + salt) % 3,
        0.15 + 0.05 * date.day() as f64 + 0.4 * yr,
        0.18 + 0.045 * date.day() as f64 + 0.38 * yr,
        0.5 + 0.03 * ((date.day() * 7 + salt) % 11) as f64,
        0.05 + 0.02 * ((date.day() * 5 + salt * 3) % 9) as f64,
    )
}

struct Fixture {
    dir: PathBuf,
    config: DashboardConfig,
}

impl Fixture {
    fn new(name: &str) -> Self {
        let dir = env::temp_dir().join(format!("bikeshare_it_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let mut day = format!("{HEADER}\n");
        let mut hour = format!("{HOUR_HEADER}\n");
        let mut instant = 0;

        for (i, date) in dates().into_iter().enumerate() {
            let mut day_casual = 0;
            let mut day_registered = 0;
            for hr in 0..24u32 {
                let casual = (hr * 3 + i as u32 * 5) % 17 + if (10..=16).contains(&hr) { 20 } else { 1 };
                let registered = (hr * 11 + i as u32) % 23 + if hr == 8 || hr == 17 { 90 } else { 5 };
                day_casual += casual;
                day_registered += registered;
                instant += 1;
                writeln!(
                    hour,
                    "{instant},{date},{},{hr},{},{casual},{registered},{}",
                    calendar(date),
                    conditions(date, hr),
                    casual + registered
                )
                .unwrap();
            }
            writeln!(
                day,
                "{},{date},{},{},{},{},{}",
                i + 1,
                calendar(date),
                conditions(date, 0),
                day_casual,
                day_registered,
                day_casual + day_registered
            )
            .unwrap();
        }

        fs::write(dir.join("day.csv"), day).unwrap();
        fs::write(dir.join("hour.csv"), hour).unwrap();

        let config = DashboardConfig {
            day_path: dir.join("day.csv"),
            hour_path: dir.join("hour.csv"),
            output_dir: dir.join("out"),
            top_n: 5,
        };
        Self { dir, config }
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

#[test]
fn test_load_both_tables() {
    let fx = Fixture::new("load");
    let day = load_day_table(&fx.config.day_path).unwrap();
    let hour = load_hour_table(&fx.config.hour_path).unwrap();

    assert_eq!(day.len(), 14);
    assert_eq!(hour.len(), 14 * 24);
    assert!(day.rows().iter().all(|r| r.count == r.casual + r.registered));
}

#[test]
fn test_aggregation_matches_daily_totals() {
    let fx = Fixture::new("mass");
    let day = load_day_table(&fx.config.day_path).unwrap();
    let hour = load_hour_table(&fx.config.hour_path).unwrap();

    let day_total: f64 = day.rows().iter().map(|r| r.count as f64).sum();
    for key in [Column::HourGroup, Column::Hour, Column::Month, Column::Weekday] {
        let result = aggregate(hour.rows(), key, &[Column::Count]).unwrap();
        assert_eq!(result.total(Column::Count), Some(day_total));
    }
}

#[test]
fn test_full_pipeline_writes_five_charts() {
    let fx = Fixture::new("pipeline");
    let state = AppState::load(&fx.config).unwrap();
    let selection = state.default_selection();

    let rendered = render_all(&state, &selection, fx.config.top_n);
    assert!(rendered.iter().all(|r| r.figure.is_ok()));

    let written = write_dashboard(&fx.config.output_dir, &selection, &rendered).unwrap();
    assert_eq!(written.len(), 6);
    for kind in ChartKind::ALL {
        let svg = fs::read_to_string(fx.config.output_dir.join(format!("{kind}.svg"))).unwrap();
        assert!(svg.starts_with("<svg"));
    }

    let snapshot: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(fx.config.output_dir.join(SNAPSHOT_FILE)).unwrap())
            .unwrap();
    assert_eq!(snapshot["selection"]["date"], "2011-01-01");
    assert_eq!(snapshot["charts"].as_array().unwrap().len(), 5);
}

#[test]
fn test_date_without_rows_renders_empty_hourly_chart() {
    let fx = Fixture::new("gap");
    let state = AppState::load(&fx.config).unwrap();

    // inside the selector range but absent from the data
    let date = NaiveDate::from_ymd_opt(2011, 9, 15).unwrap();
    assert!(state.contains_date(date));
    assert!(hourly_slice(state.hour(), date).is_empty());

    let selection = Selection {
        date,
        ..state.default_selection()
    };
    let rendered = render_all(&state, &selection, 5);
    let hourly = rendered[0].figure.as_ref().unwrap();
    assert!(hourly.panels[0].is_empty());
}

#[test]
fn test_correlation_slices_cover_all_covariates() {
    let fx = Fixture::new("corr");
    let hour = load_hour_table(&fx.config.hour_path).unwrap();

    for target in Measure::ALL {
        let result = correlate(hour.rows(), target).unwrap();
        assert_eq!(result.len(), 9);

        let most: HashSet<_> = result.most(5).iter().map(|c| c.label).collect();
        let least: HashSet<_> = result.least(5).iter().map(|c| c.label).collect();
        assert_eq!(most.intersection(&least).count(), 1);
        assert_eq!(most.union(&least).count(), 9);
    }
}

#[test]
fn test_yearly_slice_per_year() {
    let fx = Fixture::new("yearly");
    let hour = load_hour_table(&fx.config.hour_path).unwrap();

    let y2011 = yearly_slice(&hour, Some(Year::Y2011)).unwrap();
    assert_eq!(y2011.monthly.len(), 1);
    assert_eq!(y2011.monthly[0].label, "January");
    assert_eq!(y2011.seasonal[0].label, "Spring");

    let both = yearly_slice(&hour, None).unwrap();
    let labels: Vec<_> = both.seasonal.iter().map(|s| s.label).collect();
    assert_eq!(labels, vec!["Spring", "Fall"]);
}

#[test]
fn test_correlation_csv() {
    let fx = Fixture::new("corr_csv");
    let hour = load_hour_table(&fx.config.hour_path).unwrap();
    let result = correlate(hour.rows(), Measure::Casual).unwrap();

    let path = fx.dir.join("corr.csv");
    write_correlations_csv(&path, &result).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 10);
    assert!(lines[0].starts_with("rank,target,covariate"));
    assert!(lines[1].starts_with("1,casual,"));
}
