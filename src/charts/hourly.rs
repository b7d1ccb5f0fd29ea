use chrono::NaiveDate;

use super::figure::{Figure, Panel, PanelKind, Series};
use crate::table::HourTable;
use crate::transforms::hourly_slice;

pub const CASUAL_COLOR: &str = "#66ff66";
pub const REGISTERED_COLOR: &str = "#ff6666";

/// Normalized casual vs registered usage across the hours of `date`.
///
/// A date without rows yields an empty panel, not an error.
pub fn build(hours: &HourTable, date: NaiveDate) -> Figure {
    let points = hourly_slice(hours, date);

    let panel = Panel::new(
        format!("User stats on {}", date.format("%Y-%m-%d")),
        PanelKind::Line {
            categories: points.iter().map(|p| p.hour.to_string()).collect(),
            series: vec![
                Series {
                    name: "Casual user".to_string(),
                    values: points.iter().map(|p| p.casual).collect(),
                    color: CASUAL_COLOR,
                },
                Series {
                    name: "Registered user".to_string(),
                    values: points.iter().map(|p| p.registered).collect(),
                    color: REGISTERED_COLOR,
                },
            ],
        },
    )
    .with_axes("Hour", "Stats");

    Figure {
        name: "hourly",
        title: format!("Daily usage: {}", date.format("%Y-%m-%d")),
        panels: vec![panel],
    }
}
