use super::figure::{Figure, Panel, PanelKind, Slice};
use crate::error::Result;
use crate::table::HourTable;
use crate::transforms::{Year, yearly_slice};

const SEASON_COLORS: [&str; 4] = ["#6cf542", "#f54e42", "#f5a742", "#42e9f5"];

/// Traffic per season and per month, for one dataset year or both.
pub fn build(hours: &HourTable, year: Option<Year>) -> Result<Figure> {
    let view = yearly_slice(hours, year)?;

    let seasons = Panel::new(
        "User Traffic per Season",
        PanelKind::Pie {
            slices: view
                .seasonal
                .iter()
                .enumerate()
                .map(|(i, s)| Slice {
                    label: s.label.to_string(),
                    value: s.total,
                    color: SEASON_COLORS[i % SEASON_COLORS.len()],
                    explode: s.label == "Fall",
                })
                .collect(),
        },
    );

    let months = Panel::new(
        "Monthly User Traffic",
        PanelKind::Bar {
            categories: view.monthly.iter().map(|m| m.label.to_string()).collect(),
            values: view.monthly.iter().map(|m| m.total).collect(),
            color: "#fadada",
            line_color: Some("#fa4a4a"),
        },
    )
    .with_axes("", "User count");

    let title = match year {
        Some(y) => format!("Yearly User Traffic Analysis ({y})"),
        None => "Yearly User Traffic Analysis".to_string(),
    };

    Ok(Figure {
        name: "yearly",
        title,
        panels: vec![seasons, months],
    })
}
