use super::figure::{Bar, Figure, Panel, PanelKind, Series};
use crate::error::Result;
use crate::table::DayTable;
use crate::transforms::weekly_view;

const BAR_COLOR: &str = "#A3DBA3";
const BUSIEST_COLOR: &str = "#006600";

/// Weekday preferences of casual vs registered users, and total traffic per
/// weekday with the busiest day highlighted.
pub fn build(days: &DayTable) -> Result<Figure> {
    let view = weekly_view(days)?;

    let comparison = Panel::new(
        "User preference comparison per day",
        PanelKind::Line {
            categories: view.days.iter().map(|d| d.label.to_string()).collect(),
            series: vec![
                Series {
                    name: "Casual user".to_string(),
                    values: view.days.iter().map(|d| d.casual_z).collect(),
                    color: "#4afa4a",
                },
                Series {
                    name: "Registered user".to_string(),
                    values: view.days.iter().map(|d| d.registered_z).collect(),
                    color: "#4a4afa",
                },
            ],
        },
    )
    .with_axes("", "User stats");

    // busiest at the top
    let traffic = Panel::new(
        "User traffic by weekday",
        PanelKind::HBar {
            bars: view
                .ranking
                .iter()
                .rev()
                .map(|(label, total)| Bar {
                    label: label.to_string(),
                    value: *total,
                    color: if Some(*label) == view.busiest {
                        BUSIEST_COLOR
                    } else {
                        BAR_COLOR
                    },
                })
                .collect(),
            mirrored: false,
        },
    )
    .with_axes("User count", "");

    Ok(Figure {
        name: "weekly",
        title: "Weekly statistics".to_string(),
        panels: vec![comparison, traffic],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fixtures::day;
    use crate::table::Table;

    #[test]
    fn test_busiest_day_on_top_and_highlighted() {
        let table = Table::new(
            "day.csv",
            vec![
                day("2011-01-03", 0, 10, 5),
                day("2011-01-04", 1, 100, 500),
                day("2011-01-05", 2, 30, 30),
            ],
        );
        let figure = build(&table).unwrap();

        match &figure.panels[1].kind {
            PanelKind::HBar { bars, .. } => {
                assert_eq!(bars[0].label, "Tuesday");
                assert_eq!(bars[0].color, BUSIEST_COLOR);
                assert!(bars[1..].iter().all(|b| b.color == BAR_COLOR));
            }
            other => panic!("unexpected panel {other:?}"),
        }
    }
}
