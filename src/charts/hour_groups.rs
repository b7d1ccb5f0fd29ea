use super::figure::{Figure, Panel, PanelKind, Slice};
use crate::error::Result;
use crate::schema::HourGroup;
use crate::table::HourTable;
use crate::transforms::{HourGroupShare, hour_group_shares};

fn color(group: HourGroup) -> &'static str {
    match group {
        HourGroup::Night => "#8888ff",
        HourGroup::Morning => "#ddff00",
        HourGroup::Afternoon => "#fedadf",
        HourGroup::Evening => "#ffaa55",
    }
}

/// Share of casual and registered rentals per hour-group, as two pies.
pub fn build(hours: &HourTable) -> Result<Figure> {
    let shares = hour_group_shares(hours.rows())?;

    let pie = |title: &str, value: fn(&HourGroupShare) -> f64, highlight: HourGroup| {
        Panel::new(
            title,
            PanelKind::Pie {
                slices: shares
                    .iter()
                    .map(|s| Slice {
                        label: s.group.to_string(),
                        value: value(s),
                        color: color(s.group),
                        explode: s.group == highlight,
                    })
                    .collect(),
            },
        )
    };

    Ok(Figure {
        name: "hour_groups",
        title: "Usage by time of day".to_string(),
        panels: vec![
            pie("Casual users", |s| s.casual_share, HourGroup::Afternoon),
            pie("Registered users", |s| s.registered_share, HourGroup::Evening),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fixtures::hour;
    use crate::table::Table;

    #[test]
    fn test_two_pies_with_group_slices() {
        let table = Table::new(
            "hour.csv",
            vec![hour("2011-01-01", 2, 1, 10), hour("2011-01-01", 19, 5, 40)],
        );
        let figure = build(&table).unwrap();

        assert_eq!(figure.panels.len(), 2);
        match &figure.panels[1].kind {
            PanelKind::Pie { slices } => {
                assert_eq!(slices.len(), 2);
                assert_eq!(slices[0].label, "Night");
                // percent of all registered rentals: 40 of 50
                assert!((slices[1].value - 80.0).abs() < 1e-9);
                assert!(slices[1].explode);
            }
            other => panic!("unexpected panel {other:?}"),
        }
    }

    #[test]
    fn test_slices_sum_to_hundred_percent() {
        let table = Table::new(
            "hour.csv",
            vec![
                hour("2011-01-01", 2, 1, 10),
                hour("2011-01-01", 9, 4, 30),
                hour("2011-01-01", 19, 5, 40),
            ],
        );
        let figure = build(&table).unwrap();
        for panel in &figure.panels {
            let PanelKind::Pie { slices } = &panel.kind else {
                panic!("expected pie");
            };
            let sum: f64 = slices.iter().map(|s| s.value).sum();
            assert!((sum - 100.0).abs() < 1e-9);
        }
    }
}
