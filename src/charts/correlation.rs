use super::figure::{Bar, Figure, Panel, PanelKind};
use crate::error::Result;
use crate::schema::{Measure, Record};
use crate::transforms::{Correlation, correlate};

const MOST_COLORS: [&str; 5] = ["#FDBB44", "#FDBB44", "#FDAA88", "#FDAA88", "#D3D3D3"];
const LEAST_COLORS: [&str; 5] = ["#FB4444", "#FB4444", "#D3D3D3", "#D3D3D3", "#D3D3D3"];

fn bars(entries: &[Correlation], palette: &[&'static str]) -> Vec<Bar> {
    entries
        .iter()
        .enumerate()
        .map(|(i, c)| Bar {
            label: c.label.to_string(),
            value: c.value,
            color: palette.get(i).copied().unwrap_or("#D3D3D3"),
        })
        .collect()
}

/// The `top_n` most and least correlated covariates for `target`.
pub fn build<R: Record>(rows: &[R], target: Measure, top_n: usize) -> Result<Figure> {
    let result = correlate(rows, target)?;

    let most = Panel::new(
        "Most Correlation",
        PanelKind::HBar {
            bars: bars(&result.most(top_n), &MOST_COLORS),
            mirrored: false,
        },
    );
    let least = Panel::new(
        "Least Correlation",
        PanelKind::HBar {
            bars: bars(&result.least(top_n), &LEAST_COLORS),
            mirrored: true,
        },
    );

    Ok(Figure {
        name: "correlation",
        title: format!("Most and Least Correlation with '{target}' Column"),
        panels: vec![most, least],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fixtures::hour;

    #[test]
    fn test_panels_hold_top_n_each() {
        let rows: Vec<_> = (0..10u8)
            .map(|h| {
                let mut row = hour("2011-01-01", h, h as u32 * 2, 10 + h as u32);
                row.observation.temperature = 0.1 * h as f64;
                row.observation.humidity = 0.5 + 0.03 * (h % 3) as f64;
                row
            })
            .collect();
        let figure = build(&rows, Measure::Total, 5).unwrap();

        assert_eq!(figure.title, "Most and Least Correlation with 'cnt' Column");
        for panel in &figure.panels {
            match &panel.kind {
                PanelKind::HBar { bars, .. } => assert_eq!(bars.len(), 5),
                other => panic!("unexpected panel {other:?}"),
            }
        }
    }
}
