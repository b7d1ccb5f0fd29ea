//! Renderer-independent description of a chart.

use serde::Serialize;

/// A chart made of one or more side-by-side panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    /// Stable identifier, also used as the output file stem.
    pub name: &'static str,
    pub title: String,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: PanelKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PanelKind {
    /// Series plotted over shared categories. NaN values leave a gap.
    Line {
        categories: Vec<String>,
        series: Vec<Series>,
    },
    /// Vertical bars, optionally traced by a line through the bar tops.
    Bar {
        categories: Vec<String>,
        values: Vec<f64>,
        color: &'static str,
        line_color: Option<&'static str>,
    },
    /// Horizontal bars drawn top to bottom in order. `mirrored` puts the
    /// labels on the right and grows bars leftwards.
    HBar { bars: Vec<Bar>, mirrored: bool },
    Pie { slices: Vec<Slice> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
    /// Pulled out from the centre.
    pub explode: bool,
}

impl Panel {
    pub fn new(title: impl Into<String>, kind: PanelKind) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            kind,
        }
    }

    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            PanelKind::Line { categories, .. } => categories.is_empty(),
            PanelKind::Bar { values, .. } => values.is_empty(),
            PanelKind::HBar { bars, .. } => bars.is_empty(),
            PanelKind::Pie { slices } => slices.is_empty(),
        }
    }
}
