//! Minimal SVG backend for [`Figure`].
//!
//! Panels are laid out left to right under a shared title. Styling is
//! deliberately plain; only the data mapping matters.

use std::f64::consts::PI;
use std::fmt::Write;

use super::figure::{Bar, Figure, Panel, PanelKind, Series, Slice};

const PANEL_WIDTH: f64 = 520.0;
const PANEL_HEIGHT: f64 = 360.0;
const TITLE_HEIGHT: f64 = 40.0;
const MARGIN: f64 = 50.0;
const GRAY: &str = "#dadada";
const TEXT: &str = "#222222";

/// Immediate-mode SVG canvas. Coordinates are in pixels, origin top-left.
struct Canvas {
    width: f64,
    height: f64,
    body: String,
}

#[derive(Clone, Copy)]
enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

impl Canvas {
    fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{:.2}" height="{:.2}" fill="{fill}" />"#,
            w.max(0.0),
            h.max(0.0)
        );
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{stroke}" stroke-width="1" />"#
        );
    }

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &str) {
        if points.is_empty() {
            return;
        }
        let mut pts = String::new();
        for (x, y) in points {
            let _ = write!(pts, "{x:.2},{y:.2} ");
        }
        let _ = writeln!(
            self.body,
            r#"<polyline points="{}" fill="none" stroke="{stroke}" stroke-width="2" />"#,
            pts.trim_end()
        );
        // single isolated points would otherwise be invisible
        if let [(x, y)] = points {
            let _ = writeln!(self.body, r#"<circle cx="{x:.2}" cy="{y:.2}" r="2.5" fill="{stroke}" />"#);
        }
    }

    fn polygon(&mut self, points: &[(f64, f64)], fill: &str) {
        let mut pts = String::new();
        for (x, y) in points {
            let _ = write!(pts, "{x:.2},{y:.2} ");
        }
        let _ = writeln!(
            self.body,
            r#"<polygon points="{}" fill="{fill}" stroke="white" stroke-width="1" />"#,
            pts.trim_end()
        );
    }

    fn text(&mut self, x: f64, y: f64, content: &str, size: f64, anchor: Anchor) {
        let _ = writeln!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" font-family="sans-serif" font-size="{size}" fill="{TEXT}" text-anchor="{}">{}</text>"#,
            anchor.as_str(),
            escape(content)
        );
    }

    fn text_rotated(&mut self, x: f64, y: f64, content: &str, size: f64, angle: f64) {
        let _ = writeln!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" font-family="sans-serif" font-size="{size}" fill="{TEXT}" text-anchor="middle" transform="rotate({angle} {x:.2} {y:.2})">{}</text>"#,
            escape(content)
        );
    }

    fn finish(self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );
        let _ = writeln!(
            out,
            r#"<rect width="{}" height="{}" fill="white" />"#,
            self.width, self.height
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

/// Drawing area of one panel, inside its margins.
#[derive(Clone, Copy)]
struct Area {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Area {
    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Renders a figure as a standalone SVG document.
pub fn to_svg(figure: &Figure) -> String {
    let panels = figure.panels.len().max(1) as f64;
    let mut canvas = Canvas::new(PANEL_WIDTH * panels, PANEL_HEIGHT + TITLE_HEIGHT);
    canvas.text(canvas.width / 2.0, 26.0, &figure.title, 18.0, Anchor::Middle);

    for (i, panel) in figure.panels.iter().enumerate() {
        let area = Area {
            left: PANEL_WIDTH * i as f64 + MARGIN * 1.6,
            top: TITLE_HEIGHT + MARGIN,
            width: PANEL_WIDTH - MARGIN * 2.4,
            height: PANEL_HEIGHT - MARGIN * 2.0,
        };
        draw_panel(&mut canvas, panel, area);
    }

    canvas.finish()
}

fn draw_panel(canvas: &mut Canvas, panel: &Panel, area: Area) {
    canvas.text(area.left + area.width / 2.0, area.top - 18.0, &panel.title, 14.0, Anchor::Middle);
    if !panel.x_label.is_empty() {
        canvas.text(area.left + area.width / 2.0, area.bottom() + 40.0, &panel.x_label, 12.0, Anchor::Middle);
    }
    if !panel.y_label.is_empty() {
        canvas.text_rotated(area.left - 40.0, area.top + area.height / 2.0, &panel.y_label, 12.0, -90.0);
    }

    if panel.is_empty() {
        let (cx, cy) = area.center();
        canvas.text(cx, cy, "No data", 14.0, Anchor::Middle);
        return;
    }

    match &panel.kind {
        PanelKind::Line { categories, series } => draw_lines(canvas, area, categories, series),
        PanelKind::Bar {
            categories,
            values,
            color,
            line_color,
        } => draw_bars(canvas, area, categories, values, color, *line_color),
        PanelKind::HBar { bars, mirrored } => draw_hbars(canvas, area, bars, *mirrored),
        PanelKind::Pie { slices } => draw_pie(canvas, area, slices),
    }
}

/// Min/max over the finite values, widened when degenerate.
fn finite_range<'a>(values: impl Iterator<Item = &'a f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    if lo > hi {
        return None;
    }
    if lo == hi {
        return Some((lo - 1.0, hi + 1.0));
    }
    Some((lo, hi))
}

fn category_x(area: Area, count: usize, i: usize) -> f64 {
    area.left + area.width * (i as f64 + 0.5) / count as f64
}

fn draw_category_ticks(canvas: &mut Canvas, area: Area, categories: &[String]) {
    canvas.line(area.left, area.bottom(), area.right(), area.bottom(), TEXT);
    for (i, label) in categories.iter().enumerate() {
        let x = category_x(area, categories.len(), i);
        canvas.text_rotated(x, area.bottom() + 16.0, label, 10.0, if categories.len() > 8 { -45.0 } else { 0.0 });
    }
}

fn draw_lines(canvas: &mut Canvas, area: Area, categories: &[String], series: &[Series]) {
    draw_category_ticks(canvas, area, categories);

    let Some((lo, hi)) = finite_range(series.iter().flat_map(|s| s.values.iter())) else {
        let (cx, cy) = area.center();
        canvas.text(cx, cy, "Undefined (no variation)", 12.0, Anchor::Middle);
        return;
    };
    let y_of = |v: f64| area.bottom() - (v - lo) / (hi - lo) * area.height;

    for s in series {
        // split at NaN so undefined points show as gaps
        let mut segment = Vec::new();
        for (i, v) in s.values.iter().enumerate().take(categories.len()) {
            if v.is_finite() {
                segment.push((category_x(area, categories.len(), i), y_of(*v)));
            } else {
                canvas.polyline(&segment, s.color);
                segment.clear();
            }
        }
        canvas.polyline(&segment, s.color);
    }

    for (i, s) in series.iter().enumerate() {
        let y = area.top + 14.0 * i as f64;
        canvas.rect(area.right() - 110.0, y - 8.0, 10.0, 10.0, s.color);
        canvas.text(area.right() - 95.0, y + 1.0, &s.name, 10.0, Anchor::Start);
    }
}

fn draw_bars(
    canvas: &mut Canvas,
    area: Area,
    categories: &[String],
    values: &[f64],
    color: &str,
    line_color: Option<&str>,
) {
    draw_category_ticks(canvas, area, categories);

    let max = finite_range(values.iter()).map(|(_, hi)| hi.max(0.0)).unwrap_or(0.0);
    if max <= 0.0 {
        return;
    }
    let slot = area.width / categories.len().max(1) as f64;
    let y_of = |v: f64| area.bottom() - v / max * area.height;

    let mut tops = Vec::new();
    for (i, v) in values.iter().enumerate().take(categories.len()) {
        if !v.is_finite() {
            continue;
        }
        let x = category_x(area, categories.len(), i);
        canvas.rect(x - slot * 0.25, y_of(*v), slot * 0.5, area.bottom() - y_of(*v), color);
        tops.push((x, y_of(*v)));
    }
    if let Some(line) = line_color {
        canvas.polyline(&tops, line);
    }
    canvas.text(area.right() + 4.0, area.top + 4.0, &format_value(max), 10.0, Anchor::Start);
}

fn draw_hbars(canvas: &mut Canvas, area: Area, bars: &[Bar], mirrored: bool) {
    let max = finite_range(bars.iter().map(|b| &b.value))
        .map(|(_, hi)| hi.max(0.0))
        .unwrap_or(0.0);
    let row = area.height / bars.len() as f64;

    for (i, bar) in bars.iter().enumerate() {
        let y = area.top + row * i as f64;
        let label_anchor = if mirrored { Anchor::Start } else { Anchor::End };
        let label_x = if mirrored { area.right() + 6.0 } else { area.left - 6.0 };
        canvas.text(label_x, y + row * 0.6, &bar.label, 10.0, label_anchor);

        if !bar.value.is_finite() || max <= 0.0 {
            continue;
        }
        let w = bar.value / max * area.width;
        let x = if mirrored { area.right() - w } else { area.left };
        canvas.rect(x, y + row * 0.15, w, row * 0.7, bar.color);

        let (value_x, anchor) = if mirrored {
            (x - 4.0, Anchor::End)
        } else {
            (x + w + 4.0, Anchor::Start)
        };
        if (mirrored && value_x > area.left) || (!mirrored && value_x < area.right()) {
            canvas.text(value_x, y + row * 0.6, &format_value(bar.value), 9.0, anchor);
        }
    }

    let axis_x = if mirrored { area.right() } else { area.left };
    canvas.line(axis_x, area.top, axis_x, area.bottom(), GRAY);
}

fn draw_pie(canvas: &mut Canvas, area: Area, slices: &[Slice]) {
    let total: f64 = slices.iter().filter(|s| s.value.is_finite() && s.value > 0.0).map(|s| s.value).sum();
    let (cx, cy) = area.center();
    if total <= 0.0 {
        canvas.text(cx, cy, "No data", 14.0, Anchor::Middle);
        return;
    }
    let r = area.width.min(area.height) / 2.0 - 10.0;
    let mut start = -PI / 2.0;

    for (i, slice) in slices.iter().enumerate() {
        if !slice.value.is_finite() || slice.value <= 0.0 {
            continue;
        }
        let fraction = slice.value / total;
        let sweep = 2.0 * PI * fraction;
        let mid = start + sweep / 2.0;
        let offset = if slice.explode { r * 0.1 } else { 0.0 };
        let (ox, oy) = (cx + offset * mid.cos(), cy + offset * mid.sin());

        let steps = ((sweep / 0.02) as usize).max(10);
        let mut pts = vec![(ox, oy)];
        for s in 0..=steps {
            let a = start + sweep * s as f64 / steps as f64;
            pts.push((ox + r * a.cos(), oy + r * a.sin()));
        }
        canvas.polygon(&pts, slice.color);

        let label_r = r * 0.6;
        canvas.text(
            ox + label_r * mid.cos(),
            oy + label_r * mid.sin(),
            &format!("{:.1}%", fraction * 100.0),
            10.0,
            Anchor::Middle,
        );

        let legend_y = area.bottom() + 14.0 + 12.0 * (i / 2) as f64;
        let legend_x = area.left + area.width / 2.0 * (i % 2) as f64;
        canvas.rect(legend_x, legend_y - 8.0, 8.0, 8.0, slice.color);
        canvas.text(legend_x + 12.0, legend_y, &slice.label, 10.0, Anchor::Start);

        start += sweep;
    }
}

fn format_value(v: f64) -> String {
    if v.abs() >= 1000.0 {
        format!("{v:.0}")
    } else if v.abs() >= 1.0 {
        format!("{v:.1}")
    } else {
        format!("{v:.3}")
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
