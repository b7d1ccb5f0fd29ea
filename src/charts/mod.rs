//! The five dashboard charts.
//!
//! Each builder turns the current selection into a [`Figure`]; [`to_svg`]
//! draws any figure. Builders never share state, so one failing chart
//! leaves the others untouched.

pub mod correlation;
pub mod figure;
pub mod hour_groups;
pub mod hourly;
pub mod svg;
pub mod weekly;
pub mod yearly;

pub use figure::{Bar, Figure, Panel, PanelKind, Series, Slice};
pub use svg::to_svg;
