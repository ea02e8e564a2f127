//! Chart rendering for the pace report.

pub mod svg;

pub use svg::render_pace_chart_svg;
