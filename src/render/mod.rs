//! HTML page rendering.
//!
//! The page is a single self-contained document: the chart is inlined as SVG,
//! the tables are plain markup, and the chart series ride along as a JSON
//! script block. No external assets are referenced.

use handlebars::Handlebars;
use serde::Serialize;

use crate::domain::{RaceRound, SessionKind};
use crate::error::AppError;
use crate::plot::render_pace_chart_svg;
use crate::report::{ChartData, ImprovementRow, PaceRow};

pub mod helpers;

const TEMPLATE_NAME: &str = "report";
const TEMPLATE: &str = include_str!("../../templates/report.html.hbs");

/// Attribution line shown in the footer.
const SOURCE_LABEL: &str = "OOFS S3 XML Race Data";

/// Inputs for one rendered page.
#[derive(Debug, Clone)]
pub struct PageInput<'a> {
    /// `Sprint`, `Multiclass P2UR`, ...
    pub series_label: &'a str,
    pub session: SessionKind,
    pub rounds: &'a [RaceRound],
    pub pace_rows: &'a [PaceRow],
    pub improvement_rows: &'a [ImprovementRow],
    pub chart: &'a ChartData,
    /// Footer timestamp; `None` leaves it out.
    pub updated: Option<String>,
}

#[derive(Serialize)]
struct PageContext<'a> {
    title: String,
    subtitle: String,
    source: &'static str,
    tracks: Vec<&'static str>,
    pace_rows: &'a [PaceRow],
    improvement_rows: &'a [ImprovementRow],
    chart_svg: String,
    chart_json: String,
    updated: Option<String>,
}

/// Render the full HTML document.
pub fn render_report_html(input: &PageInput<'_>) -> Result<String, AppError> {
    let series = input.series_label;
    let session = input.session.display_name();
    let n_rounds = input.rounds.len();

    let chart_title = format!("{series} {session} Pace Trend: After {n_rounds} Rounds");
    let chart_svg = render_pace_chart_svg(input.chart, &chart_title)?;

    let context = PageContext {
        title: format!("{series} {session} Pace Data"),
        subtitle: format!("Performance Analysis Across {n_rounds} Championship Rounds"),
        source: SOURCE_LABEL,
        tracks: input.rounds.iter().map(|r| r.track_name).collect(),
        pace_rows: input.pace_rows,
        improvement_rows: input.improvement_rows,
        chart_svg: strip_xml_declaration(&chart_svg).to_string(),
        chart_json: chart_json(input.chart)?,
        updated: input.updated.clone(),
    };

    registry()?
        .render(TEMPLATE_NAME, &context)
        .map_err(|e| AppError::render(format!("Failed to render report template: {e}")))
}

fn registry() -> Result<Handlebars<'static>, AppError> {
    let mut hb = Handlebars::new();
    hb.set_strict_mode(true);
    hb.register_helper("pct", Box::new(helpers::Pct));
    hb.register_helper("signed", Box::new(helpers::Signed));
    hb.register_template_string(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| AppError::render(format!("Invalid report template: {e}")))?;
    Ok(hb)
}

/// Chart series as JSON, safe to place inside a `<script>` element.
fn chart_json(chart: &ChartData) -> Result<String, AppError> {
    let json = serde_json::to_string(chart)
        .map_err(|e| AppError::render(format!("Failed to serialize chart data: {e}")))?;
    Ok(json.replace("</", "<\\/"))
}

fn strip_xml_declaration(svg: &str) -> &str {
    match svg.strip_prefix("<?xml") {
        Some(rest) => rest.find("?>").map(|i| rest[i + 2..].trim_start()).unwrap_or(svg),
        None => svg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ChartSeries;

    const ROUNDS: [RaceRound; 2] = [
        RaceRound {
            round_index: 1,
            track_name: "Portimao",
            file_stem: "s3-sc1",
            reference_lap_seconds: 103.14,
        },
        RaceRound {
            round_index: 2,
            track_name: "Le Mans",
            file_stem: "s3-sc2",
            reference_lap_seconds: 235.31,
        },
    ];

    fn render(pace_rows: &[PaceRow], improvement_rows: &[ImprovementRow], updated: Option<String>) -> String {
        let chart = crate::report::build_chart_data(&ROUNDS, pace_rows);
        render_report_html(&PageInput {
            series_label: "Sprint",
            session: SessionKind::Race,
            rounds: &ROUNDS,
            pace_rows,
            improvement_rows,
            chart: &chart,
            updated,
        })
        .unwrap()
    }

    fn pace_row(name: &str, cells: Vec<Option<f64>>) -> PaceRow {
        PaceRow {
            driver_name: name.to_string(),
            label: crate::report::short_name(name),
            best_pace_pct: cells.iter().flatten().copied().fold(f64::MIN, f64::max),
            cells,
        }
    }

    #[test]
    fn page_contains_tables_chart_and_series() {
        let rows = [pace_row("Ross McLean", vec![Some(94.4751), None])];
        let improvement = [ImprovementRow {
            driver_name: "Ross McLean".into(),
            label: "R. McLean".into(),
            early_avg_pace_pct: 94.0,
            late_avg_pace_pct: 95.25,
            delta: 1.25,
        }];
        let html = render(&rows, &improvement, None);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Sprint Race Pace Data"));
        assert!(html.contains("<svg"));
        assert!(html.contains(">R. McLean<"));
        assert!(html.contains(">94.48<"));
        assert!(html.contains(">+1.25<"));
        assert!(html.contains("<td class=\"num\"></td>"));
        assert!(html.contains("\"pace_pct\":[94.4751,null]"));
        assert!(!html.contains("Last updated"));
    }

    #[test]
    fn driver_names_are_escaped() {
        let rows = [pace_row("Bob <b>Bold</b>", vec![Some(95.0), Some(96.0)])];
        let html = render(&rows, &[], Some("2026-10-19 12:00:00".into()));
        assert!(html.contains("title=\"Bob &lt;b&gt;Bold&lt;/b&gt;\""));
        assert!(html.contains(">B. &lt;b&gt;Bold&lt;/b&gt;<"));
        assert!(html.contains("Bob <b>Bold<\\/b>"));
        assert!(html.contains("Last updated: 2026-10-19 12:00:00"));
    }

    #[test]
    fn title_names_series_and_class() {
        let chart = crate::report::build_chart_data(&ROUNDS, &[]);
        let html = render_report_html(&PageInput {
            series_label: "Multiclass P2UR",
            session: SessionKind::Quali,
            rounds: &ROUNDS,
            pace_rows: &[],
            improvement_rows: &[],
            chart: &chart,
            updated: None,
        })
        .unwrap();
        assert!(html.contains("<title>Multiclass P2UR Quali Pace Data</title>"));
    }

    #[test]
    fn chart_json_cannot_close_script() {
        let chart = ChartData {
            rounds: vec![1],
            tracks: vec!["x".into()],
            series: vec![ChartSeries {
                driver: "</script>".into(),
                pace_pct: vec![Some(90.0)],
            }],
        };
        assert!(!chart_json(&chart).unwrap().contains("</script>"));
    }

    #[test]
    fn xml_declaration_is_dropped() {
        assert_eq!(strip_xml_declaration("<?xml version=\"1.0\"?>\n<svg/>"), "<svg/>");
        assert_eq!(strip_xml_declaration("<svg/>"), "<svg/>");
    }
}
