//! Plotters-powered pace chart, rendered to an SVG string for inlining.
//!
//! Layout:
//! - left: the chart itself (x = round, labelled with the track name;
//!   y = pace % of alien), one line per driver
//! - right: a legend column, one entry per driver in table order
//!
//! Missing rounds break a driver's line: consecutive rounds are joined,
//! a gap is never bridged.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::AppError;
use crate::report::ChartData;

const CHART_WIDTH: u32 = 1280;
const MIN_HEIGHT: u32 = 560;
const LEGEND_WIDTH: u32 = 240;
const LEGEND_ROW: u32 = 16;
const MARKER_SIZE: u32 = 4;

/// Render the chart into a standalone `<svg>` document string.
pub fn render_pace_chart_svg(chart: &ChartData, title: &str) -> Result<String, AppError> {
    let legend_height = 60 + chart.series.len() as u32 * LEGEND_ROW;
    let height = MIN_HEIGHT.max(legend_height);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, height)).into_drawing_area();
        draw_chart(&root, chart, title)
            .and_then(|()| root.present().map_err(Into::into))
            .map_err(|e| AppError::render(format!("Failed to draw pace chart: {e}")))?;
    }
    Ok(svg)
}

fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, chart: &ChartData, title: &str) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (width, _) = root.dim_in_pixel();
    let (plot_area, legend_area) = root.split_horizontally(width.saturating_sub(LEGEND_WIDTH));

    let n_rounds = chart.tracks.len().max(1);
    let (y0, y1) = y_bounds(chart);

    let mut cc = ChartBuilder::on(&plot_area)
        .caption(title, ("sans-serif", 22))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(-0.5..(n_rounds as f64 - 0.5), y0..y1)?;

    let tracks = &chart.tracks;
    let track_label = |v: &f64| {
        let i = v.round();
        if (v - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < tracks.len() {
            tracks[i as usize].clone()
        } else {
            String::new()
        }
    };

    cc.configure_mesh()
        .disable_x_mesh()
        .x_labels(n_rounds)
        .y_labels(8)
        .x_label_formatter(&track_label)
        .y_label_formatter(&|v| format!("{v:.1}"))
        .y_desc("Pace % (vs Alien)")
        .label_style(("sans-serif", 14))
        .draw()?;

    for (idx, series) in chart.series.iter().enumerate() {
        let color = Palette99::pick(idx).mix(1.0);

        for run in contiguous_runs(&series.pace_pct) {
            cc.draw_series(LineSeries::new(run, color.stroke_width(2)))?;
        }

        cc.draw_series(
            series
                .pace_pct
                .iter()
                .enumerate()
                .filter_map(|(x, y)| y.map(|y| (x as f64, y)))
                .map(|pt| Circle::new(pt, MARKER_SIZE, color.filled())),
        )?;
    }

    for (idx, series) in chart.series.iter().enumerate() {
        let color = Palette99::pick(idx).mix(1.0);
        let y = 40 + (idx as u32 * LEGEND_ROW) as i32;
        legend_area.draw(&PathElement::new(vec![(8, y), (32, y)], color.stroke_width(3)))?;
        legend_area.draw(&Text::new(series.driver.clone(), (40, y - 6), ("sans-serif", 12)))?;
    }

    Ok(())
}

/// Split a per-round series into runs of consecutive present values.
fn contiguous_runs(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (x, v) in values.iter().enumerate() {
        match v {
            Some(y) => current.push((x as f64, *y)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Y range covering every plotted value with a little headroom.
fn y_bounds(chart: &ChartData) -> (f64, f64) {
    let (lo, hi) = chart
        .series
        .iter()
        .flat_map(|s| s.pace_pct.iter().flatten().copied())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !(lo.is_finite() && hi.is_finite()) {
        return (90.0, 100.0);
    }
    let pad = ((hi - lo) * 0.05).max(0.5);
    (lo - pad, hi + pad)
}
