//! The report pipeline: registry -> XML ingest -> metrics -> views -> page.
//!
//! Each stage is a plain function of the previous stage's output, so the
//! pure part (`build_report`) can be tested without touching the filesystem.

use chrono::Local;
use tracing::info;

use crate::domain::{DriverImprovement, DriverRoundPace, LapRecord, RaceRound, ReportConfig};
use crate::error::AppError;
use crate::io::ingest::{IngestedRound, load_season};
use crate::render::{PageInput, render_report_html};
use crate::report::{ChartData, ImprovementRow, PaceRow};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub rounds: Vec<RaceRound>,
    pub ingested: Vec<IngestedRound>,
    pub pace: Vec<DriverRoundPace>,
    pub improvements: Vec<DriverImprovement>,
    pub pace_rows: Vec<PaceRow>,
    pub improvement_rows: Vec<ImprovementRow>,
    pub chart: ChartData,
}

/// Load every round and compute the report data. Nothing is written.
pub fn run_pipeline(rounds: &[RaceRound], config: &ReportConfig) -> Result<RunOutput, AppError> {
    let ingested = load_season(rounds, config)?;
    Ok(build_report(rounds, ingested, config.max_pct))
}

/// Derive metrics and presentation views from already-parsed rounds.
///
/// `max_pct` optionally drops best laps slower than that share of the
/// reference lap before anything else is derived.
pub fn build_report(rounds: &[RaceRound], ingested: Vec<IngestedRound>, max_pct: Option<f64>) -> RunOutput {
    let records: Vec<LapRecord> = ingested.iter().flat_map(|r| r.records.iter().cloned()).collect();

    let mut pace = crate::metrics::compute_pace_table(rounds, &records);
    if let Some(max) = max_pct {
        pace = crate::metrics::drop_slow_laps(pace, max);
    }
    let windows = crate::data::improvement_windows(rounds);
    let improvements = crate::metrics::compute_improvements(&pace, &windows);

    let pace_rows = crate::report::build_pace_rows(rounds, &pace);
    let improvement_rows = crate::report::build_improvement_rows(&improvements);
    let chart = crate::report::build_chart_data(rounds, &pace_rows);

    RunOutput {
        rounds: rounds.to_vec(),
        ingested,
        pace,
        improvements,
        pace_rows,
        improvement_rows,
        chart,
    }
}

/// Render the HTML page for a computed run.
pub fn render_page(run: &RunOutput, config: &ReportConfig) -> Result<String, AppError> {
    let updated = config
        .timestamp
        .then(|| Local::now().format("%Y-%m-%d %H:%M:%S").to_string());

    render_report_html(&PageInput {
        series_label: &config.series_label(),
        session: config.session,
        rounds: &run.rounds,
        pace_rows: &run.pace_rows,
        improvement_rows: &run.improvement_rows,
        chart: &run.chart,
        updated,
    })
}

/// Full run: compute, render, publish the page, then export.
///
/// The page is only written once every earlier step has succeeded, and the
/// CSV only once the page is in place. Both are replaced atomically.
pub fn generate(rounds: &[RaceRound], config: &ReportConfig) -> Result<RunOutput, AppError> {
    let run = run_pipeline(rounds, config)?;
    let html = render_page(&run, config)?;

    crate::io::output::write_report_atomic(&config.output, &html)?;
    info!(
        path = %config.output.display(),
        drivers = run.pace_rows.len(),
        improved = run.improvement_rows.len(),
        "wrote report"
    );

    if let Some(path) = &config.export_csv {
        crate::io::export::write_pace_csv(path, &run.rounds, &run.pace)?;
        info!(path = %path.display(), rows = run.pace.len(), "exported pace table");
    }

    Ok(run)
}
