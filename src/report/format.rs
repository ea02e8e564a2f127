//! Terminal output: a short run summary printed after the report is written.
//!
//! Formatting lives here so the metrics code stays free of presentation and
//! the HTML renderer can share the same number formatting.

use crate::domain::ReportConfig;
use crate::io::ingest::IngestedRound;
use crate::report::{ImprovementRow, PaceRow};

/// Display precision for percentages; values are kept at full precision.
pub const PCT_DECIMALS: usize = 2;

/// `94.4751` -> `"94.48"`, `None` -> `""`.
pub fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.prec$}", prec = PCT_DECIMALS),
        _ => String::new(),
    }
}

/// Signed variant for deltas: `+1.25`, `-0.40`.
pub fn fmt_delta(value: f64) -> String {
    format!("{value:+.prec$}", prec = PCT_DECIMALS)
}

/// Format the run summary (rounds loaded + top of both tables).
pub fn format_run_summary(
    rounds: &[IngestedRound],
    pace_rows: &[PaceRow],
    improvement_rows: &[ImprovementRow],
    config: &ReportConfig,
    top_n: usize,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== pace - {} {} Pace Report ===\n",
        config.series_label(),
        config.session.display_name()
    ));
    if let Some(class) = &config.car_class {
        out.push_str(&format!("Class filter: {class}\n"));
    }
    if let Some(max) = config.max_pct {
        out.push_str(&format!("Outlier cut: laps over {max}% of alien dropped\n"));
    }

    out.push_str("\nRounds:\n");
    for r in rounds {
        out.push_str(&format!(
            "  R{} {:<12} ref={:>8.3}s drivers={:>3} laps={:>4}\n",
            r.round.round_index,
            r.round.track_name,
            r.round.reference_lap_seconds,
            r.drivers_used,
            r.records.len(),
        ));
    }

    out.push_str(&format!("\nTop {top_n} by best pace (% of alien):\n"));
    for row in pace_rows.iter().take(top_n) {
        out.push_str(&format!("  {:<24} {:>7}\n", truncate(&row.driver_name, 24), fmt_pct(Some(row.best_pace_pct))));
    }

    out.push_str(&format!("\nMost improved (of {}):\n", improvement_rows.len()));
    for row in improvement_rows.iter().take(top_n) {
        out.push_str(&format!("  {:<24} {:>7}\n", truncate(&row.driver_name, 24), fmt_delta(row.delta)));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
