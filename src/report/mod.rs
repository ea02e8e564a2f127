//! Report views: the pace table, the improvement table and the chart series,
//! ordered and shaped for presentation.
//!
//! Ordering keys (all stable, so repeated runs produce identical output):
//! - pace table and chart: best pace descending, then driver name ascending
//! - improvement table: delta descending, then driver name ascending

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{DriverImprovement, DriverRoundPace, RaceRound};

pub mod format;

pub use format::*;

/// One driver's row in the pace-vs-alien table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceRow {
    pub driver_name: String,
    /// Compact `F. Lastname` form used in tables.
    pub label: String,
    /// Pace per configured round, in round order; `None` where the driver has no lap.
    pub cells: Vec<Option<f64>>,
    /// Highest pace across all rounds.
    pub best_pace_pct: f64,
}

/// One driver's row in the improvement table (delta always defined).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementRow {
    pub driver_name: String,
    pub label: String,
    pub early_avg_pace_pct: f64,
    pub late_avg_pace_pct: f64,
    pub delta: f64,
}

/// One line of the pace chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub driver: String,
    /// One value per round; `null` marks a gap.
    pub pace_pct: Vec<Option<f64>>,
}

/// Everything the chart needs, also embedded in the page as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub rounds: Vec<u32>,
    pub tracks: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// Pivot the pace table into one row per driver.
pub fn build_pace_rows(rounds: &[RaceRound], pace: &[DriverRoundPace]) -> Vec<PaceRow> {
    let mut by_driver: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for p in pace {
        let Some(col) = rounds.iter().position(|r| r.round_index == p.round_index) else {
            continue;
        };
        let cells = by_driver
            .entry(p.driver_name.as_str())
            .or_insert_with(|| vec![None; rounds.len()]);
        cells[col] = Some(p.pace_pct);
    }

    let mut rows: Vec<PaceRow> = by_driver
        .into_iter()
        .filter_map(|(driver_name, cells)| {
            let best_pace_pct = cells.iter().flatten().copied().reduce(f64::max)?;
            Some(PaceRow {
                driver_name: driver_name.to_string(),
                label: short_name(driver_name),
                cells,
                best_pace_pct,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.best_pace_pct
            .partial_cmp(&a.best_pace_pct)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.driver_name.cmp(&b.driver_name))
    });
    rows
}

/// Keep drivers with a defined delta, most improved first.
pub fn build_improvement_rows(improvements: &[DriverImprovement]) -> Vec<ImprovementRow> {
    let mut rows: Vec<ImprovementRow> = improvements
        .iter()
        .filter_map(|i| {
            Some(ImprovementRow {
                driver_name: i.driver_name.clone(),
                label: short_name(&i.driver_name),
                early_avg_pace_pct: i.early_avg_pace_pct?,
                late_avg_pace_pct: i.late_avg_pace_pct?,
                delta: i.delta?,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.delta
            .partial_cmp(&a.delta)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.driver_name.cmp(&b.driver_name))
    });
    rows
}

/// Chart series in pace-table order.
pub fn build_chart_data(rounds: &[RaceRound], rows: &[PaceRow]) -> ChartData {
    ChartData {
        rounds: rounds.iter().map(|r| r.round_index).collect(),
        tracks: rounds.iter().map(|r| r.track_name.to_string()).collect(),
        series: rows
            .iter()
            .map(|row| ChartSeries {
                driver: row.driver_name.clone(),
                pace_pct: row.cells.clone(),
            })
            .collect(),
    }
}

/// `"Ross McLean"` -> `"R. McLean"`. Single-word names are left alone.
pub fn short_name(name: &str) -> String {
    let mut parts = name.split_whitespace();
    let Some(first) = parts.next() else {
        return name.to_string();
    };
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        return name.to_string();
    }
    match first.chars().next() {
        Some(initial) => format!("{initial}. {}", rest.join(" ")),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(round_index: u32, track_name: &'static str) -> RaceRound {
        RaceRound {
            round_index,
            track_name,
            file_stem: "t",
            reference_lap_seconds: 100.0,
        }
    }

    fn pace(driver: &str, round_index: u32, pace_pct: f64) -> DriverRoundPace {
        DriverRoundPace {
            driver_name: driver.to_string(),
            round_index,
            best_lap_seconds: 100.0 / pace_pct * 100.0,
            pace_pct,
            leader_pct: 100.0,
        }
    }

    fn improvement(driver: &str, delta: Option<f64>) -> DriverImprovement {
        DriverImprovement {
            driver_name: driver.to_string(),
            early_avg_pace_pct: Some(95.0),
            late_avg_pace_pct: delta.map(|d| 95.0 + d),
            delta,
        }
    }

    #[test]
    fn pace_rows_pivot_with_gaps_and_sort_by_best() {
        let rounds = [round(1, "A"), round(2, "B"), round(3, "C")];
        let table = [pace("Carl Cox", 1, 93.0), pace("Carl Cox", 3, 96.5), pace("Ann Lee", 2, 97.0)];

        let rows = build_pace_rows(&rounds, &table);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].driver_name, "Ann Lee");
        assert_eq!(rows[0].cells, vec![None, Some(97.0), None]);
        assert_eq!(rows[1].label, "C. Cox");
        assert_eq!(rows[1].cells, vec![Some(93.0), None, Some(96.5)]);
        assert_eq!(rows[1].best_pace_pct, 96.5);
    }

    #[test]
    fn equal_best_pace_falls_back_to_name() {
        let rounds = [round(1, "A")];
        let table = [pace("Zoe", 1, 95.0), pace("Abe", 1, 95.0)];
        let rows = build_pace_rows(&rounds, &table);
        let names: Vec<&str> = rows.iter().map(|r| r.driver_name.as_str()).collect();
        assert_eq!(names, vec!["Abe", "Zoe"]);
    }

    #[test]
    fn improvement_rows_drop_missing_delta_and_sort_descending() {
        let rows = build_improvement_rows(&[
            improvement("Slow Starter", Some(3.0)),
            improvement("Only Early", None),
            improvement("Regressed", Some(-1.5)),
            improvement("Also Three", Some(3.0)),
        ]);
        let names: Vec<&str> = rows.iter().map(|r| r.driver_name.as_str()).collect();
        assert_eq!(names, vec!["Also Three", "Slow Starter", "Regressed"]);
        assert_eq!(rows[2].delta, -1.5);
    }

    #[test]
    fn chart_follows_table_order() {
        let rounds = [round(1, "Portimao"), round(2, "Le Mans")];
        let rows = build_pace_rows(&rounds, &[pace("B", 1, 90.0), pace("A", 2, 99.0)]);
        let chart = build_chart_data(&rounds, &rows);
        assert_eq!(chart.tracks, vec!["Portimao", "Le Mans"]);
        assert_eq!(chart.series[0].driver, "A");
        assert_eq!(chart.series[0].pace_pct, vec![None, Some(99.0)]);
    }

    #[test]
    fn short_name_abbreviates_first_name() {
        assert_eq!(short_name("Ross McLean"), "R. McLean");
        assert_eq!(short_name("Ayrton De La Torres"), "A. De La Torres");
        assert_eq!(short_name("Solo"), "Solo");
    }
}
