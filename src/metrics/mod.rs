//! Pace metrics: best laps, pace vs the alien reference, and improvement.
//!
//! Both derivations are pure functions over the full set of parsed laps.
//! Grouping goes through `BTreeMap`s so output order is fixed: driver name
//! ascending, then round index.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::{DriverImprovement, DriverRoundPace, ImprovementWindows, LapRecord, RaceRound};

/// Best lap and pace percentage for every (driver, round) with at least one lap.
pub fn compute_pace_table(rounds: &[RaceRound], records: &[LapRecord]) -> Vec<DriverRoundPace> {
    let mut best: BTreeMap<(&str, u32), f64> = BTreeMap::new();
    for r in records {
        best.entry((r.driver_name.as_str(), r.round_index))
            .and_modify(|t| *t = t.min(r.lap_time_seconds))
            .or_insert(r.lap_time_seconds);
    }

    let mut leader: BTreeMap<u32, f64> = BTreeMap::new();
    for (&(_, round_index), &t) in &best {
        leader
            .entry(round_index)
            .and_modify(|l| *l = l.min(t))
            .or_insert(t);
    }

    let mut out = Vec::with_capacity(best.len());
    for ((driver_name, round_index), best_lap_seconds) in best {
        let Some(round) = rounds.iter().find(|r| r.round_index == round_index) else {
            warn!(round = round_index, driver = driver_name, "lap for an unconfigured round ignored");
            continue;
        };
        let leader_lap = leader.get(&round_index).copied().unwrap_or(best_lap_seconds);
        out.push(DriverRoundPace {
            driver_name: driver_name.to_string(),
            round_index,
            best_lap_seconds,
            pace_pct: round.reference_lap_seconds / best_lap_seconds * 100.0,
            leader_pct: leader_lap / best_lap_seconds * 100.0,
        });
    }
    out
}

/// Drop rows whose best lap is slower than `max_pct` percent of the round's
/// reference lap. `pace_pct` is the inverse ratio, so the cut sits at
/// `10_000 / max_pct` on that scale.
pub fn drop_slow_laps(pace: Vec<DriverRoundPace>, max_pct: f64) -> Vec<DriverRoundPace> {
    let floor = 10_000.0 / max_pct;
    pace.into_iter()
        .filter(|p| {
            let keep = p.pace_pct >= floor;
            if !keep {
                debug!(
                    driver = %p.driver_name,
                    round = p.round_index,
                    pace_pct = p.pace_pct,
                    "best lap beyond outlier cut; dropped"
                );
            }
            keep
        })
        .collect()
}

/// Early vs late average pace for every driver in the pace table.
///
/// Drivers with no round in either window are left out. Drivers with only one
/// window are kept with `delta = None`.
pub fn compute_improvements(pace: &[DriverRoundPace], windows: &ImprovementWindows) -> Vec<DriverImprovement> {
    let mut by_driver: BTreeMap<&str, Vec<&DriverRoundPace>> = BTreeMap::new();
    for p in pace {
        by_driver.entry(p.driver_name.as_str()).or_default().push(p);
    }

    let mut out = Vec::new();
    for (driver_name, rows) in by_driver {
        let early = window_mean(&rows, &windows.early);
        let late = window_mean(&rows, &windows.late);

        let delta = match (early, late) {
            (None, None) => continue,
            (Some(e), Some(l)) => Some(l - e),
            (Some(_), None) | (None, Some(_)) => {
                warn!(
                    driver = driver_name,
                    missing = if early.is_none() { "early" } else { "late" },
                    "no pace data for improvement window; delta omitted"
                );
                None
            }
        };

        out.push(DriverImprovement {
            driver_name: driver_name.to_string(),
            early_avg_pace_pct: early,
            late_avg_pace_pct: late,
            delta,
        });
    }
    out
}

fn window_mean(rows: &[&DriverRoundPace], window: &[u32]) -> Option<f64> {
    let values: Vec<f64> = rows
        .iter()
        .filter(|p| window.contains(&p.round_index))
        .map(|p| p.pace_pct)
        .collect();
    mean(&values)
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
