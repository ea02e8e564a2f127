//! Export the per-(driver, round) pace table to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::io::Write;
use std::path::Path;

use crate::domain::{DriverRoundPace, RaceRound};
use crate::error::AppError;

const HEADER: [&str; 6] = ["driver", "round", "track", "best_lap_seconds", "pace_pct", "leader_pct"];

/// Write the pace table to a CSV file, replacing any previous export atomically.
pub fn write_pace_csv(path: &Path, rounds: &[RaceRound], pace: &[DriverRoundPace]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_pace_rows(&mut writer, rounds, pace)
        .map_err(|e| AppError::output(format!("Failed to build export CSV '{}': {e}", path.display())))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::output(format!("Failed to build export CSV '{}': {e}", path.display())))?;

    crate::io::output::write_file_atomic(path, &bytes, "export CSV")
}

fn write_pace_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    rounds: &[RaceRound],
    pace: &[DriverRoundPace],
) -> csv::Result<()> {
    writer.write_record(HEADER)?;
    for p in pace {
        let track = rounds
            .iter()
            .find(|r| r.round_index == p.round_index)
            .map(|r| r.track_name)
            .unwrap_or("");
        writer.write_record([
            p.driver_name.clone(),
            p.round_index.to_string(),
            track.to_string(),
            format!("{:.3}", p.best_lap_seconds),
            format!("{:.4}", p.pace_pct),
            format!("{:.4}", p.leader_pct),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::season;

    #[test]
    fn rows_carry_track_and_metrics() {
        let pace = [DriverRoundPace {
            driver_name: "Smith, \"Smokey\" J".to_string(),
            round_index: 4,
            best_lap_seconds: 104.8,
            pace_pct: 99.01 / 104.8 * 100.0,
            leader_pct: 100.0,
        }];
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_pace_rows(&mut writer, season(), &pace).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "driver,round,track,best_lap_seconds,pace_pct,leader_pct");
        assert_eq!(lines[1], "\"Smith, \"\"Smokey\"\" J\",4,Monza,104.800,94.4752,100.0000");
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("pace.csv");
        write_pace_csv(&path, season(), &[]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn failed_export_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pace.csv");
        std::fs::write(&path, "previous csv").unwrap();
        // The parent of the target is a regular file, so nothing can be created.
        let blocked = path.join("pace.csv");

        assert!(write_pace_csv(&blocked, season(), &[]).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous csv");
    }
}
