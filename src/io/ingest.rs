//! XML result-file ingest.
//!
//! Turns one round's results export (rFactor 2 / Le Mans Ultimate format) into
//! a flat list of `LapRecord`s.
//!
//! Expected layout:
//!
//! ```text
//! <rFactorXML>
//!   <RaceResults>
//!     ...
//!     <Race>                 (last child: the session)
//!       <Driver>
//!         <Name>..</Name>
//!         <CarClass>..</CarClass>
//!         <BestLapTime>104.812</BestLapTime>
//!         <Lap num="1" ...>105.201</Lap>
//!       </Driver>
//! ```
//!
//! Rules:
//! - **Strict structure**: a missing file, malformed XML, a missing session
//!   element or a nameless driver fails the whole run (`DataFormatError`).
//! - **Lenient values**: lap entries that are not positive numbers (`--.----`,
//!   `DNF`, empty) are skipped. A driver with no valid lap simply has no records.
//! - Every valid lap is kept; picking the best one is the calculator's job.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use tracing::{debug, info, warn};

use crate::data::normalize_driver_name;
use crate::domain::{LapRecord, RaceRound, ReportConfig};
use crate::error::AppError;

/// Parsed contents of one round's result file.
#[derive(Debug, Clone)]
pub struct IngestedRound {
    pub round: RaceRound,
    pub path: PathBuf,
    pub records: Vec<LapRecord>,
    /// `Driver` elements seen in the session.
    pub drivers_read: usize,
    /// Drivers that contributed at least one record.
    pub drivers_used: usize,
    /// Drivers dropped by the car-class filter.
    pub drivers_filtered: usize,
}

/// Load every configured round for the selected session.
///
/// Stops at the first failing file: a partial season would silently skew
/// the averages downstream.
pub fn load_season(rounds: &[RaceRound], config: &ReportConfig) -> Result<Vec<IngestedRound>, AppError> {
    let mut out = Vec::with_capacity(rounds.len());
    for round in rounds {
        let path = config.xml_dir.join(config.session.file_name(round.file_stem));
        let ingested = load_round(round, &path, config.car_class.as_deref())?;
        info!(
            round = round.round_index,
            track = round.track_name,
            drivers = ingested.drivers_used,
            laps = ingested.records.len(),
            "loaded round"
        );
        out.push(ingested);
    }
    Ok(out)
}

/// Read and parse a single round's result file.
pub fn load_round(round: &RaceRound, path: &Path, car_class: Option<&str>) -> Result<IngestedRound, AppError> {
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::data_format(format!(
            "Failed to read results for round {} ({}) from '{}': {e}",
            round.round_index,
            round.track_name,
            path.display()
        ))
    })?;

    let mut ingested = parse_round(round, &text, car_class).map_err(|e| {
        AppError::data_format(format!("Invalid results file '{}': {e}", path.display()))
    })?;
    ingested.path = path.to_path_buf();
    Ok(ingested)
}

/// Parse a round's XML text.
///
/// The returned `path` is empty; `load_round` fills it in.
pub fn parse_round(round: &RaceRound, xml: &str, car_class: Option<&str>) -> Result<IngestedRound, AppError> {
    let doc = Document::parse(xml).map_err(|e| AppError::data_format(format!("XML parse error: {e}")))?;

    let results = doc
        .root_element()
        .first_element_child()
        .ok_or_else(|| AppError::data_format("Missing results element under the document root."))?;
    let session = results
        .last_element_child()
        .ok_or_else(|| AppError::data_format("Missing session element under the results element."))?;

    let mut records = Vec::new();
    let mut drivers_read = 0usize;
    let mut drivers_used = 0usize;
    let mut drivers_filtered = 0usize;

    for (idx, driver) in session.children().filter(|n| n.has_tag_name("Driver")).enumerate() {
        drivers_read += 1;

        let raw_name = child_text(driver, "Name").ok_or_else(|| {
            AppError::data_format(format!(
                "Driver #{} in session <{}> has no name.",
                idx + 1,
                session.tag_name().name()
            ))
        })?;
        let driver_name = normalize_driver_name(raw_name);
        if driver_name.is_empty() {
            return Err(AppError::data_format(format!(
                "Driver #{} has an empty name after normalization ('{raw_name}').",
                idx + 1
            )));
        }

        if !matches_class(child_text(driver, "CarClass"), car_class) {
            drivers_filtered += 1;
            continue;
        }

        let laps = lap_times(driver);
        if laps.is_empty() {
            debug!(round = round.round_index, driver = %driver_name, "no valid lap time");
            continue;
        }

        drivers_used += 1;
        records.extend(laps.into_iter().map(|lap_time_seconds| LapRecord {
            round_index: round.round_index,
            driver_name: driver_name.clone(),
            lap_time_seconds,
        }));
    }

    if drivers_read == 0 {
        warn!(
            round = round.round_index,
            track = round.track_name,
            "session contains no drivers"
        );
    }

    Ok(IngestedRound {
        round: *round,
        path: PathBuf::new(),
        records,
        drivers_read,
        drivers_used,
        drivers_filtered,
    })
}

/// Every valid lap time listed for a driver: the summary `BestLapTime` plus
/// each individual `Lap` entry.
fn lap_times(driver: Node<'_, '_>) -> Vec<f64> {
    let best = child_text(driver, "BestLapTime").and_then(parse_lap_time);
    let laps = driver
        .children()
        .filter(|n| n.has_tag_name("Lap"))
        .filter_map(|n| n.text().and_then(parse_lap_time));
    best.into_iter().chain(laps).collect()
}

fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|c| c.has_tag_name(tag))
        .and_then(|c| c.text())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn matches_class(value: Option<&str>, filter: Option<&str>) -> bool {
    let Some(filter) = filter else { return true };
    let Some(value) = value else { return false };
    value.to_ascii_lowercase().contains(&filter.trim().to_ascii_lowercase())
}

/// Parse a lap time given either as seconds (`104.812`) or `M:SS.sss`.
///
/// Returns `None` for anything that is not a finite, positive duration.
pub fn parse_lap_time(s: &str) -> Option<f64> {
    let s = s.trim();
    let secs = match s.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes = minutes.trim().parse::<f64>().ok()?;
            let seconds = seconds.trim().parse::<f64>().ok()?;
            minutes * 60.0 + seconds
        }
        None => s.parse::<f64>().ok()?,
    };
    if secs.is_finite() && secs > 0.0 { Some(secs) } else { None }
}
