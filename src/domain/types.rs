//! Shared domain types.
//!
//! Everything here is an immutable value record: built once per run, never
//! mutated afterwards. Derived records are serializable so the chart series
//! and exports can be produced straight from them.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which session of a round the report is built from.
///
/// Every round ships two result files: qualifying (`<stem>.xml`) and the race
/// itself (`<stem>-r.xml`). Reference lap times are the same for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Race,
    Quali,
}

impl SessionKind {
    /// Human-readable label for page titles.
    pub fn display_name(self) -> &'static str {
        match self {
            SessionKind::Race => "Race",
            SessionKind::Quali => "Quali",
        }
    }

    /// Result file name for a round's file stem.
    pub fn file_name(self, stem: &str) -> String {
        match self {
            SessionKind::Race => format!("{stem}-r.xml"),
            SessionKind::Quali => format!("{stem}.xml"),
        }
    }
}

/// Which championship the rounds come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    /// Single-class sprint cup, five rounds.
    Sprint,
    /// Mixed P2UR / GT3 grid; each class is reported on its own.
    Multiclass,
}

impl Series {
    pub fn display_name(self) -> &'static str {
        match self {
            Series::Sprint => "Sprint",
            Series::Multiclass => "Multiclass",
        }
    }

    /// Input directory used when none is given.
    pub fn default_xml_dir(self) -> &'static str {
        match self {
            Series::Sprint => "xml/sprint",
            Series::Multiclass => "xml/multiclass",
        }
    }
}

/// Car class of the multiclass series. Each has its own alien lap times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceClass {
    P2ur,
    Gt3,
}

impl RaceClass {
    pub const ALL: [RaceClass; 2] = [RaceClass::P2ur, RaceClass::Gt3];

    pub fn display_name(self) -> &'static str {
        match self {
            RaceClass::P2ur => "P2UR",
            RaceClass::Gt3 => "GT3",
        }
    }

    /// Text that identifies the class inside a driver's `CarClass` value.
    pub fn car_class_tag(self) -> &'static str {
        match self {
            RaceClass::P2ur => "LMP2_ELMS",
            RaceClass::Gt3 => "GT3",
        }
    }

    /// Resolve a `--class` value: the display name or the `CarClass` tag,
    /// case-insensitive.
    pub fn from_label(label: &str) -> Option<RaceClass> {
        let label = label.trim();
        RaceClass::ALL.into_iter().find(|c| {
            label.eq_ignore_ascii_case(c.display_name()) || label.eq_ignore_ascii_case(c.car_class_tag())
        })
    }
}

/// One configured round of the season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RaceRound {
    /// 1-based position in the season.
    pub round_index: u32,
    pub track_name: &'static str,
    /// Input file stem, e.g. `s3-sc1` or `s3-mc1`.
    pub file_stem: &'static str,
    /// Alien (best-possible) lap time for the track, in seconds.
    pub reference_lap_seconds: f64,
}

/// A single valid lap time parsed from a round's result file.
#[derive(Debug, Clone, PartialEq)]
pub struct LapRecord {
    pub round_index: u32,
    pub driver_name: String,
    pub lap_time_seconds: f64,
}

/// A driver's best lap in one round and the pace derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverRoundPace {
    pub driver_name: String,
    pub round_index: u32,
    pub best_lap_seconds: f64,
    /// `reference / best * 100`; higher is better and may exceed 100.
    pub pace_pct: f64,
    /// `fastest best lap of the round / best * 100`.
    pub leader_pct: f64,
}

/// Average pace in the early and late windows of the season.
///
/// A window is `None` when the driver set no valid lap in any of its rounds.
/// `delta` exists only when both windows do.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverImprovement {
    pub driver_name: String,
    pub early_avg_pace_pct: Option<f64>,
    pub late_avg_pace_pct: Option<f64>,
    pub delta: Option<f64>,
}

/// Round indices averaged for the improvement comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImprovementWindows {
    pub early: Vec<u32>,
    pub late: Vec<u32>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus `.env` / environment defaults).
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub xml_dir: PathBuf,
    pub output: PathBuf,
    pub series: Series,
    pub session: SessionKind,
    /// Multiclass only: the class whose reference times are used.
    pub race_class: Option<RaceClass>,
    /// Case-insensitive substring matched against each driver's `CarClass`.
    pub car_class: Option<String>,
    /// Drop best laps slower than this percentage of the reference lap.
    pub max_pct: Option<f64>,
    pub export_csv: Option<PathBuf>,
    /// Stamp the footer with the generation time.
    pub timestamp: bool,
}

impl ReportConfig {
    /// Series label for titles, e.g. `Sprint` or `Multiclass GT3`.
    pub fn series_label(&self) -> String {
        match (self.series, self.race_class) {
            (Series::Multiclass, Some(class)) => format!("{} {}", self.series.display_name(), class.display_name()),
            _ => self.series.display_name().to_string(),
        }
    }
}
