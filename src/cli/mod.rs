//! Command-line parsing for the pace report generator.
//!
//! Every option has a default (or an environment fallback), so a bare `pace`
//! builds the sprint race report from `xml/sprint` into `docs/index.html`.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{Series, SessionKind};

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(name = "pace", version, about = "Race pace report generator (XML results -> static HTML)")]
pub struct Cli {
    /// Championship to report on.
    #[arg(long, env = "PACE_SERIES", value_enum, default_value_t = Series::Sprint)]
    pub series: Series,

    /// Directory holding one results XML file per round
    /// [default: xml/sprint or xml/multiclass, by series].
    #[arg(long, env = "PACE_XML_DIR")]
    pub xml_dir: Option<PathBuf>,

    /// HTML file to write.
    #[arg(short, long, env = "PACE_OUTPUT", default_value = "docs/index.html")]
    pub output: PathBuf,

    /// Which session of each round to report on.
    #[arg(long, env = "PACE_SESSION", value_enum, default_value_t = SessionKind::Race)]
    pub session: SessionKind,

    /// Sprint: only include drivers whose car class contains this text
    /// (case-insensitive). Multiclass: the class to score, P2UR or GT3.
    #[arg(long = "class", env = "PACE_CAR_CLASS")]
    pub car_class: Option<String>,

    /// Drop best laps slower than this percentage of the alien lap (e.g. 107).
    #[arg(long, env = "PACE_MAX_PCT", value_name = "PCT")]
    pub max_pct: Option<f64>,

    /// Also export the per-round pace table to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    /// Leave the "Last updated" timestamp out of the page footer.
    #[arg(long)]
    pub no_timestamp: bool,

    /// Number of drivers listed in the terminal summary.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(short, long)]
    pub verbose: bool,
}
