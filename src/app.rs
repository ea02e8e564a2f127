//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the report pipeline for the configured season
//! - prints a short summary

use clap::Parser;

use crate::cli::Cli;
use crate::domain::{RaceClass, ReportConfig, Series};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `pace` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    crate::logging::init_logging(cli.verbose);

    let config = report_config_from_args(&cli)?;
    let rounds = crate::data::rounds_for(config.series, config.race_class)?;
    let run = pipeline::generate(&rounds, &config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.ingested, &run.pace_rows, &run.improvement_rows, &config, cli.top)
    );
    Ok(())
}

/// Resolve CLI flags into a run configuration.
///
/// For the multiclass series `--class` must name a class, and the driver
/// filter becomes that class's `CarClass` tag.
pub fn report_config_from_args(cli: &Cli) -> Result<ReportConfig, AppError> {
    let class_arg = cli.car_class.clone().filter(|c| !c.trim().is_empty());

    let race_class = match cli.series {
        Series::Sprint => None,
        Series::Multiclass => {
            let label = class_arg.as_deref().ok_or_else(|| {
                AppError::config("The multiclass series needs a car class (--class P2UR or --class GT3)")
            })?;
            let class = RaceClass::from_label(label).ok_or_else(|| {
                AppError::config(format!("Unknown multiclass car class '{label}' (expected P2UR or GT3)"))
            })?;
            Some(class)
        }
    };
    let car_class = match race_class {
        Some(class) => Some(class.car_class_tag().to_string()),
        None => class_arg,
    };

    if let Some(max) = cli.max_pct.filter(|m| !(m.is_finite() && *m > 0.0)) {
        return Err(AppError::config(format!("--max-pct must be a positive percentage, got {max}")));
    }

    Ok(ReportConfig {
        xml_dir: cli
            .xml_dir
            .clone()
            .unwrap_or_else(|| cli.series.default_xml_dir().into()),
        output: cli.output.clone(),
        series: cli.series,
        session: cli.session,
        race_class,
        car_class,
        max_pct: cli.max_pct,
        export_csv: cli.export_csv.clone(),
        timestamp: !cli.no_timestamp,
    })
}
