//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - season configuration records (`RaceRound`, `Series`, `RaceClass`, `SessionKind`)
//! - parsed lap observations (`LapRecord`)
//! - derived metrics (`DriverRoundPace`, `DriverImprovement`)

pub mod types;

pub use types::*;
