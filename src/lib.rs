//! `pace-report` library crate.
//!
//! The binary (`pace`) is a thin wrapper around this library so that:
//!
//! - the pipeline stages are testable without spawning processes
//! - the metrics can be reused for other outputs (exports, other pages)

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod metrics;
pub mod plot;
pub mod render;
pub mod report;
