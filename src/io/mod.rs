//! Input/output helpers.
//!
//! - XML result ingest (`ingest`)
//! - pace table CSV export (`export`)
//! - atomic report writing (`output`)

pub mod export;
pub mod ingest;
pub mod output;

pub use export::*;
pub use ingest::*;
pub use output::*;
