//! Season configuration: the race registry and driver-name normalization.

pub mod names;
pub mod registry;

pub use names::normalize_driver_name;
pub use registry::{improvement_windows, rounds_for, season};
