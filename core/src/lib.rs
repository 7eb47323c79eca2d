//! Core analysis library for acoustic gunshot-detection load tests.
//!
//! The modules take the CSV output of a detection load-test campaign and
//! turn it into validated tables, pooled classification outcomes, and
//! fitted trend curves ready for reporting.

pub mod analysis;
pub mod dataset;
pub mod math;
pub mod prelude;
pub mod telemetry;

pub use prelude::{DatasetError, DatasetResult};
