pub mod config;
pub mod runner;

pub use config::ReportConfig;
pub use runner::Runner;
