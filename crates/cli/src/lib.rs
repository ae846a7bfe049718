//! Command-line driver for the stock ledger.
//!
//! Reads notes from stdin, records them, and prints a JSON report.

pub mod config;
pub mod report;

pub use config::ReportConfig;
pub use report::{IngestSummary, Report, build_report, ingest_notes};
