//! Report persistence
//!
//! This module writes finished trend reports to disk.

pub mod export;

pub use export::{write_matrix_csv, ReportBundle, ReportWriter, SavedReports};
