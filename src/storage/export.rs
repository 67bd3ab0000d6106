//! Report file export
//!
//! Writes a trend report to `trend_report_YYYYMMDD.csv` (the topic × date
//! matrix) and `trend_report_YYYYMMDD.json` (summary, rankings and matrix).

use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::analytics::metrics::{top_topics, top_trending, ReportSummary, TopicVolume, TrendingTopic};
use crate::analytics::report::{ReportOrigin, TrendReport};
use crate::analytics::TrendMatrix;
use crate::config::AnalysisConfig;
use crate::error::{Error, Result};

/// Most-mentioned topics included in the JSON export
const EXPORT_TOP_TOPICS: usize = 20;

/// Paths of the files written for one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReports {
    pub csv: PathBuf,
    pub json: PathBuf,
}

/// Everything the JSON export contains
#[derive(Debug, Serialize)]
pub struct ReportBundle<'a> {
    pub target_date: NaiveDate,
    pub origin: ReportOrigin,
    pub summary: ReportSummary,
    pub trending_topics: Vec<TrendingTopic>,
    pub top_topics: Vec<TopicVolume>,
    pub matrix: &'a TrendMatrix,
}

impl<'a> ReportBundle<'a> {
    /// Assemble the bundle; `top_n` bounds the trending list
    #[must_use]
    pub fn new(report: &'a TrendReport, analysis: &AnalysisConfig) -> Self {
        Self {
            target_date: report.target_date,
            origin: report.origin,
            summary: ReportSummary::from_matrix(&report.matrix, analysis.growth_threshold),
            trending_topics: top_trending(&report.matrix, analysis.top_n),
            top_topics: top_topics(&report.matrix, EXPORT_TOP_TOPICS),
            matrix: &report.matrix,
        }
    }
}

/// Writes report files into a directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer, creating `output_dir` if it doesn't exist
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir).map_err(|e| {
            Error::with_source(
                format!("Failed to create output directory: {}", output_dir.display()),
                e,
            )
        })?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn path_for(&self, target_date: NaiveDate, extension: &str) -> PathBuf {
        self.output_dir.join(format!(
            "trend_report_{}.{extension}",
            target_date.format("%Y%m%d")
        ))
    }

    /// Write the CSV matrix and the JSON bundle
    pub fn save(&self, report: &TrendReport, analysis: &AnalysisConfig) -> Result<SavedReports> {
        let csv = self.write_csv(report)?;
        let json = self.write_json(&ReportBundle::new(report, analysis))?;

        tracing::info!(csv = %csv.display(), json = %json.display(), "Saved trend reports");

        Ok(SavedReports { csv, json })
    }

    /// Write the matrix as CSV: `Topic,<date>,...` then one row per topic
    pub fn write_csv(&self, report: &TrendReport) -> Result<PathBuf> {
        let path = self.path_for(report.target_date, "csv");
        let file = File::create(&path)?;
        write_matrix_csv(&report.matrix, BufWriter::new(file))?;
        Ok(path)
    }

    /// Write the JSON bundle
    pub fn write_json(&self, bundle: &ReportBundle<'_>) -> Result<PathBuf> {
        let path = self.path_for(bundle.target_date, "json");
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, bundle)?;
        writer.flush()?;
        Ok(path)
    }
}

/// Serialize a matrix as CSV into any writer
pub fn write_matrix_csv<W: Write>(matrix: &TrendMatrix, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    let mut header = vec![String::from("Topic")];
    header.extend(matrix.columns().iter().map(|d| d.format("%Y-%m-%d").to_string()));
    wtr.write_record(&header)?;

    for (topic, counts) in matrix.rows() {
        let mut record = Vec::with_capacity(counts.len() + 1);
        record.push(topic.to_string());
        record.extend(counts.iter().map(u64::to_string));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
