use anyhow::Result;
use chrono::NaiveDate;
use std::path::Path;

use playtrend::analytics::TrendReportBuilder;
use playtrend::config::Config;
use playtrend::storage::ReportWriter;

use super::summary::print_report_summary;

/// Write and print the seeded demonstration report
pub fn sample(config: &Config, target_date: NaiveDate, output_dir: &Path) -> Result<()> {
    let builder = TrendReportBuilder::from_config(&config.analysis, config.seed_topics.as_slice());
    let report = builder.generate_sample_report(target_date);

    tracing::warn!(
        seed = config.analysis.sample_seed,
        "Writing synthetic sample report"
    );

    let saved = ReportWriter::new(output_dir)?.save(&report, &config.analysis)?;
    println!("CSV report saved: {}", saved.csv.display());
    println!("JSON report saved: {}", saved.json.display());

    print_report_summary(&report, &config.analysis);
    Ok(())
}
