use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use playtrend::analytics::{window_start, DailyAggregator, TrendReportBuilder};
use playtrend::config::Config;
use playtrend::mock::MockReviewGenerator;
use playtrend::storage::ReportWriter;

use super::summary::print_report_summary;

/// Options for a full analysis run
#[derive(Debug, Clone)]
pub struct AnalyzeParams {
    pub target_date: NaiveDate,
    pub lookback_days: u32,
    pub max_reviews: usize,
    pub output_dir: PathBuf,
    /// Seed for mock reviews; random when `None`
    pub seed: Option<u64>,
}

pub fn analyze(config: &Config, params: AnalyzeParams) -> Result<()> {
    let start_date = window_start(params.target_date, params.lookback_days)
        .context("Invalid analysis window")?;

    println!("Play Store Trend Analyzer");
    println!("=========================");
    println!("App: {}", config.app.app_id);
    println!("Analysis period: {start_date} to {}", params.target_date);
    println!("Lookback days: {}", params.lookback_days);
    println!("Max reviews/day: {}", params.max_reviews);

    let classifier = config.classifier().context("Failed to build topic classifier")?;
    let mut aggregator = DailyAggregator::new(classifier);
    let mut generator = match params.seed {
        Some(seed) => MockReviewGenerator::new(seed),
        None => MockReviewGenerator::from_entropy(),
    };

    println!("\nProcessing review data");
    println!("----------------------");

    let mut failed_days = 0usize;
    for (i, date) in start_date
        .iter_days()
        .take_while(|d| *d <= params.target_date)
        .enumerate()
    {
        let day = i + 1;
        let reviews = generator.generate_daily_reviews(date, params.max_reviews);
        let outcome = aggregator.process_daily_batch(&reviews, date);

        match (outcome.error(), outcome.topic_count()) {
            (None, Some(topic_count)) => println!(
                "Day {day:2}: {date} - Processed {:3} reviews, Found {topic_count:2} topics",
                reviews.len()
            ),
            (error, _) => {
                failed_days += 1;
                println!("Day {day:2}: {date} - ERROR: {}", error.unwrap_or("Unknown"));
            }
        }
    }

    tracing::info!(
        days = aggregator.days_processed(),
        failed = failed_days,
        "Finished processing daily batches"
    );

    println!("\nGenerating trend analysis report...");

    let mut analysis = config.analysis.clone();
    analysis.lookback_days = params.lookback_days;
    let builder = TrendReportBuilder::from_config(&analysis, config.seed_topics.as_slice());
    let report = builder.generate_trend_report(&aggregator, params.target_date);

    if report.matrix.is_empty() {
        println!("\nError: Could not generate trend report.");
        println!("No topic reached the minimum frequency of {}.", analysis.min_topic_frequency);
        return Ok(());
    }

    let writer = ReportWriter::new(&params.output_dir)?;
    let saved = writer.save(&report, &analysis)?;
    println!("\nCSV report saved: {}", saved.csv.display());
    println!("JSON report saved: {}", saved.json.display());

    print_report_summary(&report, &analysis);

    println!("\nAnalysis complete");
    Ok(())
}
