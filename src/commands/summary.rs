use playtrend::analytics::metrics::{top_topics, top_trending, ReportSummary, WEEK_LEN};
use playtrend::analytics::TrendReport;
use playtrend::config::AnalysisConfig;

/// Print headline statistics, the most frequent and the trending topics
pub fn print_report_summary(report: &TrendReport, analysis: &AnalysisConfig) {
    let matrix = &report.matrix;
    let summary = ReportSummary::from_matrix(matrix, analysis.growth_threshold);

    println!("\nTrend Analysis Report Summary");
    println!("=============================");
    if report.is_synthetic() {
        println!("(synthetic sample data)");
    }

    println!("\nBasic statistics:");
    println!("  Analysis period: {} days", matrix.width());
    println!("  Total topics tracked: {}", summary.total_topics);
    println!("  Total mentions: {}", summary.total_mentions);
    println!("  Topics with significant growth: {}", summary.significant_growth_topics);
    println!("  New topics (last 7 days): {}", summary.new_topics);

    println!("\nTop 5 most frequent topics:");
    for (i, volume) in top_topics(matrix, 5).iter().enumerate() {
        println!("  {}. {}: {} mentions", i + 1, volume.topic, volume.total_mentions);
    }

    if matrix.width() >= WEEK_LEN {
        let trending = top_trending(matrix, analysis.top_n);
        if !trending.is_empty() {
            println!("\nTop {} trending topics (week over week):", trending.len());
            for topic in trending {
                let arrow = if topic.growth_rate > 0.0 { "↑" } else { "↓" };
                println!("  - {}: {} {arrow}", topic.topic, topic.growth_percent);
            }
        }
    }
}
