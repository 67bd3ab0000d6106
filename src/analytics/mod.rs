//! Analytics module for review topic classification and trend analysis

pub mod aggregator;
pub mod classifier;
pub mod matrix;
pub mod metrics;
pub mod report;

pub use aggregator::{BatchError, DailyAggregator};
pub use classifier::{
    default_topic_definitions, ClassifierError, TopicClassifier, TopicDefinition, TopicPattern,
};
pub use matrix::{MatrixError, TrendMatrix};
pub use metrics::{
    count_significant_growth, growth_rate, identify_new_topics, top_topics, top_trending,
    topic_trends, ReportSummary, TopicTrend, TopicVolume, TrendingTopic, WeekSplit,
};
pub use report::{
    window_start, ReportOrigin, SampleSource, SeededSampleSource, TrendReport, TrendReportBuilder,
    MAX_LOOKBACK_DAYS,
};
