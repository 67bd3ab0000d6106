//! playtrend - Play Store review trend analyzer
//!
//! Classifies free-text app reviews into complaint topics with regex rules,
//! accumulates per-day topic counts, and reports week-over-week trends.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`analytics`] - Topic classification, daily aggregation, trend matrix and metrics
//! - [`config`] - Configuration management and settings
//! - [`models`] - Core data structures and types
//! - [`mock`] - Seeded mock review generation
//! - [`storage`] - CSV/JSON report export
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use playtrend::analytics::{DailyAggregator, TopicClassifier, TrendReportBuilder};
//! use playtrend::models::Review;
//!
//! let classifier = TopicClassifier::with_default_topics().unwrap();
//! let mut aggregator = DailyAggregator::new(classifier);
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let outcome = aggregator.process_daily_batch(&[Review::new("Delivery was 2 hours late")], day);
//! assert_eq!(outcome.topic_count(), Some(1));
//!
//! let report = TrendReportBuilder::new(6, 1).generate_trend_report(&aggregator, day);
//! assert_eq!(report.matrix.width(), 7);
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod mock;
pub mod models;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{
        DailyAggregator, ReportOrigin, TopicClassifier, TrendMatrix, TrendReport, TrendReportBuilder,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, PlaytrendErrorTrait, Result};
    pub use crate::models::{BatchOutcome, Review};
}

// Direct re-exports for convenience
pub use models::{BatchOutcome, Review};
