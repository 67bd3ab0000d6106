//! Common test utilities
#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use playtrend::analytics::{DailyAggregator, TopicClassifier};
use playtrend::models::Review;

/// First day of every test timeline
pub fn day0() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// `day0() + offset` days
pub fn day(offset: i64) -> NaiveDate {
    day0() + Duration::days(offset)
}

/// Aggregator over the built-in topic table
pub fn default_aggregator() -> DailyAggregator {
    DailyAggregator::new(TopicClassifier::with_default_topics().unwrap())
}

/// `n` copies of a review text
pub fn reviews(text: &str, n: usize) -> Vec<Review> {
    (0..n).map(|_| Review::new(text)).collect()
}
