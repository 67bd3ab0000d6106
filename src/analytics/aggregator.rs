//! Day-by-day accumulation of topic counts
//!
//! A [`DailyAggregator`] lives for one analysis run. Each call to
//! [`DailyAggregator::process_daily_batch`] classifies one day's reviews and
//! stores the per-topic counts under that date, replacing whatever was stored
//! for the date before. Failures are reported through [`BatchOutcome`] and
//! never leak into other days.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use super::classifier::TopicClassifier;
use crate::models::{BatchOutcome, DailyTopicCounts, Review};

/// Errors raised while processing a single day's batch
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("review #{index} ({review_id}) has no content")]
    MissingContent { index: usize, review_id: String },
}

/// Accumulates per-day topic counts across an analysis run
#[derive(Debug, Clone)]
pub struct DailyAggregator {
    classifier: TopicClassifier,
    daily_counts: BTreeMap<NaiveDate, DailyTopicCounts>,
}

impl DailyAggregator {
    #[must_use]
    pub fn new(classifier: TopicClassifier) -> Self {
        Self {
            classifier,
            daily_counts: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn classifier(&self) -> &TopicClassifier {
        &self.classifier
    }

    /// Classify and store one day's reviews
    ///
    /// # Arguments
    /// * `reviews` - Reviews submitted on `date`
    /// * `date` - Batch date; any counts already stored for it are replaced
    ///
    /// # Returns
    /// `BatchOutcome::Processed` with the day's topics, or
    /// `BatchOutcome::Failed` if the batch was malformed. A failed batch
    /// leaves the stored counts untouched.
    pub fn process_daily_batch(&mut self, reviews: &[Review], date: NaiveDate) -> BatchOutcome {
        match self.try_process(reviews, date) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(date = %date, error = %e, "Failed to process daily batch");
                BatchOutcome::Failed {
                    date,
                    error: e.to_string(),
                }
            }
        }
    }

    fn try_process(&mut self, reviews: &[Review], date: NaiveDate) -> Result<BatchOutcome, BatchError> {
        validate_batch(reviews)?;

        let topics_dict = self.classifier.extract_topics(reviews);
        let counts = TopicClassifier::count_topics(&topics_dict);
        let unique_topics: Vec<String> = counts.keys().cloned().collect();

        tracing::debug!(
            date = %date,
            reviews = reviews.len(),
            topics = unique_topics.len(),
            "Processed daily batch"
        );

        if self.daily_counts.insert(date, counts).is_some() {
            tracing::debug!(date = %date, "Replaced previously stored counts");
        }

        Ok(BatchOutcome::Processed {
            date,
            review_count: reviews.len(),
            topic_count: topics_dict.len(),
            unique_topics,
            topics_dict,
        })
    }

    /// All stored counts, keyed by date
    #[must_use]
    pub fn daily_counts(&self) -> &BTreeMap<NaiveDate, DailyTopicCounts> {
        &self.daily_counts
    }

    #[must_use]
    pub fn counts_for(&self, date: NaiveDate) -> Option<&DailyTopicCounts> {
        self.daily_counts.get(&date)
    }

    /// Count for one topic on one date, zero when absent
    #[must_use]
    pub fn count(&self, date: NaiveDate, topic: &str) -> u64 {
        self.daily_counts
            .get(&date)
            .and_then(|counts| counts.get(topic))
            .map_or(0, |&count| count as u64)
    }

    /// Every topic seen on any stored day, sorted
    #[must_use]
    pub fn all_topics(&self) -> BTreeSet<&str> {
        self.daily_counts
            .values()
            .flat_map(|counts| counts.keys().map(String::as_str))
            .collect()
    }

    #[must_use]
    pub fn days_processed(&self) -> usize {
        self.daily_counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.daily_counts.is_empty()
    }

    /// Drop all stored counts
    pub fn clear(&mut self) {
        self.daily_counts.clear();
    }
}

fn validate_batch(reviews: &[Review]) -> Result<(), BatchError> {
    match reviews.iter().position(|review| review.content.is_none()) {
        Some(index) => Err(BatchError::MissingContent {
            index,
            review_id: reviews[index].review_id.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregator() -> DailyAggregator {
        DailyAggregator::new(TopicClassifier::with_default_topics().unwrap())
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_process_daily_batch_result() {
        let mut agg = aggregator();
        let reviews = vec![
            Review::new("Delivery was 2 hours late"),
            Review::new("App crash on checkout"),
            Review::new("Lovely food"),
        ];

        let outcome = agg.process_daily_batch(&reviews, day(1));
        match outcome {
            BatchOutcome::Processed {
                date,
                review_count,
                topic_count,
                unique_topics,
                topics_dict,
            } => {
                assert_eq!(date, day(1));
                assert_eq!(review_count, 3);
                assert_eq!(topic_count, 2);
                assert_eq!(unique_topics, vec!["App crashing", "Delivery issue"]);
                assert_eq!(topics_dict["Delivery issue"], vec!["Delivery was 2 hours late"]);
            }
            BatchOutcome::Failed { error, .. } => panic!("unexpected failure: {error}"),
        }
        assert_eq!(agg.count(day(1), "Delivery issue"), 1);
    }

    #[test]
    fn test_reprocessing_replaces_counts() {
        let mut agg = aggregator();
        agg.process_daily_batch(&[Review::new("app crash"), Review::new("refund")], day(1));
        agg.process_daily_batch(&[Review::new("stale bread")], day(1));

        let counts = agg.counts_for(day(1)).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["Food stale"], 1);
        assert_eq!(agg.count(day(1), "App crashing"), 0);
    }

    #[test]
    fn test_days_are_independent() {
        let mut agg = aggregator();
        agg.process_daily_batch(&[Review::new("app crash")], day(1));
        agg.process_daily_batch(&[Review::new("refund")], day(2));

        assert_eq!(agg.count(day(1), "App crashing"), 1);
        assert_eq!(agg.count(day(2), "Payment issue"), 1);
        assert_eq!(agg.count(day(1), "Payment issue"), 0);
        assert_eq!(agg.days_processed(), 2);
    }

    #[test]
    fn test_malformed_batch_returns_error_outcome() {
        let mut agg = aggregator();
        agg.process_daily_batch(&[Review::new("refund")], day(3));

        let mut broken = Review::default();
        broken.review_id = "review_0001".to_string();
        let outcome = agg.process_daily_batch(&[Review::new("app crash"), broken], day(3));

        assert!(outcome.is_error());
        assert_eq!(outcome.date(), day(3));
        assert!(outcome.error().unwrap().contains("review_0001"));
        // previous counts for the date survive a failed batch
        assert_eq!(agg.count(day(3), "Payment issue"), 1);
    }

    #[test]
    fn test_empty_batch_stores_empty_counts() {
        let mut agg = aggregator();
        let outcome = agg.process_daily_batch(&[], day(4));

        assert_eq!(outcome.topic_count(), Some(0));
        assert!(!agg.is_empty());
        assert!(agg.counts_for(day(4)).unwrap().is_empty());
    }

    #[test]
    fn test_all_topics_union() {
        let mut agg = aggregator();
        agg.process_daily_batch(&[Review::new("refund")], day(1));
        agg.process_daily_batch(&[Review::new("app crash"), Review::new("refund")], day(2));

        let topics: Vec<_> = agg.all_topics().into_iter().collect();
        assert_eq!(topics, vec!["App crashing", "Payment issue"]);

        agg.clear();
        assert!(agg.is_empty());
    }
}
