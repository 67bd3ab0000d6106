// Core data structures for playtrend

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-topic review counts for a single day
pub type DailyTopicCounts = BTreeMap<String, usize>;

/// Raw review texts collected per topic
pub type TopicMatches = BTreeMap<String, Vec<String>>;

/// A single app store review
///
/// Only `content` is read by the analytics pipeline; everything else is
/// carried through for the report writers.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Review {
    /// Free-text body. `None` marks a malformed record.
    #[serde(default)]
    pub content: Option<String>,
    /// Star rating (1-5)
    #[serde(default)]
    pub score: u8,
    pub review_date: Option<NaiveDate>,
    #[serde(default)]
    pub review_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub thumbs_up_count: u32,
}

impl Review {
    /// Create a review with only a text body
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Review text, empty when the record has none
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.review_date = Some(date);
        self
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.score = score;
        self
    }
}

/// Result of processing one day's batch of reviews
///
/// Serializes to `{date, review_count, topic_count, unique_topics, topics_dict}`
/// on success and `{date, error}` on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BatchOutcome {
    Processed {
        date: NaiveDate,
        review_count: usize,
        topic_count: usize,
        unique_topics: Vec<String>,
        topics_dict: TopicMatches,
    },
    Failed {
        date: NaiveDate,
        error: String,
    },
}

impl BatchOutcome {
    /// Date the batch was submitted for
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Processed { date, .. } | Self::Failed { date, .. } => *date,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Error description for failed batches
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error, .. } => Some(error),
            Self::Processed { .. } => None,
        }
    }

    /// Number of distinct topics found; `None` when the batch failed
    pub fn topic_count(&self) -> Option<usize> {
        match self {
            Self::Processed { topic_count, .. } => Some(*topic_count),
            Self::Failed { .. } => None,
        }
    }

    /// Number of reviews in the batch; `None` when the batch failed
    pub fn review_count(&self) -> Option<usize> {
        match self {
            Self::Processed { review_count, .. } => Some(*review_count),
            Self::Failed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_review_text_defaults_to_empty() {
        let review = Review::default();
        assert_eq!(review.text(), "");
        assert_eq!(Review::new("hello").text(), "hello");
    }

    #[test]
    fn test_review_deserialize_missing_content() {
        let review: Review = serde_json::from_str(r#"{"score": 3, "review_date": null}"#).unwrap();
        assert!(review.content.is_none());
        assert_eq!(review.score, 3);
    }

    #[test]
    fn test_failed_outcome_has_no_topic_count() {
        let outcome = BatchOutcome::Failed {
            date: date(),
            error: "bad record".to_string(),
        };
        assert!(outcome.is_error());
        assert_eq!(outcome.topic_count(), None);
        assert_eq!(outcome.error(), Some("bad record"));
    }

    #[test]
    fn test_outcome_serialization_shape() {
        let failed = BatchOutcome::Failed {
            date: date(),
            error: "oops".to_string(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["error"], "oops");

        let processed = BatchOutcome::Processed {
            date: date(),
            review_count: 2,
            topic_count: 0,
            unique_topics: vec![],
            topics_dict: TopicMatches::new(),
        };
        let json = serde_json::to_value(&processed).unwrap();
        assert_eq!(json["review_count"], 2);
        assert!(json.get("error").is_none());
    }
}
