//! Pattern-based topic classification for review text
//!
//! This module provides functionality for:
//! - Compiling a topic → rules table into case-insensitive regexes
//! - Tagging a review with every topic whose rules match its text
//! - Collecting and counting matched reviews per topic

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::models::{DailyTopicCounts, Review, TopicMatches};

/// Errors that can occur while building a classifier
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Duplicate topic name: {0}")]
    DuplicateTopic(String),

    #[error("Topic '{0}' has no patterns")]
    EmptyTopic(String),

    #[error("Invalid pattern '{pattern}' for topic '{topic}': {source}")]
    InvalidPattern {
        topic: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("No topics defined")]
    NoTopics,
}

/// Result type for classifier construction
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Uncompiled topic definition, as found in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDefinition {
    /// Topic name (e.g. "Delivery issue")
    pub name: String,

    /// Regex rules, tested in order
    pub patterns: Vec<String>,
}

impl TopicDefinition {
    pub fn new<I, S>(name: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

/// A topic with its compiled matching rules
#[derive(Debug, Clone)]
pub struct TopicPattern {
    name: String,
    rules: Vec<Regex>,
}

impl TopicPattern {
    /// Compile a topic definition
    pub fn compile(definition: &TopicDefinition) -> ClassifierResult<Self> {
        if definition.patterns.is_empty() {
            return Err(ClassifierError::EmptyTopic(definition.name.clone()));
        }

        let rules = definition
            .patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ClassifierError::InvalidPattern {
                        topic: definition.name.clone(),
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect::<ClassifierResult<Vec<_>>>()?;

        Ok(Self {
            name: definition.name.clone(),
            rules,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Check whether any rule occurs in the (already lower-cased) text
    ///
    /// Rules are tried in definition order and evaluation stops at the first
    /// hit, so a topic is reported at most once per text.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(text))
    }
}

/// Classifies reviews into topics using an immutable pattern table
#[derive(Debug, Clone)]
pub struct TopicClassifier {
    topics: Vec<TopicPattern>,
}

impl TopicClassifier {
    /// Build a classifier from topic definitions
    ///
    /// # Errors
    /// Fails on an empty table, duplicate topic names, topics without
    /// patterns, or patterns that are not valid regular expressions.
    pub fn new(definitions: &[TopicDefinition]) -> ClassifierResult<Self> {
        if definitions.is_empty() {
            return Err(ClassifierError::NoTopics);
        }

        let mut seen = HashSet::new();
        let mut topics = Vec::with_capacity(definitions.len());

        for definition in definitions {
            if !seen.insert(definition.name.as_str()) {
                return Err(ClassifierError::DuplicateTopic(definition.name.clone()));
            }
            topics.push(TopicPattern::compile(definition)?);
        }

        Ok(Self { topics })
    }

    /// Classifier over the built-in topic table
    pub fn with_default_topics() -> ClassifierResult<Self> {
        Self::new(&default_topic_definitions())
    }

    /// Topic names in definition order
    #[must_use]
    pub fn topic_names(&self) -> Vec<&str> {
        self.topics.iter().map(TopicPattern::name).collect()
    }

    #[must_use]
    pub fn topics(&self) -> &[TopicPattern] {
        &self.topics
    }

    /// Topics matched by a single text, in definition order
    #[must_use]
    pub fn matched_topics(&self, text: &str) -> Vec<&str> {
        let lowered = text.to_lowercase();
        self.topics
            .iter()
            .filter(|topic| topic.matches(&lowered))
            .map(TopicPattern::name)
            .collect()
    }

    /// Collect the raw content of every review under each topic it matches
    ///
    /// A review can land under several topics but appears at most once per
    /// topic. Topics nothing matched are absent from the result.
    #[must_use]
    pub fn extract_topics(&self, reviews: &[Review]) -> TopicMatches {
        let mut matches = TopicMatches::new();

        for review in reviews {
            let content = review.text();
            for topic in self.matched_topics(content) {
                matches
                    .entry(topic.to_string())
                    .or_default()
                    .push(content.to_string());
            }
        }

        matches
    }

    /// Count collected reviews per topic
    #[must_use]
    pub fn count_topics(topics: &TopicMatches) -> DailyTopicCounts {
        topics
            .iter()
            .map(|(topic, texts)| (topic.clone(), texts.len()))
            .collect()
    }
}

/// Built-in topic table for food delivery app reviews
#[must_use]
pub fn default_topic_definitions() -> Vec<TopicDefinition> {
    vec![
        TopicDefinition::new(
            "Delivery issue",
            [
                r"delivery.*late",
                r"delivery.*delay",
                r"late.*delivery",
                r"delayed",
                r"not.*delivered",
                r"missed.*delivery",
            ],
        ),
        TopicDefinition::new(
            "Food stale",
            [
                r"food.*cold",
                r"cold.*food",
                r"stale",
                r"not.*fresh",
                r"spoiled",
                r"bad.*food",
            ],
        ),
        TopicDefinition::new(
            "Delivery partner rude",
            [
                r"rude",
                r"impolite",
                r"bad.*behavior",
                r"unprofessional",
                r"argu.*",
                r"disrespect",
            ],
        ),
        TopicDefinition::new(
            "App crashing",
            [
                r"app.*crash",
                r"crash.*app",
                r"freeze",
                r"not.*respond",
                r"hangs",
                r"bug.*app",
            ],
        ),
        TopicDefinition::new(
            "Payment issue",
            [
                r"payment.*fail",
                r"fail.*payment",
                r"transaction.*fail",
                r"money.*deducted",
                r"refund",
                r"payment.*problem",
            ],
        ),
        TopicDefinition::new(
            "Order cancellation",
            [
                r"order.*cancel",
                r"cancel.*order",
                r"cancelled",
                r"order.*not.*placed",
                r"auto.*cancel",
            ],
        ),
        TopicDefinition::new(
            "Food quality poor",
            [
                r"quality.*poor",
                r"bad.*quality",
                r"taste.*bad",
                r"not.*good",
                r"worst.*food",
                r"tasteless",
            ],
        ),
        TopicDefinition::new(
            "Wrong order delivered",
            [
                r"wrong.*order",
                r"incorrect.*order",
                r"not.*what.*ordered",
                r"mistake.*order",
                r"wrong.*item",
            ],
        ),
        TopicDefinition::new(
            "Long delivery time",
            [
                r"long.*time",
                r"takes.*hours",
                r"slow.*delivery",
                r"waiting.*long",
                r"delivery.*slow",
            ],
        ),
        TopicDefinition::new(
            "Customer support unresponsive",
            [
                r"support",
                r"customer.*service",
                r"no.*response",
                r"help",
                r"contact",
                r"assistance",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TopicClassifier {
        TopicClassifier::with_default_topics().unwrap()
    }

    #[test]
    fn test_delivery_delay_matches_delivery_issue() {
        let reviews = vec![Review::new("Delivery was 2 hours late")];
        let counts = TopicClassifier::count_topics(&classifier().extract_topics(&reviews));

        assert_eq!(counts.get("Delivery issue"), Some(&1));
        assert_eq!(counts.get("Food stale").copied().unwrap_or(0), 0);
    }

    #[test]
    fn test_case_insensitive_search() {
        let topics = classifier();
        assert_eq!(topics.matched_topics("APP CRASH on startup"), vec!["App crashing"]);
        assert_eq!(topics.matched_topics("My food was STALE"), vec!["Food stale"]);
    }

    #[test]
    fn test_multiple_rules_count_once() {
        // Hits "delivery.*late", "late.*delivery" and "delayed"
        let reviews = vec![Review::new("Delivery late again, late delivery, delayed")];
        let matches = classifier().extract_topics(&reviews);

        assert_eq!(matches["Delivery issue"].len(), 1);
    }

    #[test]
    fn test_review_can_match_multiple_topics() {
        let reviews = vec![Review::new("Food arrived cold and the driver was rude")];
        let matches = classifier().extract_topics(&reviews);

        assert!(matches.contains_key("Food stale"));
        assert!(matches.contains_key("Delivery partner rude"));
        assert_eq!(matches["Food stale"], vec!["Food arrived cold and the driver was rude"]);
    }

    #[test]
    fn test_unmatched_and_empty_reviews_contribute_nothing() {
        let reviews = vec![Review::new("Great service!"), Review::new(""), Review::default()];
        assert!(classifier().extract_topics(&reviews).is_empty());
    }

    #[test]
    fn test_raw_content_is_recorded() {
        let reviews = vec![Review::new("REFUND never arrived")];
        let matches = classifier().extract_topics(&reviews);
        assert_eq!(matches["Payment issue"], vec!["REFUND never arrived"]);
    }

    #[test]
    fn test_count_topics_equals_list_length() {
        let reviews = vec![
            Review::new("app crash"),
            Review::new("freeze after login"),
            Review::new("refund pending"),
        ];
        let matches = classifier().extract_topics(&reviews);
        let counts = TopicClassifier::count_topics(&matches);

        for (topic, texts) in &matches {
            assert_eq!(counts[topic], texts.len());
        }
        assert_eq!(counts["App crashing"], 2);
    }

    #[test]
    fn test_duplicate_topic_rejected() {
        let defs = vec![
            TopicDefinition::new("A", ["a"]),
            TopicDefinition::new("A", ["b"]),
        ];
        assert!(matches!(
            TopicClassifier::new(&defs),
            Err(ClassifierError::DuplicateTopic(name)) if name == "A"
        ));
    }

    #[test]
    fn test_empty_topic_rejected() {
        let defs = vec![TopicDefinition::new("A", Vec::<String>::new())];
        assert!(matches!(TopicClassifier::new(&defs), Err(ClassifierError::EmptyTopic(_))));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let defs = vec![TopicDefinition::new("A", ["(unclosed"])];
        assert!(matches!(
            TopicClassifier::new(&defs),
            Err(ClassifierError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_no_topics_rejected() {
        assert!(matches!(TopicClassifier::new(&[]), Err(ClassifierError::NoTopics)));
    }

    #[test]
    fn test_default_table_shape() {
        let topics = classifier();
        assert_eq!(topics.topic_names().len(), 10);
        assert_eq!(topics.topic_names()[0], "Delivery issue");
        assert!(topics.topics().iter().all(|t| t.rule_count() >= 1));
    }
}
