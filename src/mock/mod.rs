//! Mock review generation
//!
//! Produces template-based food delivery reviews so the pipeline can run
//! without a live review source. Generation is driven by a seeded ChaCha8
//! RNG, so the same seed and dates give the same reviews.

use chrono::{Datelike, NaiveDate};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::models::Review;

const TEMPLATES: &[&str] = &[
    // Delivery
    "Delivery was {time} late. Very disappointed!",
    "Food arrived {condition}. Won't order again.",
    "Delivery partner was {behavior}.",
    "Order tracking not working properly.",
    // Food
    "Food was {quality}. Not worth the price.",
    "Received wrong order. {wrong_item} instead.",
    "Food packaging was damaged.",
    "Some items were missing from my order.",
    // App
    "App keeps crashing when I try to {action}.",
    "Payment {payment_issue} but money deducted.",
    "Cannot login to my account.",
    "App is very slow and buggy.",
    // Positive
    "Great service! Food arrived hot and fresh.",
    "Quick delivery and polite delivery partner.",
    "App works perfectly. Very user friendly.",
    "Excellent customer support.",
    // Suggestions
    "Please add {feature}.",
    "Should have {improvement}.",
    "Need better {aspect}.",
];

const FILLERS: &[(&str, &[&str])] = &[
    ("time", &["1 hour", "2 hours", "30 minutes", "45 minutes"]),
    ("condition", &["cold", "stale", "spoiled", "room temperature"]),
    ("behavior", &["rude", "impolite", "unprofessional"]),
    ("quality", &["poor", "bad", "terrible", "awful"]),
    ("wrong_item", &["veg burger", "chicken pizza", "wrong curry"]),
    ("action", &["place order", "make payment", "track order"]),
    ("payment_issue", &["failed", "showed error"]),
    ("feature", &["dark mode", "group ordering", "schedule delivery"]),
    ("improvement", &["order tracking", "search function", "filters"]),
    ("aspect", &["customer support", "delivery tracking", "UI"]),
];

const POSITIVE_WORDS: &[&str] = &["good", "great", "excellent", "perfect"];
const NEGATIVE_WORDS: &[&str] = &["bad", "poor", "terrible", "worst"];

/// Issue that dominates a day's reviews
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingIssue {
    Delivery,
    App,
    Food,
    Payment,
}

impl TrendingIssue {
    const ALL: [Self; 4] = [Self::Delivery, Self::App, Self::Food, Self::Payment];

    /// Text prepended to affected reviews
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Delivery => "Delivery issues today!",
            Self::App => "App problems today!",
            Self::Food => "Food quality issues today!",
            Self::Payment => "Payment issues today!",
        }
    }
}

/// Seeded generator of mock reviews
#[derive(Debug, Clone)]
pub struct MockReviewGenerator {
    rng: ChaCha8Rng,
    /// Probability that a day has a trending issue
    trending_day_rate: f64,
    /// Share of reviews that mention the trending issue
    trending_review_rate: f64,
}

impl MockReviewGenerator {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            trending_day_rate: 0.2,
            trending_review_rate: 0.3,
        }
    }

    /// Seeded from OS entropy
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Generate roughly `count` reviews for `date`
    ///
    /// Weekends get 30% more volume and every day varies by ±20%.
    pub fn generate_daily_reviews(&mut self, date: NaiveDate, count: usize) -> Vec<Review> {
        let day_factor = if date.weekday().number_from_monday() >= 6 {
            1.3
        } else {
            1.0
        };
        let jitter: f64 = self.rng.gen_range(0.8..1.2);
        let actual_count = (count as f64 * day_factor * jitter) as usize;

        let trending = if self.rng.gen_bool(self.trending_day_rate) {
            TrendingIssue::ALL.choose(&mut self.rng).copied()
        } else {
            None
        };

        (0..actual_count)
            .map(|i| self.generate_review(date, i, trending))
            .collect()
    }

    fn generate_review(&mut self, date: NaiveDate, index: usize, trending: Option<TrendingIssue>) -> Review {
        let template = TEMPLATES.choose(&mut self.rng).copied().unwrap_or_default();
        let mut content = self.fill_template(template);

        let score = self.score_for(&content);

        if let Some(issue) = trending {
            if self.rng.gen_bool(self.trending_review_rate) {
                content = format!("{} {content}", issue.prefix());
            }
        }

        Review {
            content: Some(content),
            score,
            review_date: Some(date),
            review_id: format!("review_{}_{index:04}", date.format("%Y%m%d")),
            user_name: format!("User_{}", self.rng.gen_range(1000..=9999)),
            thumbs_up_count: self.rng.gen_range(0..=50),
        }
    }

    fn fill_template(&mut self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, values) in FILLERS {
            let placeholder = format!("{{{key}}}");
            if result.contains(&placeholder) {
                let value = values.choose(&mut self.rng).copied().unwrap_or_default();
                result = result.replace(&placeholder, value);
            }
        }
        result
    }

    fn score_for(&mut self, content: &str) -> u8 {
        let lowered = content.to_lowercase();
        if POSITIVE_WORDS.iter().any(|w| lowered.contains(w)) {
            self.rng.gen_range(4..=5)
        } else if NEGATIVE_WORDS.iter().any(|w| lowered.contains(w)) {
            self.rng.gen_range(1..=2)
        } else {
            self.rng.gen_range(3..=4)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn test_same_seed_same_reviews() {
        let a = MockReviewGenerator::new(9).generate_daily_reviews(monday(), 50);
        let b = MockReviewGenerator::new(9).generate_daily_reviews(monday(), 50);
        assert_eq!(a, b);
    }

    #[test]
    fn test_weekday_volume_bounds() {
        let mut generator = MockReviewGenerator::new(1);
        for _ in 0..20 {
            let n = generator.generate_daily_reviews(monday(), 50).len();
            assert!((40..60).contains(&n), "unexpected volume {n}");
        }
    }

    #[test]
    fn test_reviews_are_filled_and_tagged() {
        let date = monday();
        let reviews = MockReviewGenerator::new(3).generate_daily_reviews(date, 30);

        for (i, review) in reviews.iter().enumerate() {
            assert!(!review.text().contains('{'));
            assert_eq!(review.review_date, Some(date));
            assert_eq!(review.review_id, format!("review_20240701_{i:04}"));
            assert!((1..=5).contains(&review.score));
            assert!(review.thumbs_up_count <= 50);
        }
    }
}
