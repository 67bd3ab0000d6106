//! Week-over-week trend statistics derived from a [`TrendMatrix`]
//!
//! This module provides functionality for:
//! - Splitting the matrix columns into "last week" and "previous week"
//! - Computing per-topic growth rates and new-topic flags
//! - Ranking topics by growth and by total mentions
//! - Summarising a report into headline figures
//!
//! All functions need at least [`WEEK_LEN`] columns; with fewer they return
//! empty results rather than failing.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::matrix::TrendMatrix;

/// Days per comparison window
pub const WEEK_LEN: usize = 7;

/// Default growth rate above which a topic counts as significantly growing
pub const DEFAULT_GROWTH_THRESHOLD: f64 = 0.3;

/// Column ranges used for week-over-week comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSplit {
    /// Most recent seven columns
    pub last_week: Range<usize>,

    /// Seven columns before `last_week`, or the first seven columns when the
    /// matrix has fewer than fourteen. In the seven-column case this is the
    /// same range as `last_week`.
    pub prev_week: Range<usize>,

    /// Every column before `last_week` (possibly empty)
    pub before_last_week: Range<usize>,
}

impl WeekSplit {
    /// Split a matrix with `width` columns; `None` below seven columns
    #[must_use]
    pub fn for_width(width: usize) -> Option<Self> {
        if width < WEEK_LEN {
            return None;
        }

        let last_start = width - WEEK_LEN;
        let prev_week = if width >= 2 * WEEK_LEN {
            last_start - WEEK_LEN..last_start
        } else {
            0..WEEK_LEN
        };

        Some(Self {
            last_week: last_start..width,
            prev_week,
            before_last_week: 0..last_start,
        })
    }

    #[must_use]
    pub fn of(matrix: &TrendMatrix) -> Option<Self> {
        Self::for_width(matrix.width())
    }
}

/// Relative change from `prev_avg` to `last_avg`
///
/// With no previous activity the last-week average itself is returned, so a
/// topic going from 0 to 5 has a growth rate of 5.0.
#[must_use]
pub fn growth_rate(last_avg: f64, prev_avg: f64) -> f64 {
    if prev_avg > 0.0 {
        (last_avg - prev_avg) / prev_avg
    } else if last_avg > 0.0 {
        last_avg
    } else {
        0.0
    }
}

/// Week-over-week statistics for one topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicTrend {
    pub topic: String,
    pub last_week_avg: f64,
    pub prev_week_avg: f64,
    pub growth_rate: f64,
    pub total_mentions: u64,
    pub is_new: bool,
}

impl TopicTrend {
    /// Growth rate formatted as a percentage, e.g. `"50.0%"`
    #[must_use]
    pub fn growth_percent(&self) -> String {
        format_percent(self.growth_rate)
    }

    #[must_use]
    pub fn is_significant(&self, threshold: f64) -> bool {
        self.growth_rate > threshold
    }
}

/// One row of the trending-topics ranking, rounded for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub topic: String,
    pub last_week_avg: f64,
    pub prev_week_avg: f64,
    pub growth_rate: f64,
    pub growth_percent: String,
    pub total_mentions: u64,
}

impl From<&TopicTrend> for TrendingTopic {
    fn from(trend: &TopicTrend) -> Self {
        Self {
            topic: trend.topic.clone(),
            last_week_avg: round_to(trend.last_week_avg, 2),
            prev_week_avg: round_to(trend.prev_week_avg, 2),
            growth_rate: round_to(trend.growth_rate, 2),
            growth_percent: trend.growth_percent(),
            total_mentions: trend.total_mentions,
        }
    }
}

/// Per-topic trend statistics in matrix row order
///
/// Empty when the matrix has fewer than seven columns.
#[must_use]
pub fn topic_trends(matrix: &TrendMatrix) -> Vec<TopicTrend> {
    let Some(split) = WeekSplit::of(matrix) else {
        return Vec::new();
    };

    matrix
        .rows()
        .map(|(topic, row)| {
            let last_week_sum: u64 = row[split.last_week.clone()].iter().sum();
            let last_week_avg = mean(&row[split.last_week.clone()]);
            let prev_week_avg = mean(&row[split.prev_week.clone()]);
            let earlier_sum: u64 = row[split.before_last_week.clone()].iter().sum();

            TopicTrend {
                topic: topic.to_string(),
                last_week_avg,
                prev_week_avg,
                growth_rate: growth_rate(last_week_avg, prev_week_avg),
                total_mentions: row.iter().sum(),
                is_new: last_week_sum > 0 && earlier_sum == 0,
            }
        })
        .collect()
}

/// Number of topics whose growth rate exceeds `threshold`
///
/// Topics silent in the previous week count too. Their growth rate is the
/// last-week average itself, so an absolute mention count is compared
/// against a ratio threshold: a topic averaging 0.5 mentions a day passes 0.3.
#[must_use]
pub fn count_significant_growth(matrix: &TrendMatrix, threshold: f64) -> usize {
    topic_trends(matrix)
        .iter()
        .filter(|trend| trend.is_significant(threshold))
        .count()
}

/// Topics with last-week mentions and none in any earlier column
#[must_use]
pub fn identify_new_topics(matrix: &TrendMatrix) -> Vec<String> {
    topic_trends(matrix)
        .into_iter()
        .filter(|trend| trend.is_new)
        .map(|trend| trend.topic)
        .collect()
}

/// Top `top_n` topics by growth rate, highest first
///
/// Ranking uses the rounded growth rate; ties keep matrix row order.
#[must_use]
pub fn top_trending(matrix: &TrendMatrix, top_n: usize) -> Vec<TrendingTopic> {
    let mut ranked: Vec<TrendingTopic> = topic_trends(matrix).iter().map(TrendingTopic::from).collect();

    ranked.sort_by(|a, b| {
        b.growth_rate
            .partial_cmp(&a.growth_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);
    ranked
}

/// A topic's total mentions over the whole matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicVolume {
    pub topic: String,
    pub total_mentions: u64,
    pub average_daily: f64,
}

/// Top `top_n` topics by total mentions, highest first
#[must_use]
pub fn top_topics(matrix: &TrendMatrix, top_n: usize) -> Vec<TopicVolume> {
    let width = matrix.width();
    let mut volumes: Vec<TopicVolume> = matrix
        .rows()
        .map(|(topic, row)| {
            let total_mentions: u64 = row.iter().sum();
            TopicVolume {
                topic: topic.to_string(),
                total_mentions,
                average_daily: if width == 0 {
                    0.0
                } else {
                    round_to(total_mentions as f64 / width as f64, 2)
                },
            }
        })
        .collect();

    volumes.sort_by(|a, b| b.total_mentions.cmp(&a.total_mentions));
    volumes.truncate(top_n);
    volumes
}

/// Headline figures for a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_topics: usize,
    pub total_mentions: u64,
    /// Mean of per-topic totals, rounded to two decimals
    pub average_mentions_per_topic: f64,
    pub most_frequent_topic: Option<String>,
    pub least_frequent_topic: Option<String>,
    pub significant_growth_topics: usize,
    pub new_topics: usize,
}

impl ReportSummary {
    /// Summarise a matrix using `growth_threshold` for significant growth
    #[must_use]
    pub fn from_matrix(matrix: &TrendMatrix, growth_threshold: f64) -> Self {
        let totals = matrix.row_totals();

        // first occurrence wins on ties
        let most = totals
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, u64)>, (i, &t)| match best {
                Some((_, b)) if b >= t => best,
                _ => Some((i, t)),
            });
        let least = totals
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, u64)>, (i, &t)| match best {
                Some((_, b)) if b <= t => best,
                _ => Some((i, t)),
            });

        let average = if totals.is_empty() {
            0.0
        } else {
            round_to(totals.iter().sum::<u64>() as f64 / totals.len() as f64, 2)
        };

        Self {
            total_topics: matrix.len(),
            total_mentions: matrix.total_mentions(),
            average_mentions_per_topic: average,
            most_frequent_topic: most.map(|(i, _)| matrix.topics()[i].clone()),
            least_frequent_topic: least.map(|(i, _)| matrix.topics()[i].clone()),
            significant_growth_topics: count_significant_growth(matrix, growth_threshold),
            new_topics: identify_new_topics(matrix).len(),
        }
    }
}

fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<u64>() as f64 / values.len() as f64
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

fn format_percent(rate: f64) -> String {
    format!("{:.1}%", round_to(rate * 100.0, 1))
}
