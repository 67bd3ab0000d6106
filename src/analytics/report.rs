//! Trend report construction over a rolling lookback window
//!
//! [`TrendReportBuilder`] turns the aggregator's day → counts map into a dense
//! [`TrendMatrix`] covering `lookback_days + 1` consecutive dates ending at the
//! target date. When nothing has been aggregated yet it produces a seeded
//! synthetic matrix instead, flagged with [`ReportOrigin::Synthetic`].

use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use super::aggregator::DailyAggregator;
use super::matrix::TrendMatrix;
use crate::config::{AnalysisConfig, DEFAULT_SEED_TOPICS};
use crate::error::{Error, Result};

/// Number of seed topics used by the synthetic report
pub const SAMPLE_TOPIC_COUNT: usize = 15;

/// Longest lookback a report window may span
pub const MAX_LOOKBACK_DAYS: u32 = 3650;

/// First date of the window that ends at `target_date`
///
/// Fails when `lookback_days` exceeds [`MAX_LOOKBACK_DAYS`] or the start
/// falls before the earliest representable date.
pub fn window_start(target_date: NaiveDate, lookback_days: u32) -> Result<NaiveDate> {
    if lookback_days > MAX_LOOKBACK_DAYS {
        return Err(Error::config(format!(
            "lookback_days must be at most {MAX_LOOKBACK_DAYS}, got {lookback_days}"
        )));
    }

    target_date
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .ok_or_else(|| {
            Error::config(format!(
                "lookback of {lookback_days} days before {target_date} is out of range"
            ))
        })
}

/// Where a report's numbers came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportOrigin {
    /// Built from aggregated reviews
    Observed,
    /// Demonstration data from the seeded generator
    Synthetic,
}

/// A trend matrix together with its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendReport {
    pub target_date: NaiveDate,
    pub origin: ReportOrigin,
    pub matrix: TrendMatrix,
}

impl TrendReport {
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.origin == ReportOrigin::Synthetic
    }
}

/// Source of randomness for the synthetic report
pub trait SampleSource {
    /// Uniform integer in `[low, high)`
    fn randint(&mut self, low: i64, high: i64) -> i64;

    /// Draw from a normal distribution
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64;

    /// `k` distinct indices from `0..n`
    fn choose_distinct(&mut self, n: usize, k: usize) -> Vec<usize>;
}

/// ChaCha8-backed [`SampleSource`]; identical seeds give identical draws
#[derive(Debug, Clone)]
pub struct SeededSampleSource {
    rng: ChaCha8Rng,
}

impl SeededSampleSource {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl SampleSource for SeededSampleSource {
    fn randint(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        use rand::distributions::Distribution;

        match Normal::new(mean, std_dev) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => mean,
        }
    }

    fn choose_distinct(&mut self, n: usize, k: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, n, k.min(n)).into_vec()
    }
}

/// Builds trend matrices from aggregated daily counts
#[derive(Debug, Clone)]
pub struct TrendReportBuilder {
    lookback_days: u32,
    min_topic_frequency: u64,
    sample_topics: Vec<String>,
    sample_seed: u64,
}

impl Default for TrendReportBuilder {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default(), DEFAULT_SEED_TOPICS)
    }
}

impl TrendReportBuilder {
    /// Create a builder
    ///
    /// # Arguments
    /// * `lookback_days` - Days before the target date to include, capped at [`MAX_LOOKBACK_DAYS`]
    /// * `min_topic_frequency` - Minimum window total for a topic row to be kept
    #[must_use]
    pub fn new(lookback_days: u32, min_topic_frequency: u64) -> Self {
        Self {
            lookback_days: lookback_days.min(MAX_LOOKBACK_DAYS),
            min_topic_frequency,
            sample_topics: DEFAULT_SEED_TOPICS
                .iter()
                .take(SAMPLE_TOPIC_COUNT)
                .map(ToString::to_string)
                .collect(),
            sample_seed: 42,
        }
    }

    /// Create a builder from analysis settings and the seed topic list
    #[must_use]
    pub fn from_config<S: AsRef<str>>(config: &AnalysisConfig, seed_topics: &[S]) -> Self {
        Self::new(config.lookback_days, config.min_topic_frequency)
            .with_sample_topics(seed_topics.iter().map(|t| t.as_ref().to_string()))
            .with_sample_seed(config.sample_seed)
    }

    /// Topics for the synthetic report; only the first 15 are used
    #[must_use]
    pub fn with_sample_topics<I>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.sample_topics = topics.into_iter().take(SAMPLE_TOPIC_COUNT).collect();
        self
    }

    #[must_use]
    pub fn with_sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = seed;
        self
    }

    #[must_use]
    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    #[must_use]
    pub fn min_topic_frequency(&self) -> u64 {
        self.min_topic_frequency
    }

    /// Inclusive date window `[target - lookback_days, target]`, oldest first
    ///
    /// Dates before the earliest representable date are left out.
    #[must_use]
    pub fn window(&self, target_date: NaiveDate) -> Vec<NaiveDate> {
        (0..=u64::from(self.lookback_days))
            .rev()
            .filter_map(|offset| target_date.checked_sub_days(Days::new(offset)))
            .collect()
    }

    /// Build the trend report for `target_date`
    ///
    /// Rows are every topic the aggregator has ever stored, sorted by name,
    /// with cells read from the window dates only. Rows whose window total is
    /// below the minimum frequency are dropped. An aggregator with no data
    /// yields the synthetic sample report.
    pub fn generate_trend_report(&self, aggregator: &DailyAggregator, target_date: NaiveDate) -> TrendReport {
        if aggregator.is_empty() {
            tracing::warn!(
                target_date = %target_date,
                "No daily data available, generating synthetic sample report"
            );
            return self.generate_sample_report(target_date);
        }

        let columns = self.window(target_date);
        let topics: Vec<String> = aggregator.all_topics().into_iter().map(str::to_string).collect();
        let cells = topics
            .iter()
            .map(|topic| columns.iter().map(|&date| aggregator.count(date, topic)).collect())
            .collect();

        let total_topics = topics.len();
        let matrix =
            TrendMatrix::from_dense(columns, topics, cells).filter_min_total(self.min_topic_frequency);

        tracing::info!(
            target_date = %target_date,
            days = matrix.width(),
            topics = matrix.len(),
            dropped = total_topics - matrix.len(),
            "Generated trend report"
        );

        TrendReport {
            target_date,
            origin: ReportOrigin::Observed,
            matrix,
        }
    }

    /// Synthetic report from the builder's seed
    #[must_use]
    pub fn generate_sample_report(&self, target_date: NaiveDate) -> TrendReport {
        let mut source = SeededSampleSource::new(self.sample_seed);
        self.generate_sample_report_with(target_date, &mut source)
    }

    /// Synthetic report drawing from an explicit [`SampleSource`]
    ///
    /// Topics keep their seed order and cycle through three shapes by
    /// index: rising, falling, and flat with three spikes.
    pub fn generate_sample_report_with(
        &self,
        target_date: NaiveDate,
        source: &mut dyn SampleSource,
    ) -> TrendReport {
        let columns = self.window(target_date);
        let n = columns.len();

        let cells = (0..self.sample_topics.len())
            .map(|i| {
                let (trend, noise_std) = match i % 3 {
                    0 => {
                        let base = source.randint(1, 5) as f64;
                        (linspace(base, base + 20.0, n), 3.0)
                    }
                    1 => {
                        let base = source.randint(15, 25) as f64;
                        (linspace(base, (base - 15.0).max(1.0), n), 3.0)
                    }
                    _ => {
                        let base = source.randint(5, 15) as f64;
                        let mut trend = vec![base; n];
                        for day in source.choose_distinct(n, 3) {
                            trend[day] += source.randint(5, 15) as f64;
                        }
                        (trend, 2.0)
                    }
                };

                trend
                    .into_iter()
                    .map(|value| {
                        let noisy = value + source.normal(0.0, noise_std);
                        noisy.max(0.0).round_ties_even() as u64
                    })
                    .collect()
            })
            .collect();

        TrendReport {
            target_date,
            origin: ReportOrigin::Synthetic,
            matrix: TrendMatrix::from_dense(columns, self.sample_topics.clone(), cells),
        }
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::classifier::TopicClassifier;
    use crate::error::{ErrorCategory, PlaytrendErrorTrait};
    use crate::models::Review;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn aggregator() -> DailyAggregator {
        DailyAggregator::new(TopicClassifier::with_default_topics().unwrap())
    }

    /// Scripted source: fixed integers, zero noise, first-k spike days
    struct FixedSource;

    impl SampleSource for FixedSource {
        fn randint(&mut self, low: i64, _high: i64) -> i64 {
            low
        }

        fn normal(&mut self, mean: f64, _std_dev: f64) -> f64 {
            mean
        }

        fn choose_distinct(&mut self, n: usize, k: usize) -> Vec<usize> {
            (0..k.min(n)).collect()
        }
    }

    #[test]
    fn test_window_is_inclusive_and_chronological() {
        let builder = TrendReportBuilder::new(3, 2);
        assert_eq!(builder.window(date(10)), vec![date(7), date(8), date(9), date(10)]);
        assert_eq!(TrendReportBuilder::new(0, 2).window(date(10)), vec![date(10)]);
    }

    #[test]
    fn test_window_start_bounds() {
        assert_eq!(window_start(date(10), 3).unwrap(), date(7));

        let err = window_start(date(10), MAX_LOOKBACK_DAYS + 1).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Config);

        let earliest = NaiveDate::MIN.checked_add_days(Days::new(2)).unwrap();
        assert!(window_start(earliest, 3).is_err());
        assert_eq!(window_start(earliest, 2).unwrap(), NaiveDate::MIN);
    }

    #[test]
    fn test_oversized_lookback_is_capped() {
        let builder = TrendReportBuilder::new(100_000_000, 0);
        assert_eq!(builder.lookback_days(), MAX_LOOKBACK_DAYS);

        let mut agg = aggregator();
        agg.process_daily_batch(&[Review::new("refund")], date(10));
        let report = builder.generate_trend_report(&agg, date(10));
        assert_eq!(report.matrix.width(), MAX_LOOKBACK_DAYS as usize + 1);
    }

    #[test]
    fn test_window_stops_at_earliest_date() {
        let earliest = NaiveDate::MIN.checked_add_days(Days::new(2)).unwrap();
        let window = TrendReportBuilder::new(5, 0).window(earliest);
        assert_eq!(window.len(), 3);
        assert_eq!(window[0], NaiveDate::MIN);
        assert_eq!(window[2], earliest);
    }

    #[test]
    fn test_columns_cover_window_without_data() {
        let mut agg = aggregator();
        agg.process_daily_batch(&[Review::new("refund"), Review::new("refund again")], date(9));

        let report = TrendReportBuilder::new(5, 2).generate_trend_report(&agg, date(10));
        assert_eq!(report.origin, ReportOrigin::Observed);
        assert_eq!(report.matrix.columns(), TrendReportBuilder::new(5, 2).window(date(10)).as_slice());
        assert_eq!(report.matrix.row("Payment issue"), Some(&[0, 0, 0, 0, 2, 0][..]));
    }

    #[test]
    fn test_rows_below_threshold_are_dropped() {
        let mut agg = aggregator();
        agg.process_daily_batch(&[Review::new("app crash"), Review::new("refund")], date(9));
        agg.process_daily_batch(&[Review::new("refund")], date(10));

        let report = TrendReportBuilder::new(3, 2).generate_trend_report(&agg, date(10));
        assert_eq!(report.matrix.topics(), &["Payment issue".to_string()]);
        assert!(report.matrix.row("App crashing").is_none());
    }

    #[test]
    fn test_topics_outside_window_still_considered() {
        let mut agg = aggregator();
        agg.process_daily_batch(&[Review::new("stale"), Review::new("stale")], date(1));
        agg.process_daily_batch(&[Review::new("app crash"), Review::new("freeze")], date(10));

        // Food stale is known but all of its mentions fall outside the window
        let report = TrendReportBuilder::new(2, 0).generate_trend_report(&agg, date(10));
        assert_eq!(
            report.matrix.topics(),
            &["App crashing".to_string(), "Food stale".to_string()]
        );
        assert_eq!(report.matrix.row("Food stale"), Some(&[0, 0, 0][..]));

        let filtered = TrendReportBuilder::new(2, 2).generate_trend_report(&agg, date(10));
        assert!(filtered.matrix.row("Food stale").is_none());
    }

    #[test]
    fn test_empty_aggregator_falls_back_to_sample() {
        let builder = TrendReportBuilder::new(30, 2);
        let first = builder.generate_trend_report(&aggregator(), date(30));
        let second = builder.generate_trend_report(&aggregator(), date(30));

        assert!(first.is_synthetic());
        assert_eq!(first, second);
        assert_eq!(first.matrix.len(), SAMPLE_TOPIC_COUNT);
        assert_eq!(first.matrix.width(), 31);
        assert_eq!(first.matrix.topics()[0], "Delivery issue");
    }

    #[test]
    fn test_sample_shapes_with_fixed_source() {
        let builder = TrendReportBuilder::new(4, 2)
            .with_sample_topics(["Rising", "Falling", "Flat"].map(String::from));
        let report = builder.generate_sample_report_with(date(10), &mut FixedSource);
        let m = &report.matrix;

        // base 1 → 21 over 5 days
        assert_eq!(m.row("Rising"), Some(&[1, 6, 11, 16, 21][..]));
        // base 15 → max(1, 0) over 5 days: 15, 11.5, 8, 4.5, 1
        assert_eq!(m.row("Falling"), Some(&[15, 12, 8, 4, 1][..]));
        // base 5 with +5 spikes on the first three days
        assert_eq!(m.row("Flat"), Some(&[10, 10, 10, 5, 5][..]));
    }

    #[test]
    fn test_different_seed_changes_sample() {
        let a = TrendReportBuilder::new(30, 2).generate_sample_report(date(30));
        let b = TrendReportBuilder::new(30, 2)
            .with_sample_seed(7)
            .generate_sample_report(date(30));
        assert_ne!(a.matrix, b.matrix);
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 4.0, 5), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
