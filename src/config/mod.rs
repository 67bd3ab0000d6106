//! Configuration management for playtrend
//!
//! This module handles loading and validating configuration from environment variables,
//! TOML files, and command-line overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analytics::classifier::{default_topic_definitions, TopicClassifier, TopicDefinition};
use crate::analytics::metrics::DEFAULT_GROWTH_THRESHOLD;
use crate::analytics::report::MAX_LOOKBACK_DAYS;

/// Seed topics tracked by the analyzer; the synthetic report uses the first 15
pub const DEFAULT_SEED_TOPICS: &[&str] = &[
    "Delivery issue",
    "Food stale",
    "Delivery partner rude",
    "App crashing",
    "Payment issue",
    "Order cancellation",
    "Refund problem",
    "Food quality poor",
    "Wrong order delivered",
    "Long delivery time",
    "Customer support unresponsive",
    "Order tracking not accurate",
    "Food packaging damaged",
    "Missing items in order",
    "Coupon not working",
    "App login problem",
    "Too many notifications",
    "Delivery charges high",
    "Restaurant not available",
];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application under analysis
    pub app: AppConfig,

    /// Aggregation and trend settings
    pub analysis: AnalysisConfig,

    /// Seed topic names
    #[serde(default = "default_seed_topics")]
    pub seed_topics: Vec<String>,

    /// Topic pattern table; the built-in table is used when empty
    #[serde(default)]
    pub topics: Vec<TopicDefinition>,

    /// Report output
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Application identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Store package id
    pub app_id: String,

    /// Store country code
    pub country: String,

    /// Review language
    pub language: String,
}

/// Aggregation and trend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Days before the target date covered by a report
    pub lookback_days: u32,

    /// Upper bound on generated reviews per day
    pub max_reviews_per_day: usize,

    /// Minimum total mentions for a topic to appear in a report
    pub min_topic_frequency: u64,

    /// Growth rate above which a topic is significantly growing
    pub growth_threshold: f64,

    /// Number of topics in trending rankings
    pub top_n: usize,

    /// Seed for the synthetic sample report
    pub sample_seed: u64,
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for generated report files
    pub reports_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            max_reviews_per_day: 50,
            min_topic_frequency: 2,
            growth_threshold: DEFAULT_GROWTH_THRESHOLD,
            top_n: 10,
            sample_seed: 42,
        }
    }
}

fn default_seed_topics() -> Vec<String> {
    DEFAULT_SEED_TOPICS.iter().map(ToString::to_string).collect()
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let app_id = std::env::var("PLAYTREND_APP_ID").unwrap_or(defaults.app.app_id);
        let country = std::env::var("PLAYTREND_COUNTRY").unwrap_or(defaults.app.country);
        let language = std::env::var("PLAYTREND_LANGUAGE").unwrap_or(defaults.app.language);

        let analysis = AnalysisConfig {
            lookback_days: env_or("PLAYTREND_LOOKBACK_DAYS", defaults.analysis.lookback_days),
            max_reviews_per_day: env_or(
                "PLAYTREND_MAX_REVIEWS_PER_DAY",
                defaults.analysis.max_reviews_per_day,
            ),
            min_topic_frequency: env_or(
                "PLAYTREND_MIN_TOPIC_FREQUENCY",
                defaults.analysis.min_topic_frequency,
            ),
            growth_threshold: env_or("PLAYTREND_GROWTH_THRESHOLD", defaults.analysis.growth_threshold),
            top_n: env_or("PLAYTREND_TOP_N", defaults.analysis.top_n),
            sample_seed: env_or("PLAYTREND_SAMPLE_SEED", defaults.analysis.sample_seed),
        };

        let reports_dir = std::env::var("PLAYTREND_REPORTS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output.reports_dir);

        let log_level = std::env::var("PLAYTREND_LOG_LEVEL").unwrap_or(defaults.logging.level);
        let log_format = std::env::var("PLAYTREND_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            app: AppConfig {
                app_id,
                country,
                language,
            },
            analysis,
            seed_topics: defaults.seed_topics,
            topics: defaults.topics,
            output: OutputConfig { reports_dir },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.analysis.lookback_days > MAX_LOOKBACK_DAYS {
            anyhow::bail!(
                "lookback_days must be at most {MAX_LOOKBACK_DAYS}, got {}",
                self.analysis.lookback_days
            );
        }

        if self.analysis.max_reviews_per_day == 0 {
            anyhow::bail!("max_reviews_per_day must be greater than 0");
        }

        if !self.analysis.growth_threshold.is_finite() {
            anyhow::bail!("growth_threshold must be a finite number");
        }

        if self.analysis.top_n == 0 {
            anyhow::bail!("top_n must be greater than 0");
        }

        if self.seed_topics.is_empty() {
            anyhow::bail!("seed_topics must not be empty");
        }

        self.classifier().context("Invalid topic table")?;

        Ok(())
    }

    /// Topic definitions in effect: configured ones, or the built-in table
    #[must_use]
    pub fn topic_definitions(&self) -> Vec<TopicDefinition> {
        if self.topics.is_empty() {
            default_topic_definitions()
        } else {
            self.topics.clone()
        }
    }

    /// Compile the topic table
    pub fn classifier(&self) -> Result<TopicClassifier> {
        Ok(TopicClassifier::new(&self.topic_definitions())?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig {
                app_id: String::from("in.swiggy.android"),
                country: String::from("in"),
                language: String::from("en"),
            },
            analysis: AnalysisConfig::default(),
            seed_topics: default_seed_topics(),
            topics: Vec::new(),
            output: OutputConfig {
                reports_dir: PathBuf::from("./output/reports"),
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
