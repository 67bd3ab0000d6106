//! Unified error handling for the playtrend crate
//!
//! This module provides a unified error type that consolidates all domain-specific
//! errors into a single `Error` enum, while maintaining the ability to use
//! domain-specific errors when needed.
//!
//! # Architecture
//!
//! - [`PlaytrendErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! Per-day batch failures never reach this type in normal operation: the
//! aggregator turns them into `BatchOutcome::Failed` values.

use std::io;
use thiserror::Error;

pub use crate::analytics::aggregator::BatchError;
pub use crate::analytics::classifier::ClassifierError;

/// Common trait for all playtrend error types
pub trait PlaytrendErrorTrait: std::error::Error {
    /// Check if processing can continue past this error
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Topic table construction errors
    Classification,
    /// Malformed review input
    Input,
    /// Storage and I/O errors
    Storage,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Short label for log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Input => "input",
            Self::Storage => "storage",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

impl PlaytrendErrorTrait for ClassifierError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Classification
    }
}

impl PlaytrendErrorTrait for BatchError {
    fn is_recoverable(&self) -> bool {
        true
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Input
    }
}

/// Unified error type for the playtrend crate
#[derive(Error, Debug)]
pub enum Error {
    /// Topic table errors
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Malformed daily batch
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PlaytrendErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Classifier(e) => e.is_recoverable(),
            Self::Batch(e) => e.is_recoverable(),
            Self::Io(_) => true, // I/O errors are often transient
            Self::Json(_) | Self::Csv(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Classifier(e) => e.category(),
            Self::Batch(e) => e.category(),
            Self::Io(_) | Self::Json(_) | Self::Csv(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
