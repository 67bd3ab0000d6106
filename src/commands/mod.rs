pub mod analyze;
pub mod sample;
pub mod summary;
pub mod topics;

// Re-export command functions for convenience
pub use analyze::{analyze, AnalyzeParams};
pub use sample::sample;
pub use topics::topics;
