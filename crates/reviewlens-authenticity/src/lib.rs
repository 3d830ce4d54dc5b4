//! Authenticity partition: trusted vs. suspicious-high vs. suspicious-low.
//!
//! Reviews are sorted by rating, the top and bottom percentile slices are
//! carved out, and only extreme ratings inside those slices are sent to the
//! judge for fraud-signal analysis. Everything else is trusted by default.

pub mod analyzer;
pub mod partition;
pub mod types;

pub use analyzer::SuspicionAnalyzer;
pub use partition::{slice_count, AuthenticityPartitioner};
pub use types::*;
