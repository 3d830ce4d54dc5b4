//! Relevance classification: does a review address the category's
//! essence aspect, or peripheral ones?
//!
//! The final score averages a lexical keyword score and a model judgment;
//! scores strictly above the threshold are classified as essence.

pub mod classifier;
pub mod model;
pub mod summary;
pub mod types;

pub use classifier::RelevanceClassifier;
pub use model::{ModelScore, ModelScorer};
pub use summary::summarize;
pub use types::*;
