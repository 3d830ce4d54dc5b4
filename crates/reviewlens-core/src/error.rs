//! Error types for ReviewLens.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Partitioning was asked to work on an empty review set.
    #[error("Insufficient data: at least one review is required")]
    InsufficientData,

    #[error("Invalid rating: {0} (expected 1-5)")]
    InvalidRating(u8),

    #[error("Invalid trust score: {0} (expected 0-100)")]
    InvalidTrustScore(u8),

    #[error("Invalid essence score: {0} (expected 0.0-1.0)")]
    InvalidEssenceScore(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
