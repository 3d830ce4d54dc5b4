//! ReviewLens Core: the review data model and its shared configuration.

pub mod config;
pub mod error;
pub mod review;
pub mod stats;

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use review::{
    parse_review_date, Classification, EssenceScore, Extremity, Platform, Rating, Review, Sentiment,
    TrustScore,
};
