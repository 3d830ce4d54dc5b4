//! Relevance types.

use reviewlens_core::{Classification, EssenceScore, Review};
use serde::{Deserialize, Serialize};

/// A review annotated with its essence classification.
///
/// The annotated copy carries `essenceScore` and `classification`; the
/// remaining fields explain how the decision was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedReview {
    #[serde(flatten)]
    pub review: Review,
    #[serde(rename = "isEssence")]
    pub is_essence: bool,
    #[serde(rename = "classificationReason", default, skip_serializing_if = "Option::is_none")]
    pub classification_reason: Option<String>,
    #[serde(rename = "keywordScore", default, skip_serializing_if = "Option::is_none")]
    pub keyword_score: Option<f64>,
    #[serde(rename = "modelScore", default, skip_serializing_if = "Option::is_none")]
    pub model_score: Option<f64>,
    /// False when the model judgment fell back to its neutral value.
    #[serde(default)]
    pub judged: bool,
}

impl ClassifiedReview {
    pub fn essence_score(&self) -> f64 {
        self.review
            .essence_score
            .map(EssenceScore::value)
            .unwrap_or(0.0)
    }

    pub fn classification(&self) -> Classification {
        self.review.classification.unwrap_or(Classification::Other)
    }
}

/// Essence vs. other counts and average ratings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevanceSummary {
    #[serde(rename = "essenceCount")]
    pub essence_count: usize,
    #[serde(rename = "otherCount")]
    pub other_count: usize,
    #[serde(rename = "essenceAvgRating")]
    pub essence_avg_rating: f64,
    #[serde(rename = "otherAvgRating")]
    pub other_avg_rating: f64,
    #[serde(rename = "essencePercentage")]
    pub essence_percentage: f64,
}
