//! Partition types.

use reviewlens_core::stats::{mean, round_to};
use reviewlens_core::{Review, TrustScore};
use serde::Serialize;

/// Where the sort-and-bucket step routes one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Trusted,
    SuspiciousHigh,
    SuspiciousLow,
}

/// Outcome of the synchronous sort-and-bucket step, before any analysis.
#[derive(Debug, Clone)]
pub struct PartitionPlan {
    /// Input reviews sorted by rating, highest first, ties in input order.
    pub sorted: Vec<Review>,
    /// Route for each entry of `sorted`.
    pub routes: Vec<Route>,
    /// Size of the top candidate slice.
    pub high_candidates: usize,
    /// Size of the bottom candidate slice.
    pub low_candidates: usize,
}

impl PartitionPlan {
    /// Number of reviews that will be sent to suspicion analysis.
    pub fn analysis_count(&self) -> usize {
        self.routes.iter().filter(|r| **r != Route::Trusted).count()
    }
}

/// Trust score and flags for one analyzed review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuspicionAssessment {
    #[serde(rename = "trustScore")]
    pub trust_score: TrustScore,
    #[serde(rename = "riskFlags")]
    pub risk_flags: Vec<String>,
    /// False when the judge failed and fallback values were substituted.
    pub judged: bool,
}

/// Headline statistics. Averages cover trusted reviews only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionStatistics {
    #[serde(rename = "totalReviews")]
    pub total_reviews: usize,
    #[serde(rename = "trustedCount")]
    pub trusted_count: usize,
    #[serde(rename = "suspiciousHighCount")]
    pub suspicious_high_count: usize,
    #[serde(rename = "suspiciousLowCount")]
    pub suspicious_low_count: usize,
    /// Mean rating of trusted reviews, one decimal. 0 when none are trusted.
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    /// Mean trust score of trusted reviews, whole number. 0 when none are trusted.
    #[serde(rename = "averageTrustScore")]
    pub average_trust_score: f64,
}

impl PartitionStatistics {
    pub fn compute(trusted: &[Review], suspicious_high: usize, suspicious_low: usize) -> Self {
        let count = trusted.len();
        let average_rating = mean(trusted.iter().map(|r| f64::from(r.rating.value())));
        let average_trust_score = mean(
            trusted
                .iter()
                .map(|r| r.trust_score.map(|t| f64::from(t.value())).unwrap_or(0.0)),
        );

        Self {
            total_reviews: count + suspicious_high + suspicious_low,
            trusted_count: count,
            suspicious_high_count: suspicious_high,
            suspicious_low_count: suspicious_low,
            average_rating: round_to(average_rating, 1),
            average_trust_score: round_to(average_trust_score, 0),
        }
    }
}

/// Result of partitioning a review set.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionResult {
    #[serde(rename = "trustedReviews")]
    pub trusted: Vec<Review>,
    #[serde(rename = "suspiciousHighReviews")]
    pub suspicious_high: Vec<Review>,
    #[serde(rename = "suspiciousLowReviews")]
    pub suspicious_low: Vec<Review>,
    pub statistics: PartitionStatistics,
    /// Ids of suspicious reviews that could not be verified by the judge.
    #[serde(rename = "unverifiedIds")]
    pub unverified_ids: Vec<String>,
}
