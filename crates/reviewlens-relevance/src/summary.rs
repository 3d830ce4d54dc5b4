//! Aggregate statistics over classified reviews.

use reviewlens_core::stats::{mean, round_to};
use reviewlens_core::Classification;

use crate::types::{ClassifiedReview, RelevanceSummary};

/// Counts, average ratings (1 decimal) and essence share in percent
/// (1 decimal). An empty input yields all zeros.
pub fn summarize(classified: &[ClassifiedReview]) -> RelevanceSummary {
    let (essence, other): (Vec<&ClassifiedReview>, Vec<&ClassifiedReview>) = classified
        .iter()
        .partition(|c| c.classification() == Classification::Essence);

    let avg_rating = |group: &[&ClassifiedReview]| {
        round_to(
            mean(group.iter().map(|c| c.review.rating.value() as f64)),
            1,
        )
    };

    let essence_percentage = if classified.is_empty() {
        0.0
    } else {
        round_to(essence.len() as f64 / classified.len() as f64 * 100.0, 1)
    };

    RelevanceSummary {
        essence_count: essence.len(),
        other_count: other.len(),
        essence_avg_rating: avg_rating(essence.as_slice()),
        other_avg_rating: avg_rating(other.as_slice()),
        essence_percentage,
    }
}
