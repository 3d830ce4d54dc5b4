//! Lexical essence-vs-other scoring over a category's keyword lists.

use reviewlens_core::Review;
use serde::Serialize;

use crate::types::EssenceConfig;

/// Score returned when a review mentions neither vocabulary.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Keyword hit counts and the derived essence ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeywordScore {
    #[serde(rename = "essenceHits")]
    pub essence_hits: usize,
    #[serde(rename = "otherHits")]
    pub other_hits: usize,
    pub score: f64,
}

/// Cheap lexical scorer; no state.
pub struct KeywordScorer;

impl KeywordScorer {
    /// Score a review's title and content against one category.
    pub fn score(review: &Review, config: &EssenceConfig) -> KeywordScore {
        Self::score_text(&review.text(), config)
    }

    /// Count case-insensitive substring occurrences of each vocabulary term.
    ///
    /// Returns `essence / (essence + other)`, or 0.5 with no hits at all.
    pub fn score_text(text: &str, config: &EssenceConfig) -> KeywordScore {
        let text_lower = text.to_lowercase();
        let essence_hits = count_hits(&text_lower, &config.essence_keywords);
        let other_hits = count_hits(&text_lower, &config.other_keywords);

        let total = essence_hits + other_hits;
        let score = if total == 0 {
            NEUTRAL_SCORE
        } else {
            essence_hits as f64 / total as f64
        };

        KeywordScore {
            essence_hits,
            other_hits,
            score,
        }
    }
}

fn count_hits(text_lower: &str, terms: &[String]) -> usize {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .map(|t| text_lower.matches(t.as_str()).count())
        .sum()
}
