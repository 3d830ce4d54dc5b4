//! The `TextJudge` capability and its unavailable placeholder.

use async_trait::async_trait;
use reviewlens_core::Extremity;

use crate::error::JudgeError;
use crate::types::{RelevanceJudgment, SuspicionJudgment};

/// Trait for judgment backends.
///
/// Both operations may fail; callers treat a failure as an expected
/// outcome and substitute their fallback values.
#[async_trait]
pub trait TextJudge: Send + Sync {
    /// Judge whether an extreme-rated review looks fabricated.
    async fn judge_suspicion(
        &self,
        review_text: &str,
        rating: u8,
        extremity: Extremity,
    ) -> Result<SuspicionJudgment, JudgeError>;

    /// Judge how much a review addresses the essence aspect versus the others.
    async fn judge_relevance(
        &self,
        review_text: &str,
        essence_aspect: &str,
        other_aspects: &[String],
    ) -> Result<RelevanceJudgment, JudgeError>;

    /// Check if the judge can be called at all.
    fn is_available(&self) -> bool;
}

/// Placeholder judge that always reports `Unavailable`.
pub struct NoopJudge;

#[async_trait]
impl TextJudge for NoopJudge {
    async fn judge_suspicion(
        &self,
        _review_text: &str,
        _rating: u8,
        _extremity: Extremity,
    ) -> Result<SuspicionJudgment, JudgeError> {
        Err(JudgeError::Unavailable)
    }

    async fn judge_relevance(
        &self,
        _review_text: &str,
        _essence_aspect: &str,
        _other_aspects: &[String],
    ) -> Result<RelevanceJudgment, JudgeError> {
        Err(JudgeError::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}
