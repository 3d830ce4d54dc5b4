//! Model-based relevance scoring.

use std::sync::Arc;
use std::time::Duration;

use reviewlens_core::Review;
use reviewlens_essence::EssenceConfig;
use reviewlens_judge::{JudgeError, TextJudge};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Score substituted when the model cannot be consulted.
pub const FALLBACK_MODEL_SCORE: f64 = 0.5;

/// Reason attached to a substituted model score.
pub const FALLBACK_REASON: &str = "model scoring unavailable";

#[derive(Debug, Clone, PartialEq)]
pub struct ModelScore {
    pub score: f64,
    pub reason: String,
    /// False when the fallback was used.
    pub judged: bool,
}

impl ModelScore {
    pub fn fallback() -> Self {
        Self {
            score: FALLBACK_MODEL_SCORE,
            reason: FALLBACK_REASON.to_string(),
            judged: false,
        }
    }
}

/// Asks the judge how strongly a review addresses the essence aspect.
///
/// Every call holds one permit from `permits`, which may be shared with
/// other judgment stages of the same request.
pub struct ModelScorer {
    judge: Arc<dyn TextJudge>,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl ModelScorer {
    pub fn new(judge: Arc<dyn TextJudge>, timeout: Duration, permits: Arc<Semaphore>) -> Self {
        Self {
            judge,
            timeout,
            permits,
        }
    }

    /// Never fails: errors, timeouts and out-of-range scores yield 0.5.
    pub async fn score(&self, review: &Review, config: &EssenceConfig) -> ModelScore {
        let text = review.text();
        // Waiting for a permit does not count against the timeout.
        let outcome = match self.permits.acquire().await {
            Ok(_permit) => {
                let call = self
                    .judge
                    .judge_relevance(&text, &config.essence_aspect, &config.other_aspects);
                match tokio::time::timeout(self.timeout, call).await {
                    Ok(result) => result,
                    Err(_) => Err(JudgeError::Timeout(self.timeout)),
                }
            }
            Err(_) => Err(JudgeError::Unavailable),
        };

        let checked = outcome.and_then(|j| {
            if j.score.is_finite() && (0.0..=1.0).contains(&j.score) {
                Ok(j)
            } else {
                Err(JudgeError::OutOfRange(format!("relevance score {}", j.score)))
            }
        });

        match checked {
            Ok(j) => {
                debug!("Model relevance for review {}: {:.2}", review.id, j.score);
                ModelScore {
                    score: j.score,
                    reason: j.reason,
                    judged: true,
                }
            }
            Err(e) => {
                warn!("Relevance judgment unavailable for review {}: {}", review.id, e);
                ModelScore::fallback()
            }
        }
    }
}
