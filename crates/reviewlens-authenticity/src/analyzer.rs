//! Fraud-signal analysis for extreme-rated reviews.

use std::sync::Arc;
use std::time::Duration;

use reviewlens_core::{Extremity, Review, TrustScore};
use reviewlens_judge::{JudgeError, TextJudge};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::types::SuspicionAssessment;

/// Trust score used when a judgment cannot be obtained.
pub const FALLBACK_TRUST_SCORE: u8 = 50;

/// Wraps the judge with a timeout and the fixed fallback policy.
///
/// Each judgment holds one permit from `permits` while it runs.
pub struct SuspicionAnalyzer {
    judge: Arc<dyn TextJudge>,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl SuspicionAnalyzer {
    pub fn new(judge: Arc<dyn TextJudge>, timeout: Duration, permits: Arc<Semaphore>) -> Self {
        Self {
            judge,
            timeout,
            permits,
        }
    }

    /// Analyze one review. Never fails: any judge error or timeout yields
    /// trust 50 and the extremity's fallback flag.
    pub async fn analyze(&self, review: &Review, extremity: Extremity) -> SuspicionAssessment {
        debug!(
            "Suspicion analysis: review={}, rating={}, extremity={}",
            review.id, review.rating, extremity
        );

        let text = review.text();
        let outcome = match self.permits.acquire().await {
            Ok(_permit) => {
                let call = self
                    .judge
                    .judge_suspicion(&text, review.rating.value(), extremity);
                match tokio::time::timeout(self.timeout, call).await {
                    Ok(result) => result,
                    Err(_) => Err(JudgeError::Timeout(self.timeout)),
                }
            }
            Err(_) => Err(JudgeError::Unavailable),
        };

        let judged = outcome.and_then(|j| {
            TrustScore::new(j.trust_score)
                .map(|trust_score| SuspicionAssessment {
                    trust_score,
                    risk_flags: j.risk_flags,
                    judged: true,
                })
                .map_err(|e| JudgeError::OutOfRange(e.to_string()))
        });

        match judged {
            Ok(assessment) => assessment,
            Err(e) => {
                warn!(
                    "Suspicion judgment unavailable for review {} ({}): {}",
                    review.id, extremity, e
                );
                Self::fallback(extremity)
            }
        }
    }

    /// The fixed result substituted when analysis fails.
    pub fn fallback(extremity: Extremity) -> SuspicionAssessment {
        SuspicionAssessment {
            trust_score: TrustScore::saturating(FALLBACK_TRUST_SCORE),
            risk_flags: vec![extremity.fallback_flag().to_string()],
            judged: false,
        }
    }
}
