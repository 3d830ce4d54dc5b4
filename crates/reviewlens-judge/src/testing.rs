//! Testing utilities: a scripted `TextJudge` that makes no network calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reviewlens_core::Extremity;

use crate::error::JudgeError;
use crate::judge::TextJudge;
use crate::types::{RelevanceJudgment, SuspicionJudgment};

/// What the scripted judge does for a matching call.
#[derive(Debug, Clone)]
pub enum ScriptedReply<T> {
    Reply(T),
    Fail(JudgeError),
    /// Sleep first, then reply. Used to exercise timeouts.
    Delay(Duration, T),
}

/// Record of a call made to the scripted judge.
#[derive(Debug, Clone, PartialEq)]
pub enum JudgeCall {
    Suspicion {
        review_text: String,
        rating: u8,
        extremity: Extremity,
    },
    Relevance {
        review_text: String,
        essence_aspect: String,
    },
}

/// Deterministic judge for tests.
///
/// Replies are matched by substring of the review text; the first
/// matching rule wins and unmatched calls use the default reply.
pub struct ScriptedJudge {
    suspicion_rules: Vec<(String, ScriptedReply<SuspicionJudgment>)>,
    suspicion_default: ScriptedReply<SuspicionJudgment>,
    relevance_rules: Vec<(String, ScriptedReply<RelevanceJudgment>)>,
    relevance_default: ScriptedReply<RelevanceJudgment>,
    calls: Mutex<Vec<JudgeCall>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

/// Counts a call as in flight until dropped.
struct InFlight<'a> {
    current: &'a AtomicUsize,
}

impl<'a> InFlight<'a> {
    fn enter(current: &'a AtomicUsize, peak: &AtomicUsize) -> Self {
        let now = current.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        Self { current }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Default for ScriptedJudge {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedJudge {
    /// Judge that answers every call: trust 30 with one flag, relevance 0.5.
    pub fn new() -> Self {
        Self {
            suspicion_rules: Vec::new(),
            suspicion_default: ScriptedReply::Reply(SuspicionJudgment {
                trust_score: 30,
                risk_flags: vec!["scripted".into()],
            }),
            relevance_rules: Vec::new(),
            relevance_default: ScriptedReply::Reply(RelevanceJudgment {
                score: 0.5,
                reason: "scripted".into(),
            }),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Judge whose every call fails with a malformed reply.
    pub fn failing() -> Self {
        let err = JudgeError::Malformed("scripted failure".into());
        Self {
            suspicion_default: ScriptedReply::Fail(err.clone()),
            relevance_default: ScriptedReply::Fail(err),
            ..Self::new()
        }
    }

    pub fn with_suspicion(
        mut self,
        text_contains: impl Into<String>,
        reply: ScriptedReply<SuspicionJudgment>,
    ) -> Self {
        self.suspicion_rules.push((text_contains.into(), reply));
        self
    }

    pub fn with_relevance(
        mut self,
        text_contains: impl Into<String>,
        reply: ScriptedReply<RelevanceJudgment>,
    ) -> Self {
        self.relevance_rules.push((text_contains.into(), reply));
        self
    }

    pub fn with_default_relevance(mut self, reply: ScriptedReply<RelevanceJudgment>) -> Self {
        self.relevance_default = reply;
        self
    }

    pub fn with_default_suspicion(mut self, reply: ScriptedReply<SuspicionJudgment>) -> Self {
        self.suspicion_default = reply;
        self
    }

    /// All calls received so far, in arrival order.
    pub fn calls(&self) -> Vec<JudgeCall> {
        self.calls.lock().clone()
    }

    /// Highest number of calls that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn suspicion_call_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, JudgeCall::Suspicion { .. }))
            .count()
    }

    pub fn relevance_call_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, JudgeCall::Relevance { .. }))
            .count()
    }
}

fn pick<'a, T>(
    rules: &'a [(String, ScriptedReply<T>)],
    default: &'a ScriptedReply<T>,
    text: &str,
) -> &'a ScriptedReply<T> {
    rules
        .iter()
        .find(|(needle, _)| text.contains(needle.as_str()))
        .map(|(_, reply)| reply)
        .unwrap_or(default)
}

async fn play<T: Clone>(reply: &ScriptedReply<T>) -> Result<T, JudgeError> {
    match reply {
        ScriptedReply::Reply(value) => Ok(value.clone()),
        ScriptedReply::Fail(err) => Err(err.clone()),
        ScriptedReply::Delay(delay, value) => {
            tokio::time::sleep(*delay).await;
            Ok(value.clone())
        }
    }
}

#[async_trait]
impl TextJudge for ScriptedJudge {
    async fn judge_suspicion(
        &self,
        review_text: &str,
        rating: u8,
        extremity: Extremity,
    ) -> Result<SuspicionJudgment, JudgeError> {
        self.calls.lock().push(JudgeCall::Suspicion {
            review_text: review_text.to_string(),
            rating,
            extremity,
        });
        let reply = pick(&self.suspicion_rules, &self.suspicion_default, review_text).clone();
        let _guard = InFlight::enter(&self.in_flight, &self.peak_in_flight);
        play(&reply).await
    }

    async fn judge_relevance(
        &self,
        review_text: &str,
        essence_aspect: &str,
        _other_aspects: &[String],
    ) -> Result<RelevanceJudgment, JudgeError> {
        self.calls.lock().push(JudgeCall::Relevance {
            review_text: review_text.to_string(),
            essence_aspect: essence_aspect.to_string(),
        });
        let reply = pick(&self.relevance_rules, &self.relevance_default, review_text).clone();
        let _guard = InFlight::enter(&self.in_flight, &self.peak_in_flight);
        play(&reply).await
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rules_match_by_substring() {
        let judge = ScriptedJudge::new().with_suspicion(
            "amazing",
            ScriptedReply::Reply(SuspicionJudgment {
                trust_score: 10,
                risk_flags: vec!["over_praise".into()],
            }),
        );
        let hit = judge
            .judge_suspicion("simply amazing", 5, Extremity::High)
            .await
            .unwrap();
        assert_eq!(hit.trust_score, 10);
        let miss = judge
            .judge_suspicion("fine", 5, Extremity::High)
            .await
            .unwrap();
        assert_eq!(miss.trust_score, 30);
        assert_eq!(judge.suspicion_call_count(), 2);
        assert_eq!(judge.relevance_call_count(), 0);
    }

    #[tokio::test]
    async fn test_peak_in_flight() {
        let judge = ScriptedJudge::new().with_default_relevance(ScriptedReply::Delay(
            Duration::from_millis(30),
            RelevanceJudgment {
                score: 0.5,
                reason: "slow".into(),
            },
        ));
        let (a, b) = tokio::join!(
            judge.judge_relevance("a", "taste", &[]),
            judge.judge_relevance("b", "taste", &[])
        );
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(judge.peak_in_flight(), 2);
        judge.judge_relevance("c", "taste", &[]).await.unwrap();
        assert_eq!(judge.peak_in_flight(), 2);
    }

    #[tokio::test]
    async fn test_failing_judge() {
        let judge = ScriptedJudge::failing();
        assert!(judge.judge_relevance("x", "taste", &[]).await.is_err());
        assert_eq!(
            judge.calls(),
            vec![JudgeCall::Relevance {
                review_text: "x".into(),
                essence_aspect: "taste".into()
            }]
        );
    }
}
