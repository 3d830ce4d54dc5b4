//! Percentile-based authenticity partition.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use reviewlens_core::{Error, Extremity, PipelineConfig, Result, Review, TrustScore};
use reviewlens_judge::TextJudge;
use tokio::sync::Semaphore;
use tracing::info;

use crate::analyzer::SuspicionAnalyzer;
use crate::types::*;

/// Candidates in the bottom slice are analyzed only at or below this rating.
pub const LOW_RATING_GATE: u8 = 2;

/// Size of a candidate slice: `ceil(total * percent / 100)`.
pub fn slice_count(total: usize, percent: usize) -> usize {
    (total * percent).div_ceil(100)
}

/// Splits a review set into trusted, suspicious-high and suspicious-low.
pub struct AuthenticityPartitioner {
    analyzer: SuspicionAnalyzer,
    default_trust: TrustScore,
    slice_percent: usize,
    max_concurrency: usize,
}

impl AuthenticityPartitioner {
    pub fn new(judge: Arc<dyn TextJudge>, config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        Self::with_permits(judge, config, Arc::new(Semaphore::new(config.max_concurrency)))
    }

    /// Build a partitioner whose judge calls draw from a shared permit pool.
    pub fn with_permits(
        judge: Arc<dyn TextJudge>,
        config: &PipelineConfig,
        permits: Arc<Semaphore>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            analyzer: SuspicionAnalyzer::new(judge, config.judge_timeout(), permits),
            default_trust: TrustScore::new(config.default_trust_score)?,
            slice_percent: config.extreme_slice_percent,
            max_concurrency: config.max_concurrency,
        })
    }

    /// Sort and bucket without calling the judge.
    ///
    /// A review inside the top slice is routed to high analysis only with
    /// the maximum rating; inside the bottom slice, to low analysis only at
    /// or below `LOW_RATING_GATE`. When the slices overlap (tiny sets), the
    /// high gate is checked first and a review is routed at most once.
    pub fn plan(&self, reviews: &[Review]) -> Result<PartitionPlan> {
        if reviews.is_empty() {
            return Err(Error::InsufficientData);
        }

        let total = reviews.len();
        let mut sorted = reviews.to_vec();
        // Stable: equal ratings keep input order.
        sorted.sort_by(|a, b| b.rating.cmp(&a.rating));

        let high_candidates = slice_count(total, self.slice_percent);
        let low_candidates = slice_count(total, self.slice_percent);
        let low_start = total - low_candidates;

        let routes = sorted
            .iter()
            .enumerate()
            .map(|(i, review)| {
                if i < high_candidates && review.rating.is_max() {
                    Route::SuspiciousHigh
                } else if i >= low_start && review.rating.value() <= LOW_RATING_GATE {
                    Route::SuspiciousLow
                } else {
                    Route::Trusted
                }
            })
            .collect();

        Ok(PartitionPlan {
            sorted,
            routes,
            high_candidates,
            low_candidates,
        })
    }

    /// Partition a review set, analyzing suspicious candidates concurrently.
    ///
    /// Fails only on an empty input. Judge failures degrade to fallback
    /// assessments and are listed in `unverified_ids`.
    pub async fn partition(&self, reviews: &[Review]) -> Result<PartitionResult> {
        let start = std::time::Instant::now();
        let plan = self.plan(reviews)?;

        let jobs: Vec<(usize, Extremity)> = plan
            .routes
            .iter()
            .enumerate()
            .filter_map(|(i, route)| match route {
                Route::SuspiciousHigh => Some((i, Extremity::High)),
                Route::SuspiciousLow => Some((i, Extremity::Low)),
                Route::Trusted => None,
            })
            .collect();
        let analysis_count = jobs.len();

        let analyzer = &self.analyzer;
        let sorted = &plan.sorted;
        let assessments: Vec<(usize, SuspicionAssessment)> = stream::iter(jobs)
            .map(|(i, extremity)| async move { (i, analyzer.analyze(&sorted[i], extremity).await) })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let mut by_index: Vec<Option<SuspicionAssessment>> = vec![None; plan.sorted.len()];
        for (i, assessment) in assessments {
            by_index[i] = Some(assessment);
        }

        let mut trusted = Vec::new();
        let mut suspicious_high = Vec::new();
        let mut suspicious_low = Vec::new();
        let mut unverified_ids = Vec::new();

        for ((mut review, route), assessment) in plan
            .sorted
            .into_iter()
            .zip(plan.routes)
            .zip(by_index)
        {
            review.fill_sentiment();
            match (route, assessment) {
                (Route::SuspiciousHigh, Some(a)) | (Route::SuspiciousLow, Some(a)) => {
                    if !a.judged {
                        unverified_ids.push(review.id.clone());
                    }
                    review.trust_score = Some(a.trust_score);
                    review.risk_flags = a.risk_flags;
                    if route == Route::SuspiciousHigh {
                        suspicious_high.push(review);
                    } else {
                        suspicious_low.push(review);
                    }
                }
                _ => {
                    if review.trust_score.is_none() {
                        review.trust_score = Some(self.default_trust);
                    }
                    trusted.push(review);
                }
            }
        }

        let statistics =
            PartitionStatistics::compute(&trusted, suspicious_high.len(), suspicious_low.len());

        info!(
            "Partition complete: total={}, trusted={}, suspicious_high={}, suspicious_low={}, analyzed={}, unverified={}, duration={}ms",
            statistics.total_reviews,
            statistics.trusted_count,
            statistics.suspicious_high_count,
            statistics.suspicious_low_count,
            analysis_count,
            unverified_ids.len(),
            start.elapsed().as_millis()
        );

        Ok(PartitionResult {
            trusted,
            suspicious_high,
            suspicious_low,
            statistics,
            unverified_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::time::Duration;

    use chrono::NaiveDate;
    use reviewlens_core::{Platform, Sentiment};
    use reviewlens_judge::testing::{ScriptedJudge, ScriptedReply};
    use reviewlens_judge::{NoopJudge, SuspicionJudgment};

    fn review(id: &str, rating: u8) -> Review {
        Review::new(
            id,
            "author",
            Platform::MapService,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            rating,
            format!("review {}", id),
        )
        .unwrap()
    }

    fn reviews(ratings: &[u8]) -> Vec<Review> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, r)| review(&format!("r{}", i), *r))
            .collect()
    }

    fn partitioner(judge: Arc<dyn TextJudge>) -> AuthenticityPartitioner {
        AuthenticityPartitioner::new(judge, &PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_slice_count() {
        assert_eq!(slice_count(1, 5), 1);
        assert_eq!(slice_count(20, 5), 1);
        assert_eq!(slice_count(21, 5), 2);
        assert_eq!(slice_count(100, 5), 5);
        assert_eq!(slice_count(101, 5), 6);
        assert_eq!(slice_count(10, 0), 0);
    }

    #[tokio::test]
    async fn test_empty_input_is_insufficient_data() {
        let p = partitioner(Arc::new(NoopJudge));
        assert!(matches!(p.partition(&[]).await, Err(Error::InsufficientData)));
        assert!(matches!(p.plan(&[]), Err(Error::InsufficientData)));
    }

    #[test]
    fn test_slice_sizes_independent_of_distribution() {
        let p = partitioner(Arc::new(NoopJudge));
        for n in [1usize, 7, 20, 21, 40, 99, 250] {
            let all_threes = reviews(&vec![3; n]);
            let plan = p.plan(&all_threes).unwrap();
            assert_eq!(plan.high_candidates, slice_count(n, 5));
            assert_eq!(plan.low_candidates, slice_count(n, 5));
            assert_eq!(plan.analysis_count(), 0);
        }
    }

    #[test]
    fn test_stable_sort_keeps_input_order_for_ties() {
        let p = partitioner(Arc::new(NoopJudge));
        let plan = p.plan(&reviews(&[2, 5, 2, 4, 2])).unwrap();
        let ids: Vec<&str> = plan.sorted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3", "r0", "r2", "r4"]);
    }

    #[test]
    fn test_extremity_gate() {
        let p = partitioner(Arc::new(NoopJudge));
        // Top candidate is a 4: not routed. Bottom candidate is a 3: not routed.
        let plan = p.plan(&reviews(&[4, 3, 3, 4, 3, 4, 3, 4, 3, 4])).unwrap();
        assert_eq!(plan.analysis_count(), 0);

        // Top candidate 5 routed high, bottom candidate 2 routed low.
        let plan = p.plan(&reviews(&[4, 5, 3, 2, 3, 4, 3, 4, 3, 4])).unwrap();
        assert_eq!(plan.routes[0], Route::SuspiciousHigh);
        assert_eq!(plan.routes[9], Route::SuspiciousLow);
        assert_eq!(plan.analysis_count(), 2);
    }

    #[test]
    fn test_single_review_overlap_routes_once() {
        let p = partitioner(Arc::new(NoopJudge));
        assert_eq!(p.plan(&reviews(&[5])).unwrap().routes, vec![Route::SuspiciousHigh]);
        assert_eq!(p.plan(&reviews(&[1])).unwrap().routes, vec![Route::SuspiciousLow]);
        assert_eq!(p.plan(&reviews(&[3])).unwrap().routes, vec![Route::Trusted]);
    }

    #[tokio::test]
    async fn test_twenty_review_example() {
        // One 5-star, eight 2-star, eleven 3/4-star.
        let mut ratings = vec![5];
        ratings.extend([2; 8]);
        ratings.extend([4, 3, 4, 3, 4, 3, 4, 3, 4, 3, 4]);
        let input = reviews(&ratings);

        let judge = Arc::new(ScriptedJudge::new());
        let p = partitioner(judge.clone());
        let result = p.partition(&input).await.unwrap();

        assert_eq!(result.suspicious_high.len(), 1);
        assert_eq!(result.suspicious_high[0].id, "r0");
        assert_eq!(result.suspicious_low.len(), 1);
        // Last 2-star in input order is r8.
        assert_eq!(result.suspicious_low[0].id, "r8");
        assert_eq!(result.trusted.len(), 18);
        assert!(result
            .trusted
            .iter()
            .all(|r| r.trust_score.map(|t| t.value()) == Some(75)));
        assert_eq!(judge.suspicion_call_count(), 2);
        assert!(result.unverified_ids.is_empty());

        assert_eq!(result.suspicious_high[0].sentiment, Some(Sentiment::Positive));
        assert_eq!(result.suspicious_low[0].sentiment, Some(Sentiment::Negative));
        assert!(result.trusted.iter().all(|r| r.sentiment.is_some()));
        let r9 = result.trusted.iter().find(|r| r.id == "r9").unwrap();
        assert_eq!(r9.sentiment, Some(Sentiment::Positive));
        let r10 = result.trusted.iter().find(|r| r.id == "r10").unwrap();
        assert_eq!(r10.sentiment, Some(Sentiment::Neutral));
    }

    #[tokio::test]
    async fn test_partition_completeness() {
        let input = reviews(&[5, 5, 1, 2, 3, 4, 5, 1, 1, 2, 3, 3, 4, 4, 5, 5, 2, 1, 3, 4, 5, 1, 2]);
        let p = partitioner(Arc::new(ScriptedJudge::new()));
        let result = p.partition(&input).await.unwrap();

        let total = result.trusted.len() + result.suspicious_high.len() + result.suspicious_low.len();
        assert_eq!(total, input.len());
        assert_eq!(result.statistics.total_reviews, input.len());

        let ids: HashSet<&str> = result
            .trusted
            .iter()
            .chain(&result.suspicious_high)
            .chain(&result.suspicious_low)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids.len(), input.len());
    }

    #[tokio::test]
    async fn test_input_is_not_mutated_and_existing_trust_kept() {
        let mut input = reviews(&[4, 4, 3]);
        input[1].trust_score = Some(TrustScore::new(90).unwrap());
        let snapshot = input.clone();

        let p = partitioner(Arc::new(NoopJudge));
        let result = p.partition(&input).await.unwrap();
        assert_eq!(input, snapshot);

        let r1 = result.trusted.iter().find(|r| r.id == "r1").unwrap();
        assert_eq!(r1.trust_score.unwrap().value(), 90);
        let r0 = result.trusted.iter().find(|r| r.id == "r0").unwrap();
        assert_eq!(r0.trust_score.unwrap().value(), 75);
    }

    #[tokio::test]
    async fn test_judge_failure_is_isolated() {
        let judge = ScriptedJudge::new()
            .with_suspicion("review r0", ScriptedReply::Fail(reviewlens_judge::JudgeError::Unavailable))
            .with_suspicion(
                "review r1",
                ScriptedReply::Reply(SuspicionJudgment {
                    trust_score: 12,
                    risk_flags: vec!["competitor".into()],
                }),
            );
        let p = partitioner(Arc::new(judge));
        // n=2: both slices hold one review each.
        let result = p.partition(&reviews(&[5, 1])).await.unwrap();

        let high = &result.suspicious_high[0];
        assert_eq!(high.trust_score.unwrap().value(), 50);
        assert_eq!(high.risk_flags, vec!["potential_fake"]);

        let low = &result.suspicious_low[0];
        assert_eq!(low.trust_score.unwrap().value(), 12);
        assert_eq!(low.risk_flags, vec!["competitor"]);

        assert_eq!(result.unverified_ids, vec!["r0".to_string()]);
    }

    #[tokio::test]
    async fn test_slow_judgment_times_out_without_blocking_others() {
        let judge = ScriptedJudge::new().with_suspicion(
            "review r0",
            ScriptedReply::Delay(
                Duration::from_secs(5),
                SuspicionJudgment {
                    trust_score: 99,
                    risk_flags: vec![],
                },
            ),
        );
        let config = PipelineConfig {
            judge_timeout_ms: 50,
            ..Default::default()
        };
        let p = AuthenticityPartitioner::new(Arc::new(judge), &config).unwrap();
        let result = p.partition(&reviews(&[5, 1])).await.unwrap();
        assert_eq!(result.suspicious_high[0].risk_flags, vec!["potential_fake"]);
        assert_eq!(result.suspicious_low[0].trust_score.unwrap().value(), 30);
    }

    #[tokio::test]
    async fn test_shared_permits_bound_suspicion_calls() {
        let judge = Arc::new(ScriptedJudge::new().with_default_suspicion(ScriptedReply::Delay(
            Duration::from_millis(30),
            SuspicionJudgment {
                trust_score: 40,
                risk_flags: vec![],
            },
        )));
        let config = PipelineConfig {
            max_concurrency: 4,
            ..Default::default()
        };
        let p = AuthenticityPartitioner::with_permits(
            judge.clone(),
            &config,
            Arc::new(Semaphore::new(1)),
        )
        .unwrap();
        // n=2: one high and one low candidate, both analyzed.
        let result = p.partition(&reviews(&[5, 1])).await.unwrap();

        assert_eq!(judge.suspicion_call_count(), 2);
        assert_eq!(judge.peak_in_flight(), 1);
        assert!(result.unverified_ids.is_empty());
    }

    #[tokio::test]
    async fn test_statistics_exclude_suspicious() {
        let p = partitioner(Arc::new(ScriptedJudge::new()));
        let a = p.partition(&reviews(&[5, 4, 4, 3, 1])).await.unwrap();

        // Lower the rating of the suspicious-low review; headline stats must not move.
        let b = p.partition(&reviews(&[5, 4, 4, 3, 2])).await.unwrap();

        assert_eq!(a.statistics.average_rating, b.statistics.average_rating);
        assert_eq!(a.statistics.average_trust_score, b.statistics.average_trust_score);
        assert_eq!(a.statistics.average_rating, 3.7);
        assert_eq!(a.statistics.average_trust_score, 75.0);
    }

    #[tokio::test]
    async fn test_statistics_zero_when_nothing_trusted() {
        let p = partitioner(Arc::new(NoopJudge));
        let result = p.partition(&reviews(&[5])).await.unwrap();
        assert!(result.trusted.is_empty());
        assert_eq!(result.statistics.average_rating, 0.0);
        assert_eq!(result.statistics.average_trust_score, 0.0);
        assert_eq!(result.statistics.suspicious_high_count, 1);
    }

    #[tokio::test]
    async fn test_result_serializes_with_camel_case_buckets() {
        let p = partitioner(Arc::new(NoopJudge));
        let result = p.partition(&reviews(&[5, 3, 1])).await.unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert!(value["trustedReviews"].is_array());
        assert!(value["suspiciousHighReviews"].is_array());
        assert!(value["suspiciousLowReviews"].is_array());
        assert_eq!(value["statistics"]["totalReviews"], 3);
        assert_eq!(value["unverifiedIds"].as_array().unwrap().len(), 2);
    }
}
