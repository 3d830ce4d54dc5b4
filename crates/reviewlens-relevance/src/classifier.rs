//! Hybrid keyword + model essence classifier.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use reviewlens_core::{Classification, EssenceScore, PipelineConfig, Result, Review};
use reviewlens_essence::{EssenceConfig, KeywordScorer};
use reviewlens_judge::TextJudge;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::model::ModelScorer;
use crate::types::ClassifiedReview;

/// Reason attached when the category has no essence configuration.
pub const UNCONFIGURED_REASON: &str = "no essence configuration for category";

pub struct RelevanceClassifier {
    model: ModelScorer,
    threshold: f64,
    max_concurrency: usize,
}

impl RelevanceClassifier {
    /// Classifier with its own judgment concurrency limit.
    pub fn new(judge: Arc<dyn TextJudge>, config: &PipelineConfig) -> Result<Self> {
        Self::with_permits(
            judge,
            config,
            Arc::new(Semaphore::new(config.max_concurrency)),
        )
    }

    /// Classifier drawing judgment permits from a shared pool.
    pub fn with_permits(
        judge: Arc<dyn TextJudge>,
        config: &PipelineConfig,
        permits: Arc<Semaphore>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            model: ModelScorer::new(judge, config.judge_timeout(), permits),
            threshold: config.essence_threshold,
            max_concurrency: config.max_concurrency,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Classify one review against a category.
    ///
    /// The final score is the mean of the keyword and model scores; it must
    /// exceed the threshold strictly to count as essence.
    pub async fn classify(&self, review: &Review, config: &EssenceConfig) -> ClassifiedReview {
        let keyword = KeywordScorer::score(review, config);
        let model = self.model.score(review, config).await;

        let final_score = EssenceScore::clamped((keyword.score + model.score) / 2.0);
        let is_essence = final_score.value() > self.threshold;
        let classification = if is_essence {
            Classification::Essence
        } else {
            Classification::Other
        };

        let mut annotated = review.clone();
        annotated.fill_sentiment();
        annotated.essence_score = Some(final_score);
        annotated.classification = Some(classification);

        ClassifiedReview {
            review: annotated,
            is_essence,
            classification_reason: Some(model.reason),
            keyword_score: Some(keyword.score),
            model_score: Some(model.score),
            judged: model.judged,
        }
    }

    /// Classify a batch, preserving input order.
    ///
    /// Without a config every review is classified as other with score 0
    /// and the judge is never called.
    pub async fn classify_all(
        &self,
        reviews: &[Review],
        config: Option<&EssenceConfig>,
    ) -> Vec<ClassifiedReview> {
        let Some(config) = config else {
            warn!(
                "No essence configuration; classifying {} reviews as other",
                reviews.len()
            );
            return reviews.iter().map(Self::unconfigured).collect();
        };

        let start = Instant::now();
        let pending: Vec<_> = reviews
            .iter()
            .map(|review| self.classify(review, config))
            .collect();
        let classified: Vec<ClassifiedReview> = stream::iter(pending)
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let essence = classified.iter().filter(|c| c.is_essence).count();
        info!(
            "Relevance classification: {} essence / {} total for aspect '{}' in {:?}",
            essence,
            classified.len(),
            config.essence_aspect,
            start.elapsed()
        );
        classified
    }

    /// Result for a review whose category is not configured.
    pub fn unconfigured(review: &Review) -> ClassifiedReview {
        let mut annotated = review.clone();
        annotated.fill_sentiment();
        annotated.essence_score = Some(EssenceScore::ZERO);
        annotated.classification = Some(Classification::Other);
        ClassifiedReview {
            review: annotated,
            is_essence: false,
            classification_reason: Some(UNCONFIGURED_REASON.to_string()),
            keyword_score: None,
            model_score: None,
            judged: false,
        }
    }
}
