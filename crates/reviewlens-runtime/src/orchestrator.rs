//! Orchestrator: wires the registry and judge into both pipelines.

use std::sync::Arc;
use std::time::Instant;

use reviewlens_authenticity::{AuthenticityPartitioner, PartitionResult};
use reviewlens_core::{PipelineConfig, Result, Review};
use reviewlens_essence::{EssenceConfig, EssenceConfigRegistry};
use reviewlens_judge::{create_judge, JudgeConfig, TextJudge};
use reviewlens_relevance::{ClassifiedReview, RelevanceClassifier, RelevanceSummary};
use tokio::sync::Semaphore;
use tracing::info;

use crate::types::*;

/// Top-level entry point shared by every request.
///
/// Holds no per-request state; concurrent requests for different review
/// sets only share the read-only registry and the judge.
pub struct Orchestrator {
    registry: Arc<EssenceConfigRegistry>,
    judge: Arc<dyn TextJudge>,
    config: PipelineConfig,
    partitioner: AuthenticityPartitioner,
    classifier: RelevanceClassifier,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<EssenceConfigRegistry>,
        judge: Arc<dyn TextJudge>,
        config: PipelineConfig,
    ) -> Result<Self> {
        config.validate()?;
        // One pool for both pipelines so `analyze` never exceeds the bound.
        let permits = Arc::new(Semaphore::new(config.max_concurrency));
        let partitioner =
            AuthenticityPartitioner::with_permits(judge.clone(), &config, permits.clone())?;
        let classifier = RelevanceClassifier::with_permits(judge.clone(), &config, permits)?;

        info!(
            "Orchestrator initialized: categories={}, judge_available={}, max_concurrency={}",
            registry.len(),
            judge.is_available(),
            config.max_concurrency
        );

        Ok(Self {
            registry,
            judge,
            config,
            partitioner,
            classifier,
        })
    }

    /// Build the registry and judge from configuration.
    ///
    /// The registry is the built-in table, overlaid by
    /// `essence_config_file` when set.
    pub fn from_config(config: PipelineConfig, judge_config: &JudgeConfig) -> Result<Self> {
        let registry = match &config.essence_config_file {
            Some(path) => EssenceConfigRegistry::load(path)?,
            None => EssenceConfigRegistry::builtin(),
        };
        let judge = create_judge(judge_config, config.judge_timeout());
        Self::new(Arc::new(registry), judge, config)
    }

    pub fn registry(&self) -> &EssenceConfigRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Partition a review set into trusted and suspicious subsets.
    ///
    /// Fails only with `InsufficientData` on an empty set.
    pub async fn partition_authenticity(&self, reviews: &[Review]) -> Result<PartitionResult> {
        self.partitioner.partition(reviews).await
    }

    /// Classify every review against the category's essence aspect.
    ///
    /// An unknown category classifies everything as other.
    pub async fn classify_relevance(
        &self,
        reviews: &[Review],
        category_id: &str,
    ) -> Vec<ClassifiedReview> {
        let config: Option<&EssenceConfig> = self.registry.get(category_id);
        self.classifier.classify_all(reviews, config).await
    }

    pub fn summarize(&self, classified: &[ClassifiedReview]) -> RelevanceSummary {
        reviewlens_relevance::summarize(classified)
    }

    /// Run both pipelines over one review set.
    ///
    /// The two are independent and run concurrently. Their judge calls
    /// share one permit pool of `max_concurrency`.
    pub async fn analyze(&self, reviews: &[Review], category_id: &str) -> Result<ReviewAnalysis> {
        let start = Instant::now();
        let (partition, classified) = tokio::join!(
            self.partition_authenticity(reviews),
            self.classify_relevance(reviews, category_id)
        );
        let partition = partition?;
        let summary = self.summarize(&classified);

        info!(
            "Analysis complete: category={}, reviews={}, trusted={}, essence={} in {:?}",
            category_id,
            reviews.len(),
            partition.statistics.trusted_count,
            summary.essence_count,
            start.elapsed()
        );

        Ok(ReviewAnalysis {
            category_id: category_id.to_string(),
            partition,
            classified,
            summary,
        })
    }

    pub fn status(&self) -> RuntimeStatus {
        RuntimeStatus {
            judge_available: self.judge.is_available(),
            categories: self.registry.len(),
            config: self.config.clone(),
        }
    }
}
