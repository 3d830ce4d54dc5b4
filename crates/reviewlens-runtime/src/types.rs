//! Runtime types.

use reviewlens_authenticity::PartitionResult;
use reviewlens_core::PipelineConfig;
use reviewlens_relevance::{ClassifiedReview, RelevanceSummary};
use serde::Serialize;

/// Both pipelines run over one review set.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewAnalysis {
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub partition: PartitionResult,
    pub classified: Vec<ClassifiedReview>,
    pub summary: RelevanceSummary,
}

/// Runtime status information.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeStatus {
    /// Whether a real judge is configured. When false every judgment
    /// uses its fallback value.
    #[serde(rename = "judgeAvailable")]
    pub judge_available: bool,
    pub categories: usize,
    pub config: PipelineConfig,
}
