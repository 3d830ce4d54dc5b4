//! Shared application state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reviewlens_core::PipelineConfig;
use reviewlens_judge::JudgeConfig;
use reviewlens_runtime::Orchestrator;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub judge_config: JudgeConfig,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: PipelineConfig, judge_config: JudgeConfig) -> anyhow::Result<Self> {
        let orchestrator = Orchestrator::from_config(config, &judge_config)?;
        Ok(Self::with_orchestrator(orchestrator, judge_config))
    }

    pub fn with_orchestrator(orchestrator: Orchestrator, judge_config: JudgeConfig) -> Self {
        Self {
            orchestrator,
            judge_config,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<AppState>;
