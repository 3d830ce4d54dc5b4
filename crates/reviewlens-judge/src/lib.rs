//! TextJudge: the external text-generation capability behind the
//! suspicion and relevance judgments.
//!
//! `LlmJudge` calls an OpenAI, Anthropic or Groq chat endpoint and parses
//! the reply through a strict schema. Without a configured provider,
//! `NoopJudge` is used and every judgment reports `Unavailable`, which
//! callers turn into their documented fallback values.

pub mod config;
pub mod error;
pub mod judge;
pub mod llm;
pub mod parse;
pub mod prompts;
pub mod providers;
pub mod testing;
pub mod types;

pub use config::JudgeConfig;
pub use error::JudgeError;
pub use judge::{NoopJudge, TextJudge};
pub use llm::LlmJudge;
pub use types::*;

use std::sync::Arc;
use std::time::Duration;

/// Create the best available judge for the given configuration.
///
/// Uses the resolved LLM provider when an API key is present, otherwise
/// falls back to `NoopJudge`.
pub fn create_judge(config: &JudgeConfig, timeout: Duration) -> Arc<dyn TextJudge> {
    match LlmJudge::from_config(config, timeout) {
        Some(judge) => {
            tracing::info!(
                "Using {} judge (model={})",
                judge.provider(),
                judge.model()
            );
            Arc::new(judge)
        }
        None => {
            tracing::warn!("No LLM provider configured. All judgments will use fallback values.");
            Arc::new(NoopJudge)
        }
    }
}
