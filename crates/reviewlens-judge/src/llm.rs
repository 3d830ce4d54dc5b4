//! LLM-backed `TextJudge`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reviewlens_core::Extremity;

use crate::config::JudgeConfig;
use crate::error::JudgeError;
use crate::judge::TextJudge;
use crate::parse::{parse_relevance, parse_suspicion};
use crate::prompts::{relevance_prompt, suspicion_prompt, SYSTEM_PROMPT};
use crate::providers;
use crate::types::{ChatMessage, LLMProvider, RelevanceJudgment, SuspicionJudgment};

/// Judge that prompts an external chat model and parses its JSON reply.
pub struct LlmJudge {
    client: Client,
    provider: LLMProvider,
    model: String,
    api_key: String,
    temperature: f64,
    max_tokens: usize,
}

impl LlmJudge {
    pub fn new(
        provider: LLMProvider,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, JudgeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            provider,
            model: model.into(),
            api_key: api_key.into(),
            temperature: 0.2,
            max_tokens: 300,
        })
    }

    /// Build from config. Returns None when no provider has a key.
    pub fn from_config(config: &JudgeConfig, timeout: Duration) -> Option<Self> {
        let (provider, model, api_key) = config.resolve_provider()?;
        match Self::new(provider, model, api_key, timeout) {
            Ok(judge) => Some(judge.with_sampling(config.temperature, config.max_tokens)),
            Err(e) => {
                tracing::error!("Failed to build HTTP client for judge: {}", e);
                None
            }
        }
    }

    pub fn with_sampling(mut self, temperature: f64, max_tokens: usize) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn provider(&self) -> LLMProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn ask(&self, prompt: String) -> Result<String, JudgeError> {
        let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];
        providers::complete(
            &self.client,
            self.provider,
            &messages,
            &self.model,
            &self.api_key,
            self.temperature,
            self.max_tokens,
        )
        .await
    }
}

#[async_trait]
impl TextJudge for LlmJudge {
    async fn judge_suspicion(
        &self,
        review_text: &str,
        rating: u8,
        extremity: Extremity,
    ) -> Result<SuspicionJudgment, JudgeError> {
        let reply = self
            .ask(suspicion_prompt(review_text, rating, extremity))
            .await?;
        parse_suspicion(&reply)
    }

    async fn judge_relevance(
        &self,
        review_text: &str,
        essence_aspect: &str,
        other_aspects: &[String],
    ) -> Result<RelevanceJudgment, JudgeError> {
        let reply = self
            .ask(relevance_prompt(review_text, essence_aspect, other_aspects))
            .await?;
        parse_relevance(&reply)
    }

    fn is_available(&self) -> bool {
        true
    }
}
