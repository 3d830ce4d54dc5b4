//! Judge request/response types.

use serde::{Deserialize, Serialize};

/// LLM provider identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    OpenAI,
    Anthropic,
    Groq,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Groq => write!(f, "groq"),
        }
    }
}

/// Chat message sent to a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Validated fraud-signal judgment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuspicionJudgment {
    /// 0..=100, higher is more likely genuine.
    #[serde(rename = "trustScore")]
    pub trust_score: u8,
    #[serde(rename = "riskFlags")]
    pub risk_flags: Vec<String>,
}

/// Validated essence-relevance judgment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevanceJudgment {
    /// 0.0..=1.0, how much the review addresses the essence aspect.
    pub score: f64,
    pub reason: String,
}
