//! Judge configuration and provider selection.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::LLMProvider;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-20241022";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Stored judge configuration (JSON file, API keys fall back to env vars).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeConfig {
    #[serde(default = "default_preferred")]
    pub preferred_provider: String,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    #[serde(default = "default_groq_model")]
    pub groq_model: String,
    /// Judgments should be stable; keep this low.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

fn default_preferred() -> String {
    "auto".into()
}
fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.into()
}
fn default_anthropic_model() -> String {
    DEFAULT_ANTHROPIC_MODEL.into()
}
fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.into()
}
fn default_temperature() -> f64 {
    0.2
}
fn default_max_tokens() -> usize {
    300
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            preferred_provider: default_preferred(),
            openai_api_key: None,
            anthropic_api_key: None,
            groq_api_key: None,
            openai_model: default_openai_model(),
            anthropic_model: default_anthropic_model(),
            groq_model: default_groq_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Judge config as reported to clients (keys masked).
#[derive(Debug, Clone, Serialize)]
pub struct JudgeConfigResponse {
    #[serde(rename = "preferredProvider")]
    pub preferred_provider: String,
    #[serde(rename = "openaiConfigured")]
    pub openai_configured: bool,
    #[serde(rename = "anthropicConfigured")]
    pub anthropic_configured: bool,
    #[serde(rename = "groqConfigured")]
    pub groq_configured: bool,
    #[serde(rename = "activeProvider")]
    pub active_provider: Option<String>,
    #[serde(rename = "activeModel")]
    pub active_model: Option<String>,
}

impl JudgeConfig {
    /// Load config from file, falling back to env vars and defaults.
    pub fn load(config_path: &Path) -> Self {
        let mut config: JudgeConfig = std::fs::read_to_string(config_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        config.apply_env();
        config
    }

    /// Defaults plus API keys from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if self.openai_api_key.is_none() {
            self.openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        if self.anthropic_api_key.is_none() {
            self.anthropic_api_key = std::env::var("ANTHROPIC_API_KEY").ok();
        }
        if self.groq_api_key.is_none() {
            self.groq_api_key = std::env::var("GROQ_API_KEY").ok();
        }
    }

    /// Resolve which provider, model and key to use.
    pub fn resolve_provider(&self) -> Option<(LLMProvider, String, String)> {
        if self.preferred_provider != "auto" {
            return match self.preferred_provider.as_str() {
                "openai" => self
                    .openai_api_key
                    .as_ref()
                    .map(|k| (LLMProvider::OpenAI, self.openai_model.clone(), k.clone())),
                "anthropic" => self
                    .anthropic_api_key
                    .as_ref()
                    .map(|k| (LLMProvider::Anthropic, self.anthropic_model.clone(), k.clone())),
                "groq" => self
                    .groq_api_key
                    .as_ref()
                    .map(|k| (LLMProvider::Groq, self.groq_model.clone(), k.clone())),
                _ => None,
            };
        }

        // Auto mode: Anthropic > Groq > OpenAI
        if let Some(k) = &self.anthropic_api_key {
            return Some((LLMProvider::Anthropic, self.anthropic_model.clone(), k.clone()));
        }
        if let Some(k) = &self.groq_api_key {
            return Some((LLMProvider::Groq, self.groq_model.clone(), k.clone()));
        }
        if let Some(k) = &self.openai_api_key {
            return Some((LLMProvider::OpenAI, self.openai_model.clone(), k.clone()));
        }

        None
    }

    pub fn to_response(&self) -> JudgeConfigResponse {
        let resolved = self.resolve_provider();
        JudgeConfigResponse {
            preferred_provider: self.preferred_provider.clone(),
            openai_configured: self.openai_api_key.is_some(),
            anthropic_configured: self.anthropic_api_key.is_some(),
            groq_configured: self.groq_api_key.is_some(),
            active_provider: resolved.as_ref().map(|(p, _, _)| p.to_string()),
            active_model: resolved.map(|(_, m, _)| m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn keyed() -> JudgeConfig {
        JudgeConfig {
            openai_api_key: Some("sk-o".into()),
            groq_api_key: Some("gsk".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_auto_prefers_groq_over_openai() {
        let (provider, model, key) = keyed().resolve_provider().unwrap();
        assert_eq!(provider, LLMProvider::Groq);
        assert_eq!(model, DEFAULT_GROQ_MODEL);
        assert_eq!(key, "gsk");
    }

    #[test]
    fn test_explicit_provider_without_key_resolves_none() {
        let config = JudgeConfig {
            preferred_provider: "anthropic".into(),
            ..keyed()
        };
        assert!(config.resolve_provider().is_none());
    }

    #[test]
    fn test_no_keys_resolves_none() {
        assert!(JudgeConfig::default().resolve_provider().is_none());
    }

    #[test]
    fn test_response_masks_keys() {
        let response = keyed().to_response();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["activeProvider"], "groq");
        assert_eq!(value["openaiConfigured"], true);
        assert!(!value.to_string().contains("sk-o"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"preferred_provider": "openai", "openai_api_key": "sk-file", "temperature": 0.0}}"#
        )
        .unwrap();
        let config = JudgeConfig::load(file.path());
        assert_eq!(config.preferred_provider, "openai");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, 300);
        let (provider, _, key) = config.resolve_provider().unwrap();
        assert_eq!(provider, LLMProvider::OpenAI);
        assert_eq!(key, "sk-file");
    }
}
