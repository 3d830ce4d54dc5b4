//! External LLM provider completion calls.
//!
//! OpenAI and Groq share the chat-completions format. Anthropic uses the
//! Messages API with the system prompt passed separately.

use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::error::JudgeError;
use crate::types::{ChatMessage, LLMProvider};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";

/// Run one non-streaming completion and return the reply text.
pub async fn complete(
    client: &Client,
    provider: LLMProvider,
    messages: &[ChatMessage],
    model: &str,
    api_key: &str,
    temperature: f64,
    max_tokens: usize,
) -> Result<String, JudgeError> {
    match provider {
        LLMProvider::OpenAI => {
            complete_openai_compat(client, OPENAI_URL, messages, model, api_key, temperature, max_tokens)
                .await
        }
        LLMProvider::Groq => {
            complete_openai_compat(client, GROQ_URL, messages, model, api_key, temperature, max_tokens)
                .await
        }
        LLMProvider::Anthropic => {
            complete_anthropic(client, messages, model, api_key, temperature, max_tokens).await
        }
    }
}

async fn complete_openai_compat(
    client: &Client,
    url: &str,
    messages: &[ChatMessage],
    model: &str,
    api_key: &str,
    temperature: f64,
    max_tokens: usize,
) -> Result<String, JudgeError> {
    let msgs: Vec<serde_json::Value> = messages
        .iter()
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();

    let body = json!({
        "model": model,
        "messages": msgs,
        "temperature": temperature,
        "max_tokens": max_tokens,
        "response_format": {"type": "json_object"},
    });

    debug!("Requesting completion from {} with model {}", url, model);

    let response = client
        .post(url)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    let parsed = read_json(response).await?;
    parsed["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| JudgeError::Malformed("completion has no message content".into()))
}

async fn complete_anthropic(
    client: &Client,
    messages: &[ChatMessage],
    model: &str,
    api_key: &str,
    temperature: f64,
    max_tokens: usize,
) -> Result<String, JudgeError> {
    let system_msg: Option<&str> = messages
        .iter()
        .find(|m| m.role == "system")
        .map(|m| m.content.as_str());

    let conv_msgs: Vec<serde_json::Value> = messages
        .iter()
        .filter(|m| m.role != "system")
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();

    let mut body = json!({
        "model": model,
        "messages": conv_msgs,
        "temperature": temperature,
        "max_tokens": max_tokens,
    });

    if let Some(sys) = system_msg {
        body["system"] = json!(sys);
    }

    debug!("Requesting completion from Anthropic with model {}", model);

    let response = client
        .post(ANTHROPIC_URL)
        .header("x-api-key", api_key)
        .header("anthropic-version", "2023-06-01")
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    let parsed = read_json(response).await?;
    let text: String = parsed["content"]
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter(|b| b["type"] == "text")
                .filter_map(|b| b["text"].as_str())
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(JudgeError::Malformed("completion has no text blocks".into()));
    }
    Ok(text)
}

async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, JudgeError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(JudgeError::Api {
            status: status.as_u16(),
            body,
        });
    }
    response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| JudgeError::Malformed(format!("response body is not JSON: {}", e)))
}
