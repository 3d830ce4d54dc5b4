//! Strict parsing of model replies into judgment types.
//!
//! A reply is accepted only if it contains one JSON object with every
//! required field present with the right type and range. Anything else
//! is `Malformed` or `OutOfRange`; partially parsed data is never used.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::JudgeError;
use crate::types::{RelevanceJudgment, SuspicionJudgment};

static FENCED_JSON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(\{.*\})\s*```").unwrap());

/// Longest risk flag kept; models occasionally return sentences.
const MAX_FLAG_LEN: usize = 64;

#[derive(Deserialize)]
struct RawSuspicion {
    #[serde(rename = "trustScore", alias = "trust_score")]
    trust_score: f64,
    #[serde(rename = "riskFlags", alias = "risk_flags", alias = "riskFactors")]
    risk_flags: Vec<String>,
}

#[derive(Deserialize)]
struct RawRelevance {
    #[serde(alias = "essenceScore", alias = "essence_score")]
    score: f64,
    reason: String,
}

/// Parse a suspicion reply.
pub fn parse_suspicion(reply: &str) -> Result<SuspicionJudgment, JudgeError> {
    let raw: RawSuspicion = parse_object(reply)?;

    if !raw.trust_score.is_finite() || !(0.0..=100.0).contains(&raw.trust_score) {
        return Err(JudgeError::OutOfRange(format!(
            "trustScore {} outside 0-100",
            raw.trust_score
        )));
    }

    let mut risk_flags: Vec<String> = Vec::with_capacity(raw.risk_flags.len());
    for flag in raw.risk_flags {
        let flag = flag.trim();
        if flag.is_empty() || flag.chars().count() > MAX_FLAG_LEN {
            continue;
        }
        if !risk_flags.iter().any(|f| f == flag) {
            risk_flags.push(flag.to_string());
        }
    }

    Ok(SuspicionJudgment {
        trust_score: raw.trust_score.round() as u8,
        risk_flags,
    })
}

/// Parse a relevance reply.
pub fn parse_relevance(reply: &str) -> Result<RelevanceJudgment, JudgeError> {
    let raw: RawRelevance = parse_object(reply)?;

    if !raw.score.is_finite() || !(0.0..=1.0).contains(&raw.score) {
        return Err(JudgeError::OutOfRange(format!(
            "score {} outside 0.0-1.0",
            raw.score
        )));
    }

    Ok(RelevanceJudgment {
        score: raw.score,
        reason: raw.reason.trim().to_string(),
    })
}

fn parse_object<T: for<'de> Deserialize<'de>>(reply: &str) -> Result<T, JudgeError> {
    let json = extract_json_object(reply)
        .ok_or_else(|| JudgeError::Malformed("no JSON object in reply".into()))?;
    serde_json::from_str(json).map_err(|e| JudgeError::Malformed(e.to_string()))
}

/// Locate the JSON object in a reply, inside a code fence or bare.
fn extract_json_object(reply: &str) -> Option<&str> {
    if let Some(caps) = FENCED_JSON_RE.captures(reply) {
        return caps.get(1).map(|m| m.as_str());
    }
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}
