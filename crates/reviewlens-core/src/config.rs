//! Pipeline configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunables shared by the authenticity and relevance stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum judgments in flight per request.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Per-judgment timeout in milliseconds.
    #[serde(default = "default_judge_timeout_ms")]
    pub judge_timeout_ms: u64,
    /// Trust score given to reviews that are never analyzed.
    #[serde(default = "default_trust_score")]
    pub default_trust_score: u8,
    /// Size of the top and bottom candidate slices, in percent of the set.
    #[serde(default = "default_slice_percent")]
    pub extreme_slice_percent: usize,
    /// Final scores strictly above this are classified as essence.
    #[serde(default = "default_essence_threshold")]
    pub essence_threshold: f64,
    /// Optional JSON file overlaying the built-in essence table.
    #[serde(default)]
    pub essence_config_file: Option<PathBuf>,
}

fn default_max_concurrency() -> usize {
    4
}
fn default_judge_timeout_ms() -> u64 {
    20_000
}
fn default_trust_score() -> u8 {
    75
}
fn default_slice_percent() -> usize {
    5
}
fn default_essence_threshold() -> f64 {
    0.6
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            judge_timeout_ms: default_judge_timeout_ms(),
            default_trust_score: default_trust_score(),
            extreme_slice_percent: default_slice_percent(),
            essence_threshold: default_essence_threshold(),
            essence_config_file: None,
        }
    }
}

impl PipelineConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = env_parse::<usize>("REVIEWLENS_MAX_CONCURRENCY")? {
            config.max_concurrency = v;
        }
        if let Some(v) = env_parse::<u64>("REVIEWLENS_JUDGE_TIMEOUT_MS")? {
            config.judge_timeout_ms = v;
        }
        if let Some(v) = env_parse::<u8>("REVIEWLENS_DEFAULT_TRUST")? {
            config.default_trust_score = v;
        }
        if let Some(v) = env_parse::<usize>("REVIEWLENS_SLICE_PERCENT")? {
            config.extreme_slice_percent = v;
        }
        if let Some(v) = env_parse::<f64>("REVIEWLENS_ESSENCE_THRESHOLD")? {
            config.essence_threshold = v;
        }
        if let Ok(path) = std::env::var("REVIEWLENS_ESSENCE_CONFIG") {
            config.essence_config_file = Some(PathBuf::from(path));
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(Error::Config("max_concurrency must be at least 1".into()));
        }
        if self.judge_timeout_ms == 0 {
            return Err(Error::Config("judge_timeout_ms must be positive".into()));
        }
        if self.default_trust_score > 100 {
            return Err(Error::Config(format!(
                "default_trust_score {} is above 100",
                self.default_trust_score
            )));
        }
        if self.extreme_slice_percent > 50 {
            return Err(Error::Config(format!(
                "extreme_slice_percent {} is above 50",
                self.extreme_slice_percent
            )));
        }
        if !(0.0..=1.0).contains(&self.essence_threshold) {
            return Err(Error::Config(format!(
                "essence_threshold {} is outside 0.0-1.0",
                self.essence_threshold
            )));
        }
        Ok(())
    }

    pub fn judge_timeout(&self) -> Duration {
        Duration::from_millis(self.judge_timeout_ms)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has invalid value {:?}", key, raw))),
        Err(_) => Ok(None),
    }
}
