//! Immutable category → essence configuration table.

use std::collections::HashMap;
use std::path::Path;

use reviewlens_core::{Error, Result};
use tracing::info;

use crate::builtin::BUILTIN;
use crate::types::EssenceConfig;

/// Lookup table of essence configurations keyed by category id.
///
/// Ids are normalized to lowercase. Built once and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct EssenceConfigRegistry {
    configs: HashMap<String, EssenceConfig>,
}

impl EssenceConfigRegistry {
    /// A registry with no categories.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in category table.
    pub fn builtin() -> Self {
        let configs = BUILTIN
            .iter()
            .map(|(id, config)| (id.to_string(), config.clone()))
            .collect();
        Self { configs }
    }

    /// Built-in table overlaid with categories from a JSON file.
    ///
    /// The file is a map of `categoryId → EssenceConfig`; file entries
    /// replace built-ins with the same id.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let overlay = Self::from_json_str(&raw)?;
        let count = overlay.len();

        let mut registry = Self::builtin();
        registry.configs.extend(overlay.configs);

        info!(
            "Loaded {} essence categories from {} ({} total)",
            count,
            path.display(),
            registry.len()
        );
        Ok(registry)
    }

    /// Parse a JSON map of categories, without built-ins.
    ///
    /// Two ids that normalize to the same key are rejected.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let parsed: HashMap<String, EssenceConfig> = serde_json::from_str(raw)?;
        let mut registry = Self::empty();
        for (id, config) in parsed {
            if registry.configs.contains_key(&normalize(&id)) {
                return Err(Error::Config(format!(
                    "duplicate essence category '{}'",
                    normalize(&id)
                )));
            }
            registry = registry.with_category(&id, config)?;
        }
        Ok(registry)
    }

    /// Add or replace one category. Rejects configs with no essence vocabulary.
    pub fn with_category(mut self, id: &str, config: EssenceConfig) -> Result<Self> {
        let key = normalize(id);
        if key.is_empty() {
            return Err(Error::Config("essence category id is empty".into()));
        }
        if config.essence_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(Error::Config(format!(
                "essence category '{}' has no essence keywords",
                key
            )));
        }
        self.configs.insert(key, config);
        Ok(self)
    }

    pub fn get(&self, category_id: &str) -> Option<&EssenceConfig> {
        self.configs.get(&normalize(category_id))
    }

    /// Category ids in sorted order.
    pub fn category_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.configs.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

fn normalize(id: &str) -> String {
    id.trim().to_lowercase()
}
