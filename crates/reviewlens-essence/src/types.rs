//! Essence configuration types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Quality dimensions and vocabularies for one business category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EssenceConfig {
    /// The single dimension core to the category (e.g. taste for restaurants).
    #[serde(rename = "essenceAspectName")]
    pub essence_aspect: String,
    #[serde(rename = "otherAspectNames", default)]
    pub other_aspects: Vec<String>,
    /// Case-insensitive substring vocabulary for the essence aspect.
    #[serde(rename = "essenceKeywords")]
    pub essence_keywords: Vec<String>,
    #[serde(rename = "otherKeywords", default)]
    pub other_keywords: Vec<String>,
    /// Relative importance per aspect. Carried for reporting only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weightings: Option<BTreeMap<String, f64>>,
}

impl EssenceConfig {
    pub fn new(essence_aspect: impl Into<String>) -> Self {
        Self {
            essence_aspect: essence_aspect.into(),
            other_aspects: Vec::new(),
            essence_keywords: Vec::new(),
            other_keywords: Vec::new(),
            weightings: None,
        }
    }

    pub fn with_other_aspects(mut self, aspects: &[&str]) -> Self {
        self.other_aspects = aspects.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_essence_keywords(mut self, keywords: &[&str]) -> Self {
        self.essence_keywords = keywords.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_other_keywords(mut self, keywords: &[&str]) -> Self {
        self.other_keywords = keywords.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_weightings(mut self, weightings: &[(&str, f64)]) -> Self {
        self.weightings = Some(
            weightings
                .iter()
                .map(|(aspect, w)| (aspect.to_string(), *w))
                .collect(),
        );
        self
    }
}
