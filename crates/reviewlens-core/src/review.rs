//! Review records and the annotations the pipeline attaches to them.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Star rating, validated to 1..=5 at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidRating(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this is the top of the scale.
    pub fn is_max(self) -> bool {
        self.0 == Self::MAX
    }
}

impl TryFrom<u8> for Rating {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Heuristic 0..=100 confidence that a review is genuine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TrustScore(u8);

impl TrustScore {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(Error::InvalidTrustScore(value))
        }
    }

    /// For internal constants; input values go through `new`.
    pub const fn saturating(value: u8) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for TrustScore {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TrustScore> for u8 {
    fn from(score: TrustScore) -> Self {
        score.0
    }
}

/// Share of a review devoted to the essence aspect, 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct EssenceScore(f64);

impl EssenceScore {
    pub const ZERO: Self = Self(0.0);

    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidEssenceScore(value))
        }
    }

    /// Clamp a computed score into range. NaN becomes 0.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for EssenceScore {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<EssenceScore> for f64 {
    fn from(score: EssenceScore) -> Self {
        score.0
    }
}

/// Where a review was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    MapService,
    Blog,
    Social,
    ReviewSite,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MapService => write!(f, "map_service"),
            Self::Blog => write!(f, "blog"),
            Self::Social => write!(f, "social"),
            Self::ReviewSite => write!(f, "review_site"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Derive a sentiment from the star rating alone.
    pub fn from_rating(rating: Rating) -> Self {
        match rating.value() {
            4..=5 => Self::Positive,
            3 => Self::Neutral,
            _ => Self::Negative,
        }
    }
}

/// Whether a review speaks to the category's essence aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Essence,
    Other,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Essence => write!(f, "essence"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Which end of the rating distribution a suspicious review sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extremity {
    High,
    Low,
}

impl Extremity {
    /// Risk flag attached when a suspicion judgment could not be obtained.
    pub fn fallback_flag(self) -> &'static str {
        match self {
            Self::High => "potential_fake",
            Self::Low => "potential_attack",
        }
    }
}

impl std::fmt::Display for Extremity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// A collected review. The collected fields are never changed by the
/// pipeline; annotations are written onto copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    #[serde(alias = "source")]
    pub platform: Platform,
    /// Calendar date; RFC 3339 timestamps are accepted and truncated.
    #[serde(deserialize_with = "deserialize_review_date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub rating: Rating,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default, rename = "trustScore", skip_serializing_if = "Option::is_none")]
    pub trust_score: Option<TrustScore>,
    #[serde(default, rename = "riskFlags", skip_serializing_if = "Vec::is_empty")]
    pub risk_flags: Vec<String>,
    #[serde(default, rename = "essenceScore", skip_serializing_if = "Option::is_none")]
    pub essence_score: Option<EssenceScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
}

impl Review {
    /// Build an unannotated review. Fails on an out-of-range rating.
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        platform: Platform,
        date: NaiveDate,
        rating: u8,
        content: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            author: author.into(),
            platform,
            date,
            title: None,
            rating: Rating::new(rating)?,
            content: content.into(),
            sentiment: None,
            keywords: Vec::new(),
            trust_score: None,
            risk_flags: Vec::new(),
            essence_score: None,
            classification: None,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Collected sentiment, or one derived from the rating.
    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
            .unwrap_or_else(|| Sentiment::from_rating(self.rating))
    }

    /// Title and content joined, the text handed to scorers and judges.
    pub fn text(&self) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => format!("{}\n{}", title, self.content),
            _ => self.content.clone(),
        }
    }

    /// Record the rating-derived sentiment when none was collected.
    pub fn fill_sentiment(&mut self) {
        self.sentiment = Some(self.sentiment());
    }
}

/// Parse a collected date: `YYYY-MM-DD`, RFC 3339, or a naive timestamp.
pub fn parse_review_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

fn deserialize_review_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_review_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid review date '{}' (expected YYYY-MM-DD or RFC 3339)",
            raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(5).unwrap().value(), 5);
        assert!(Rating::new(5).unwrap().is_max());
        assert!(!Rating::new(4).unwrap().is_max());
    }

    #[test]
    fn test_out_of_range_rating_rejected_on_deserialize() {
        let json = r#"{"id":"r1","author":"a","platform":"blog","date":"2024-05-01","rating":7,"content":"x"}"#;
        let err = serde_json::from_str::<Review>(json).unwrap_err();
        assert!(err.to_string().contains("Invalid rating"));
    }

    #[test]
    fn test_trust_score_bounds() {
        assert!(TrustScore::new(100).is_ok());
        assert!(matches!(TrustScore::new(101), Err(Error::InvalidTrustScore(101))));
    }

    #[test]
    fn test_deserialize_with_source_alias_and_unknown_platform() {
        let json = r#"{"id":"r1","author":"a","source":"kakao","date":"2024-05-01","rating":4,"content":"good"}"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.platform, Platform::Other);
        assert_eq!(review.rating.value(), 4);
        assert!(review.trust_score.is_none());
        assert!(review.keywords.is_empty());
    }

    #[test]
    fn test_annotations_serialize_camel_case() {
        let mut review = Review::new("r1", "a", Platform::MapService, date(), 5, "tasty").unwrap();
        review.trust_score = Some(TrustScore::new(80).unwrap());
        review.risk_flags = vec!["vague".into()];
        review.classification = Some(Classification::Essence);
        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(value["trustScore"], 80);
        assert_eq!(value["riskFlags"][0], "vague");
        assert_eq!(value["classification"], "essence");
        assert_eq!(value["platform"], "map_service");
        assert!(value.get("essenceScore").is_none());
    }

    #[test]
    fn test_sentiment_derived_from_rating() {
        let review = Review::new("r1", "a", Platform::Blog, date(), 2, "meh").unwrap();
        assert_eq!(review.sentiment(), Sentiment::Negative);
        let mut review = Review::new("r2", "a", Platform::Blog, date(), 2, "meh").unwrap();
        review.sentiment = Some(Sentiment::Neutral);
        assert_eq!(review.sentiment(), Sentiment::Neutral);
    }

    #[test]
    fn test_text_includes_title() {
        let review = Review::new("r1", "a", Platform::Blog, date(), 4, "Broth was rich")
            .unwrap()
            .with_title("Great ramen")
            .with_keywords(vec!["ramen".into()]);
        assert_eq!(review.text(), "Great ramen\nBroth was rich");
        assert_eq!(review.keywords, vec!["ramen"]);
    }

    #[test]
    fn test_essence_score_range() {
        assert!(matches!(EssenceScore::new(1.2), Err(Error::InvalidEssenceScore(_))));
        assert!(EssenceScore::new(f64::NAN).is_err());
        assert_eq!(EssenceScore::new(0.7).unwrap().value(), 0.7);
        assert_eq!(EssenceScore::clamped(1.4).value(), 1.0);
        assert_eq!(EssenceScore::clamped(f64::NAN), EssenceScore::ZERO);
    }

    #[test]
    fn test_out_of_range_essence_score_rejected_on_deserialize() {
        let json = r#"{"id":"r1","author":"a","platform":"blog","date":"2024-05-01","rating":4,"content":"x","essenceScore":42.0}"#;
        let err = serde_json::from_str::<Review>(json).unwrap_err();
        assert!(err.to_string().contains("Invalid essence score"));

        let json = r#"{"id":"r1","author":"a","platform":"blog","date":"2024-05-01","rating":4,"content":"x","essenceScore":0.25}"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.essence_score.map(EssenceScore::value), Some(0.25));
    }

    #[test]
    fn test_fill_sentiment_keeps_collected_value() {
        let mut derived = Review::new("r1", "a", Platform::Blog, date(), 5, "x").unwrap();
        derived.fill_sentiment();
        assert_eq!(derived.sentiment, Some(Sentiment::Positive));

        let mut collected = Review::new("r2", "a", Platform::Blog, date(), 5, "x").unwrap();
        collected.sentiment = Some(Sentiment::Negative);
        collected.fill_sentiment();
        assert_eq!(collected.sentiment, Some(Sentiment::Negative));
    }

    #[test]
    fn test_date_accepts_timestamps() {
        let base = r#"{"id":"r1","author":"a","platform":"blog","rating":4,"content":"x","date":"#;
        for raw in [
            "\"2024-05-01\"",
            "\"2024-05-01T23:10:00+09:00\"",
            "\"2024-05-01T08:00:00Z\"",
            "\"2024-05-01T08:00:00\"",
        ] {
            let review: Review = serde_json::from_str(&format!("{}{}}}", base, raw)).unwrap();
            assert_eq!(review.date, date(), "date {}", raw);
        }
        let err = serde_json::from_str::<Review>(&format!("{}\"yesterday\"}}", base)).unwrap_err();
        assert!(err.to_string().contains("invalid review date"));
    }
}
