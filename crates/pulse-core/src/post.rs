//! Post records and the aggregate views built from them.

use std::borrow::Borrow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fallback label used whenever classification is unavailable or fails.
pub const OTHER_CATEGORY: &str = "Other";

/// Polarity strictly above this value is [`Sentiment::Positive`].
pub const POSITIVE_THRESHOLD: f64 = 0.1;

/// Polarity strictly below this value is [`Sentiment::Negative`].
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// A topic label from the category taxonomy, or the synthetic `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The fallback category.
    #[must_use]
    pub fn other() -> Self {
        Self(OTHER_CATEGORY.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Source platform of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Instagram,
    Twitter,
    YouTube,
    News,
    #[default]
    Unknown,
}

impl Platform {
    /// Parse a platform name case-insensitively. Unrecognized names map to
    /// [`Platform::Unknown`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "instagram" => Platform::Instagram,
            "twitter" | "x" => Platform::Twitter,
            "youtube" => Platform::YouTube,
            "news" => Platform::News,
            _ => Platform::Unknown,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Instagram => write!(f, "Instagram"),
            Platform::Twitter => write!(f, "Twitter"),
            Platform::YouTube => write!(f, "YouTube"),
            Platform::News => write!(f, "News"),
            Platform::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Discrete sentiment label derived from polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Map a polarity to its label.
    ///
    /// Strictly greater than `0.1` is positive, strictly less than `-0.1` is
    /// negative, and everything in between (boundaries included) is neutral.
    /// NaN is neutral.
    #[must_use]
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
        }
    }
}

/// One scored and categorized social or news item.
///
/// `categories` holds exactly one element with the current single-label
/// classifier; aggregation treats it as a sequence of any length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub text: String,
    pub platform: Platform,
    pub timestamp: DateTime<Utc>,
    pub polarity: f64,
    pub sentiment: Sentiment,
    pub categories: Vec<Category>,
}

/// Daily mean sentiment for one topic, on the 0-100 display scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub sentiment: u8,
}

/// Sentiment distribution and sample content for one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub name: Category,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub content: String,
}
