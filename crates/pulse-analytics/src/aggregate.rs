//! Topic-level views over scored and categorized posts.
//!
//! Every view first explodes posts per category, so a post with N categories
//! contributes N rows. The `try_*` functions surface [`AggregationError`];
//! the plain functions are the public boundary and degrade to an empty
//! result, logging the cause.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use pulse_core::{Category, Post, Sentiment, TopicSummary, TrendPoint};
use serde::Serialize;

use crate::error::AggregationError;

/// Default character cap on [`TopicSummary::content`].
pub const DEFAULT_CONTENT_LIMIT: usize = 3000;

/// Default number of date buckets returned by [`topic_trend`].
pub const DEFAULT_TREND_WINDOW: usize = 7;

/// One post viewed under one of its categories.
#[derive(Debug, Clone, Copy)]
pub struct ExplodedRow<'a> {
    pub category: &'a Category,
    pub post: &'a Post,
}

/// Expand each post into one row per category, validating as it goes.
///
/// # Errors
///
/// Returns [`AggregationError::MissingCategory`] for a post with no
/// categories and [`AggregationError::InvalidPolarity`] for a polarity that
/// is non-finite or outside `[-1, 1]`.
pub fn explode(posts: &[Post]) -> Result<Vec<ExplodedRow<'_>>, AggregationError> {
    let mut rows = Vec::with_capacity(posts.len());
    for post in posts {
        if post.categories.is_empty() {
            return Err(AggregationError::MissingCategory {
                text: post.text.clone(),
            });
        }
        if !post.polarity.is_finite() || !(-1.0..=1.0).contains(&post.polarity) {
            return Err(AggregationError::InvalidPolarity {
                polarity: post.polarity,
            });
        }
        rows.extend(post.categories.iter().map(|category| ExplodedRow { category, post }));
    }
    Ok(rows)
}

/// Polarity on the 0-100 display scale, floored.
///
/// Expects a polarity already validated to `[-1, 1]`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn normalized_score(polarity: f64) -> u8 {
    ((polarity + 1.0) * 50.0).floor().clamp(0.0, 100.0) as u8
}

fn truncate_chars(text: &mut String, limit: usize) {
    if let Some((idx, _)) = text.char_indices().nth(limit) {
        text.truncate(idx);
    }
}

#[derive(Default)]
struct SentimentCounts {
    positive: usize,
    negative: usize,
    neutral: usize,
}

impl SentimentCounts {
    fn add(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// `(positive, negative, neutral)` shares; all zero when empty.
    #[allow(clippy::cast_precision_loss)]
    fn shares(&self) -> (f64, f64, f64) {
        let total = self.total();
        if total == 0 {
            return (0.0, 0.0, 0.0);
        }
        let total = total as f64;
        (
            self.positive as f64 / total,
            self.negative as f64 / total,
            self.neutral as f64 / total,
        )
    }
}

/// Per-topic sentiment shares and joined sample text, ordered by topic name.
///
/// `content` is every text in the topic joined with single spaces, then cut
/// to the first `content_limit` characters.
///
/// # Errors
///
/// See [`explode`].
pub fn try_summarize_topics(
    posts: &[Post],
    content_limit: usize,
) -> Result<Vec<TopicSummary>, AggregationError> {
    let mut groups: BTreeMap<&Category, (SentimentCounts, Vec<&str>)> = BTreeMap::new();
    for row in explode(posts)? {
        let (counts, texts) = groups.entry(row.category).or_default();
        counts.add(row.post.sentiment);
        texts.push(&row.post.text);
    }

    Ok(groups
        .into_iter()
        .map(|(category, (counts, texts))| {
            let (positive, negative, neutral) = counts.shares();
            let mut content = texts.join(" ");
            truncate_chars(&mut content, content_limit);
            TopicSummary {
                name: category.clone(),
                positive,
                negative,
                neutral,
                content,
            }
        })
        .collect())
}

/// [`try_summarize_topics`], degrading to an empty list on failure.
#[must_use]
pub fn summarize_topics(posts: &[Post], content_limit: usize) -> Vec<TopicSummary> {
    try_summarize_topics(posts, content_limit).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "topic summary failed; returning no topics");
        Vec::new()
    })
}

/// Per-date `(sum, count)` of normalized scores.
type Buckets = BTreeMap<NaiveDate, (u64, u64)>;

fn bucket(buckets: &mut Buckets, post: &Post) {
    let entry = buckets.entry(post.timestamp.date_naive()).or_insert((0, 0));
    entry.0 += u64::from(normalized_score(post.polarity));
    entry.1 += 1;
}

fn to_points(buckets: Buckets) -> Vec<TrendPoint> {
    buckets
        .into_iter()
        .map(|(date, (sum, count))| TrendPoint {
            date,
            sentiment: u8::try_from(sum / count).unwrap_or(100),
        })
        .collect()
}

/// Daily sentiment series for every topic.
///
/// Each post is normalized with [`normalized_score`] before averaging, and
/// the daily mean is floored again. Series are ordered by date with one
/// point per date.
///
/// # Errors
///
/// See [`explode`].
pub fn try_daily_trends(
    posts: &[Post],
) -> Result<BTreeMap<Category, Vec<TrendPoint>>, AggregationError> {
    let mut by_topic: BTreeMap<&Category, Buckets> = BTreeMap::new();
    for row in explode(posts)? {
        bucket(by_topic.entry(row.category).or_default(), row.post);
    }
    Ok(by_topic
        .into_iter()
        .map(|(category, buckets)| (category.clone(), to_points(buckets)))
        .collect())
}

/// [`try_daily_trends`], degrading to an empty map on failure.
#[must_use]
pub fn daily_trends(posts: &[Post]) -> BTreeMap<Category, Vec<TrendPoint>> {
    try_daily_trends(posts).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "daily trends failed; returning no trends");
        BTreeMap::new()
    })
}

/// The last `window` date buckets of one topic's daily series.
///
/// "Last" is by date order, not by distance from today. An unknown topic
/// yields an empty series.
///
/// # Errors
///
/// See [`explode`].
pub fn try_topic_trend(
    posts: &[Post],
    topic: &str,
    window: usize,
) -> Result<Vec<TrendPoint>, AggregationError> {
    let mut buckets = Buckets::new();
    for row in explode(posts)? {
        if row.category.as_str() == topic {
            bucket(&mut buckets, row.post);
        }
    }
    let points = to_points(buckets);
    let skip = points.len().saturating_sub(window);
    Ok(points.into_iter().skip(skip).collect())
}

/// [`try_topic_trend`], degrading to an empty series on failure.
#[must_use]
pub fn topic_trend(posts: &[Post], topic: &str, window: usize) -> Vec<TrendPoint> {
    try_topic_trend(posts, topic, window).unwrap_or_else(|e| {
        tracing::warn!(error = %e, topic, "topic trend failed; returning empty series");
        Vec::new()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PulseLabel {
    Optimistic,
    Neutral,
    Pessimistic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PulseTrend {
    Up,
    Down,
    Flat,
}

/// Overall mood across all posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PulseIndex {
    /// 0-100; 50 is neutral.
    pub index: u8,
    pub label: PulseLabel,
    pub trend: PulseTrend,
}

impl PulseIndex {
    /// The index reported when there are no posts.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            index: 50,
            label: PulseLabel::Neutral,
            trend: PulseTrend::Flat,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded_score(polarity: f64) -> u8 {
    ((polarity + 1.0) * 50.0).round().clamp(0.0, 100.0) as u8
}

/// Compute the pulse index.
///
/// The index is the rounded mean of each post's rounded 0-100 score. Above
/// 60 is optimistic, below 40 pessimistic. The trend compares the last two
/// posts in sequence order.
///
/// # Errors
///
/// Returns [`AggregationError::InvalidPolarity`] for a non-finite or
/// out-of-range polarity.
pub fn try_pulse_index(posts: &[Post]) -> Result<PulseIndex, AggregationError> {
    if let Some(post) = posts
        .iter()
        .find(|p| !p.polarity.is_finite() || !(-1.0..=1.0).contains(&p.polarity))
    {
        return Err(AggregationError::InvalidPolarity {
            polarity: post.polarity,
        });
    }
    if posts.is_empty() {
        return Ok(PulseIndex::neutral());
    }

    let scores: Vec<u8> = posts.iter().map(|p| rounded_score(p.polarity)).collect();
    let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = sum as f64 / scores.len() as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = mean.round().clamp(0.0, 100.0) as u8;

    let label = if index > 60 {
        PulseLabel::Optimistic
    } else if index < 40 {
        PulseLabel::Pessimistic
    } else {
        PulseLabel::Neutral
    };

    let trend = match scores.as_slice() {
        [.., previous, last] if last > previous => PulseTrend::Up,
        [.., _, _] => PulseTrend::Down,
        _ => PulseTrend::Flat,
    };

    Ok(PulseIndex {
        index,
        label,
        trend,
    })
}

/// [`try_pulse_index`], degrading to [`PulseIndex::neutral`] on failure.
#[must_use]
pub fn pulse_index(posts: &[Post]) -> PulseIndex {
    try_pulse_index(posts).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "pulse index failed; reporting neutral");
        PulseIndex::neutral()
    })
}

/// Sentiment shares for a single topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicBreakdown {
    pub topic: Category,
    pub count: usize,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl fmt::Display for TopicBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Topic '{}' sentiment breakdown: Positive {:.1}%, Negative {:.1}%, Neutral {:.1}%.",
            self.topic,
            self.positive * 100.0,
            self.negative * 100.0,
            self.neutral * 100.0
        )
    }
}

/// Breakdown for `topic`, or `None` when no post carries it.
///
/// # Errors
///
/// See [`explode`].
pub fn try_topic_breakdown(
    posts: &[Post],
    topic: &str,
) -> Result<Option<TopicBreakdown>, AggregationError> {
    let mut counts = SentimentCounts::default();
    for row in explode(posts)? {
        if row.category.as_str() == topic {
            counts.add(row.post.sentiment);
        }
    }
    if counts.total() == 0 {
        return Ok(None);
    }
    let (positive, negative, neutral) = counts.shares();
    Ok(Some(TopicBreakdown {
        topic: Category::new(topic),
        count: counts.total(),
        positive,
        negative,
        neutral,
    }))
}

/// [`try_topic_breakdown`], degrading to `None` on failure.
#[must_use]
pub fn topic_breakdown(posts: &[Post], topic: &str) -> Option<TopicBreakdown> {
    try_topic_breakdown(posts, topic).unwrap_or_else(|e| {
        tracing::warn!(error = %e, topic, "topic breakdown failed");
        None
    })
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
