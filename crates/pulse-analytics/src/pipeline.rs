//! Request-level service: reload, analyze, aggregate.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use pulse_classifier::Classify;
use pulse_core::{AppConfig, Category, Post, TopicSummary, TrendPoint};

use crate::aggregate::{self, PulseIndex, TopicBreakdown};
use crate::analyze::analyze;
use crate::error::AnalyticsError;
use crate::sources::load_cleaned;

/// Answers dashboard queries from the cleaned dataset on disk.
///
/// Every call rereads and reanalyzes the dataset; nothing is cached between
/// calls. The classifier is shared read-only.
#[derive(Clone)]
pub struct PulseService {
    cleaned_path: PathBuf,
    content_limit: usize,
    trend_window: usize,
    classifier: Arc<dyn Classify>,
}

impl PulseService {
    #[must_use]
    pub fn new(config: &AppConfig, classifier: Arc<dyn Classify>) -> Self {
        Self {
            cleaned_path: config.cleaned_path.clone(),
            content_limit: config.content_limit,
            trend_window: config.trend_window,
            classifier,
        }
    }

    #[must_use]
    pub fn trend_window(&self) -> usize {
        self.trend_window
    }

    /// Load and analyze the current dataset.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError`] if the dataset exists but cannot be read.
    pub fn posts(&self) -> Result<Vec<Post>, AnalyticsError> {
        let records = load_cleaned(&self.cleaned_path, Utc::now())?;
        Ok(analyze(&records, self.classifier.as_ref()))
    }

    fn posts_or_empty(&self) -> Vec<Post> {
        self.posts().unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                path = %self.cleaned_path.display(),
                "failed to load dataset; treating as empty"
            );
            Vec::new()
        })
    }

    /// Every analyzed post.
    #[must_use]
    pub fn bulk(&self) -> Vec<Post> {
        self.posts_or_empty()
    }

    #[must_use]
    pub fn topics(&self) -> Vec<TopicSummary> {
        aggregate::summarize_topics(&self.posts_or_empty(), self.content_limit)
    }

    #[must_use]
    pub fn trends(&self) -> BTreeMap<Category, Vec<TrendPoint>> {
        aggregate::daily_trends(&self.posts_or_empty())
    }

    /// The last `window` date buckets for `topic`, defaulting to the
    /// configured window.
    #[must_use]
    pub fn topic_trend(&self, topic: &str, window: Option<usize>) -> Vec<TrendPoint> {
        aggregate::topic_trend(
            &self.posts_or_empty(),
            topic,
            window.unwrap_or(self.trend_window),
        )
    }

    #[must_use]
    pub fn pulse(&self) -> PulseIndex {
        aggregate::pulse_index(&self.posts_or_empty())
    }

    #[must_use]
    pub fn breakdown(&self, topic: &str) -> Option<TopicBreakdown> {
        aggregate::topic_breakdown(&self.posts_or_empty(), topic)
    }
}

impl std::fmt::Debug for PulseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PulseService")
            .field("cleaned_path", &self.cleaned_path)
            .field("content_limit", &self.content_limit)
            .field("trend_window", &self.trend_window)
            .finish_non_exhaustive()
    }
}
