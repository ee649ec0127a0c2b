//! Per-post scoring and classification.

use pulse_classifier::Classify;
use pulse_core::Post;

use crate::normalize::CleanRecord;

/// Score and categorize one cleaned record.
#[must_use]
pub fn analyze_record(record: &CleanRecord, classifier: &dyn Classify) -> Post {
    let (polarity, sentiment) = pulse_sentiment::score_text(&record.text);
    Post {
        text: record.text.clone(),
        platform: record.platform,
        timestamp: record.timestamp,
        polarity,
        sentiment,
        categories: classifier.classify(Some(&record.text)),
    }
}

/// Score and categorize every record, preserving order.
#[must_use]
pub fn analyze(records: &[CleanRecord], classifier: &dyn Classify) -> Vec<Post> {
    let posts: Vec<Post> = records
        .iter()
        .map(|record| analyze_record(record, classifier))
        .collect();
    tracing::debug!(posts = posts.len(), "analyzed records");
    posts
}
