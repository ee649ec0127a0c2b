//! Dataset and aggregate view handlers.

use std::sync::Arc;

use chrono::Utc;
use pulse_analytics::{combine_and_clean, PulseService};
use pulse_classifier::TopicClassifier;
use pulse_core::AppConfig;
use serde::Serialize;

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build the query service, loading the classifier once.
pub(crate) fn service(config: &AppConfig) -> PulseService {
    let classifier = TopicClassifier::load(&config.model_dir);
    PulseService::new(config, Arc::new(classifier))
}

pub(crate) fn run_clean(config: &AppConfig) -> anyhow::Result<()> {
    let cleaned = combine_and_clean(&config.raw_dir, &config.cleaned_path, Utc::now())?;
    println!(
        "wrote {} cleaned posts to {}",
        cleaned.len(),
        config.cleaned_path.display()
    );
    Ok(())
}

pub(crate) fn run_score(text: &str) -> anyhow::Result<()> {
    let (polarity, sentiment) = pulse_sentiment::score_text(text);
    print_json(&serde_json::json!({
        "polarity": polarity,
        "sentiment": sentiment,
    }))
}

pub(crate) fn run_breakdown(config: &AppConfig, topic: &str) {
    match service(config).breakdown(topic) {
        Some(breakdown) => println!("{breakdown}"),
        None => println!("no posts found for topic '{topic}'"),
    }
}
