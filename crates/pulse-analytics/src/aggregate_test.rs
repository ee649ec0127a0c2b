use chrono::{DateTime, TimeZone, Utc};
use pulse_core::Platform;

use super::*;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, day, hour, 0, 0).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
}

fn post(text: &str, polarity: f64, timestamp: DateTime<Utc>, categories: &[&str]) -> Post {
    Post {
        text: text.to_string(),
        platform: Platform::Twitter,
        timestamp,
        polarity,
        sentiment: Sentiment::from_polarity(polarity),
        categories: categories.iter().map(|&c| Category::new(c)).collect(),
    }
}

fn share_sum(summary: &TopicSummary) -> f64 {
    summary.positive + summary.negative + summary.neutral
}

// -----------------------------------------------------------------------
// explode / normalized_score
// -----------------------------------------------------------------------

#[test]
fn explode_emits_one_row_per_category() {
    let posts = vec![
        post("a", 0.0, at(1, 0), &["Sports", "Social Issues"]),
        post("b", 0.0, at(1, 0), &["Sports"]),
    ];
    let rows = explode(&posts).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].category.as_str(), "Social Issues");
    assert_eq!(rows[1].post.text, "a");
}

#[test]
fn explode_rejects_post_without_category() {
    let posts = vec![post("orphan", 0.0, at(1, 0), &[])];
    assert_eq!(
        explode(&posts).unwrap_err(),
        AggregationError::MissingCategory {
            text: "orphan".to_string()
        }
    );
}

#[test]
fn explode_rejects_out_of_range_polarity() {
    let posts = vec![post("x", 1.5, at(1, 0), &["Sports"])];
    assert!(matches!(
        explode(&posts),
        Err(AggregationError::InvalidPolarity { .. })
    ));
    let posts = vec![post("x", f64::NAN, at(1, 0), &["Sports"])];
    assert!(explode(&posts).is_err());
}

#[test]
fn normalized_score_floors() {
    assert_eq!(normalized_score(-1.0), 0);
    assert_eq!(normalized_score(0.0), 50);
    assert_eq!(normalized_score(1.0), 100);
    assert_eq!(normalized_score(-0.2), 40);
    assert_eq!(normalized_score(0.6), 80);
    assert_eq!(normalized_score(0.019), 50);
}

// -----------------------------------------------------------------------
// summarize_topics
// -----------------------------------------------------------------------

#[test]
fn summary_shares_sum_to_one() {
    let posts = vec![
        post("good", 0.5, at(1, 0), &["Sports"]),
        post("bad", -0.5, at(1, 0), &["Sports"]),
        post("meh", 0.0, at(1, 0), &["Sports"]),
        post("fine", 0.3, at(1, 0), &["Economy & Cost of Living"]),
    ];
    let summaries = summarize_topics(&posts, DEFAULT_CONTENT_LIMIT);
    assert_eq!(summaries.len(), 2);
    for summary in &summaries {
        assert!((share_sum(summary) - 1.0).abs() < 1e-9, "{summary:?}");
    }
    let sports = &summaries[1];
    assert_eq!(sports.name.as_str(), "Sports");
    assert!((sports.positive - 1.0 / 3.0).abs() < 1e-12);
    assert!((sports.negative - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn summary_is_ordered_by_topic_and_omits_empty_topics() {
    let posts = vec![
        post("x", 0.0, at(1, 0), &["Sports"]),
        post("y", 0.0, at(1, 0), &["Crime & Safety"]),
    ];
    let names: Vec<String> = summarize_topics(&posts, DEFAULT_CONTENT_LIMIT)
        .into_iter()
        .map(|s| s.name.to_string())
        .collect();
    assert_eq!(names, vec!["Crime & Safety", "Sports"]);
}

#[test]
fn summary_joins_then_truncates_content() {
    let long = "x".repeat(2000);
    let posts = vec![
        post(&long, 0.0, at(1, 0), &["Sports"]),
        post(&long, 0.0, at(2, 0), &["Sports"]),
    ];
    let summaries = summarize_topics(&posts, DEFAULT_CONTENT_LIMIT);
    let content = &summaries[0].content;
    assert_eq!(content.chars().count(), 3000);
    // The separator lands after the first post, inside the limit.
    assert_eq!(content.chars().nth(2000), Some(' '));
}

#[test]
fn summary_truncates_by_character_not_byte() {
    let posts = vec![post("Mi glad fi see di Reggae Boyz ⚽⚽⚽", 0.5, at(1, 0), &["Sports"])];
    let summaries = summarize_topics(&posts, 31);
    assert_eq!(summaries[0].content, "Mi glad fi see di Reggae Boyz ⚽");
}

#[test]
fn summary_of_no_posts_is_empty() {
    assert!(summarize_topics(&[], DEFAULT_CONTENT_LIMIT).is_empty());
}

#[test]
fn summary_failure_degrades_to_empty() {
    let posts = vec![
        post("ok", 0.0, at(1, 0), &["Sports"]),
        post("broken", 0.0, at(1, 0), &[]),
    ];
    assert!(try_summarize_topics(&posts, DEFAULT_CONTENT_LIMIT).is_err());
    assert!(summarize_topics(&posts, DEFAULT_CONTENT_LIMIT).is_empty());
}

// -----------------------------------------------------------------------
// daily_trends / topic_trend
// -----------------------------------------------------------------------

#[test]
fn daily_trends_end_to_end_scenario() {
    let posts = vec![
        post(
            "Gas prices are rising again",
            -0.2,
            at(1, 9),
            &["Economy & Cost of Living"],
        ),
        post("Reggae Boyz won the match", 0.6, at(2, 18), &["Sports"]),
    ];
    assert_eq!(posts[0].sentiment, Sentiment::Negative);
    assert_eq!(posts[1].sentiment, Sentiment::Positive);

    let trends = daily_trends(&posts);
    assert_eq!(trends.len(), 2);
    assert_eq!(
        trends["Economy & Cost of Living"],
        vec![TrendPoint {
            date: date(1),
            sentiment: 40
        }]
    );
    assert_eq!(
        trends["Sports"],
        vec![TrendPoint {
            date: date(2),
            sentiment: 80
        }]
    );
}

#[test]
fn daily_trend_truncates_twice() {
    // Per-post scores 50 and 51; the floor of their mean is 50.
    let posts = vec![
        post("a", 0.0, at(3, 1), &["Sports"]),
        post("b", 0.02, at(3, 23), &["Sports"]),
    ];
    let trends = daily_trends(&posts);
    assert_eq!(trends["Sports"][0].sentiment, 50);
}

#[test]
fn daily_trend_dates_are_strictly_increasing() {
    let posts = vec![
        post("c", 0.0, at(5, 0), &["Sports"]),
        post("a", 0.0, at(1, 0), &["Sports"]),
        post("b", 0.0, at(3, 0), &["Sports"]),
        post("d", 0.0, at(3, 12), &["Sports"]),
    ];
    let series = &daily_trends(&posts)["Sports"];
    assert_eq!(series.len(), 3);
    assert!(series.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn multi_category_post_counts_in_each_topic() {
    let posts = vec![post("both", 1.0, at(1, 0), &["Sports", "Social Issues"])];
    let trends = daily_trends(&posts);
    assert_eq!(trends["Sports"][0].sentiment, 100);
    assert_eq!(trends["Social Issues"][0].sentiment, 100);
}

#[test]
fn daily_trend_failure_degrades_to_empty_map() {
    let posts = vec![post("x", 2.0, at(1, 0), &["Sports"])];
    assert!(daily_trends(&posts).is_empty());
}

#[test]
fn topic_trend_keeps_last_buckets_by_date() {
    let posts: Vec<Post> = (1..=10)
        .map(|day| post(&format!("day {day}"), 0.0, at(day, 0), &["Sports"]))
        .collect();
    let series = topic_trend(&posts, "Sports", DEFAULT_TREND_WINDOW);
    assert_eq!(series.len(), 7);
    assert_eq!(series[0].date, date(4));
    assert_eq!(series[6].date, date(10));
}

#[test]
fn topic_trend_shorter_than_window_is_whole_series() {
    let posts = vec![post("x", 0.0, at(1, 0), &["Sports"])];
    assert_eq!(topic_trend(&posts, "Sports", 7).len(), 1);
}

#[test]
fn topic_trend_unknown_topic_is_empty() {
    let posts = vec![post("x", 0.0, at(1, 0), &["Sports"])];
    assert!(topic_trend(&posts, "Nonexistent Topic", 7).is_empty());
}

// -----------------------------------------------------------------------
// pulse_index
// -----------------------------------------------------------------------

#[test]
fn pulse_index_of_no_posts_is_neutral() {
    assert_eq!(pulse_index(&[]), PulseIndex::neutral());
}

#[test]
fn pulse_index_labels_and_trend() {
    let posts = vec![
        post("a", 0.4, at(1, 0), &["Sports"]),
        post("b", 0.6, at(1, 1), &["Sports"]),
    ];
    let pulse = pulse_index(&posts);
    assert_eq!(pulse.index, 75);
    assert_eq!(pulse.label, PulseLabel::Optimistic);
    assert_eq!(pulse.trend, PulseTrend::Up);
}

#[test]
fn pulse_index_pessimistic_and_down() {
    let posts = vec![
        post("a", -0.3, at(1, 0), &["Sports"]),
        post("b", -0.5, at(1, 1), &["Sports"]),
    ];
    let pulse = pulse_index(&posts);
    assert_eq!(pulse.index, 30);
    assert_eq!(pulse.label, PulseLabel::Pessimistic);
    assert_eq!(pulse.trend, PulseTrend::Down);
}

#[test]
fn pulse_index_equal_scores_trend_down() {
    let posts = vec![
        post("a", 0.0, at(1, 0), &["Sports"]),
        post("b", 0.0, at(1, 1), &["Sports"]),
    ];
    let pulse = pulse_index(&posts);
    assert_eq!(pulse.label, PulseLabel::Neutral);
    assert_eq!(pulse.trend, PulseTrend::Down);
}

#[test]
fn pulse_index_single_post_is_flat() {
    let posts = vec![post("a", 0.9, at(1, 0), &["Sports"])];
    assert_eq!(pulse_index(&posts).trend, PulseTrend::Flat);
}

#[test]
fn pulse_index_ignores_categories() {
    let posts = vec![post("a", 0.9, at(1, 0), &[])];
    assert_eq!(pulse_index(&posts).index, 95);
}

// -----------------------------------------------------------------------
// topic_breakdown
// -----------------------------------------------------------------------

#[test]
fn topic_breakdown_counts_and_renders() {
    let posts = vec![
        post("a", 0.5, at(1, 0), &["Sports"]),
        post("b", 0.5, at(1, 0), &["Sports"]),
        post("c", -0.5, at(1, 0), &["Sports"]),
        post("d", 0.5, at(1, 0), &["Social Issues"]),
    ];
    let breakdown = topic_breakdown(&posts, "Sports").unwrap();
    assert_eq!(breakdown.count, 3);
    assert_eq!(
        breakdown.to_string(),
        "Topic 'Sports' sentiment breakdown: Positive 66.7%, Negative 33.3%, Neutral 0.0%."
    );
}

#[test]
fn topic_breakdown_unknown_topic_is_none() {
    let posts = vec![post("a", 0.5, at(1, 0), &["Sports"])];
    assert_eq!(topic_breakdown(&posts, "Weather"), None);
}
