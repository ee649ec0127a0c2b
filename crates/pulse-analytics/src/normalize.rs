//! Text normalization and timestamp resolution for raw post records.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use pulse_core::Platform;

/// A record as read from a source, before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub platform: Platform,
    pub text: Option<String>,
    pub timestamp: Option<String>,
}

impl RawRecord {
    #[must_use]
    pub fn new(platform: Platform, text: Option<&str>, timestamp: Option<&str>) -> Self {
        Self {
            platform,
            text: text.map(str::to_string),
            timestamp: timestamp.map(str::to_string),
        }
    }
}

/// A record with trimmed, non-empty, unique text and a resolved timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRecord {
    pub platform: Platform,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse the timestamp shapes the sources emit.
///
/// Offset-carrying timestamps are converted to UTC; naive ones are taken as
/// UTC, and bare dates as midnight.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.and_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Parse `raw`, substituting `now` when it is missing or unparseable.
#[must_use]
pub fn resolve_timestamp(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    raw.and_then(parse_timestamp).unwrap_or(now)
}

/// Drop records with missing or blank text, trim the rest, and keep only the
/// first record for each exact text.
///
/// Input order decides which duplicate survives.
pub fn normalize<I>(records: I, now: DateTime<Utc>) -> Vec<CleanRecord>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut cleaned = Vec::new();
    let mut empty = 0_usize;
    let mut duplicates = 0_usize;
    let mut defaulted = 0_usize;

    for record in records {
        let Some(text) = record
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        else {
            empty += 1;
            continue;
        };
        if !seen.insert(text.to_string()) {
            duplicates += 1;
            continue;
        }
        let timestamp = match record.timestamp.as_deref().and_then(parse_timestamp) {
            Some(ts) => ts,
            None => {
                defaulted += 1;
                now
            }
        };
        cleaned.push(CleanRecord {
            platform: record.platform,
            text: text.to_string(),
            timestamp,
        });
    }

    tracing::debug!(
        kept = cleaned.len(),
        empty,
        duplicates,
        defaulted_timestamps = defaulted,
        "normalized records"
    );
    cleaned
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn raw(text: Option<&str>) -> RawRecord {
        RawRecord::new(Platform::Twitter, text, Some("2025-05-30 08:15:00"))
    }

    #[test]
    fn drops_missing_and_blank_text() {
        let cleaned = normalize(vec![raw(None), raw(Some("")), raw(Some("  \t")), raw(Some("ok"))], now());
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].text, "ok");
    }

    #[test]
    fn strips_then_dedups_first_wins() {
        let records = vec![
            RawRecord::new(Platform::Instagram, Some("  Gas prices up "), None),
            RawRecord::new(Platform::Twitter, Some("Gas prices up"), None),
            RawRecord::new(Platform::News, Some("gas prices up"), None),
        ];
        let cleaned = normalize(records, now());
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].platform, Platform::Instagram);
        assert_eq!(cleaned[0].text, "Gas prices up");
        // Dedup is exact-text: case differences survive.
        assert_eq!(cleaned[1].text, "gas prices up");
    }

    #[test]
    fn unparseable_timestamp_defaults_to_now() {
        let records = vec![
            RawRecord::new(Platform::YouTube, Some("a"), Some("yesterday-ish")),
            RawRecord::new(Platform::YouTube, Some("b"), None),
        ];
        let cleaned = normalize(records, now());
        assert!(cleaned.iter().all(|r| r.timestamp == now()));
    }

    #[test]
    fn parses_supported_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        for raw in [
            "2025-03-14T09:30:00Z",
            "2025-03-14T04:30:00-05:00",
            "2025-03-14 09:30:00",
            "2025-03-14T09:30:00",
            "2025-03-14 09:30",
            "03/14/2025 09:30",
        ] {
            assert_eq!(parse_timestamp(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn parses_fractional_seconds() {
        let parsed = parse_timestamp("2025-03-14 09:30:00.250").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn bare_dates_are_midnight() {
        let midnight = Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-03-14"), Some(midnight));
        assert_eq!(parse_timestamp("03/14/2025"), Some(midnight));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2025-13-45"), None);
    }

    #[test]
    fn resolve_timestamp_falls_back() {
        assert_eq!(resolve_timestamp(None, now()), now());
        assert_eq!(resolve_timestamp(Some("garbage"), now()), now());
        assert_ne!(resolve_timestamp(Some("2024-01-01"), now()), now());
    }
}
