//! Raw per-platform CSV sources and the cleaned dataset file.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use pulse_core::Platform;
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;
use crate::normalize::{normalize, CleanRecord, RawRecord};

/// Source files in concatenation order, which decides duplicate survival.
pub const SOURCES: [(&str, Platform); 4] = [
    ("instagram_posts.csv", Platform::Instagram),
    ("twitter_posts.csv", Platform::Twitter),
    ("youtube_comments.csv", Platform::YouTube),
    ("news_articles.csv", Platform::News),
];

const CLEANED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct SourceRow {
    text: Option<String>,
    timestamp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CleanedRow {
    platform: Option<String>,
    text: Option<String>,
    timestamp: Option<String>,
}

fn io_error(path: &Path, source: std::io::Error) -> AnalyticsError {
    AnalyticsError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().flexible(true).from_reader(reader)
}

/// Read one platform export. Only `text` and `timestamp` are used.
///
/// # Errors
///
/// Returns [`AnalyticsError::Csv`] on malformed CSV.
pub fn read_source<R: Read>(
    reader: R,
    platform: Platform,
) -> Result<Vec<RawRecord>, AnalyticsError> {
    csv_reader(reader)
        .deserialize::<SourceRow>()
        .map(|row| -> Result<RawRecord, AnalyticsError> {
            let row = row?;
            Ok(RawRecord {
                platform,
                text: row.text,
                timestamp: row.timestamp,
            })
        })
        .collect()
}

/// Read every known source under `raw_dir`, in [`SOURCES`] order.
///
/// A missing file contributes no records.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if an existing file cannot be read or parsed.
pub fn load_raw_sources(raw_dir: &Path) -> Result<Vec<RawRecord>, AnalyticsError> {
    let mut records = Vec::new();
    for (file_name, platform) in SOURCES {
        let path = raw_dir.join(file_name);
        let file = match std::fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "source file missing; skipping");
                continue;
            }
            Err(e) => return Err(io_error(&path, e)),
        };
        let rows = read_source(file, platform)?;
        tracing::info!(%platform, rows = rows.len(), "loaded source");
        records.extend(rows);
    }
    Ok(records)
}

/// Write the cleaned dataset as `platform,text,timestamp` CSV.
///
/// # Errors
///
/// Returns [`AnalyticsError`] on write failure.
pub fn write_cleaned(path: &Path, records: &[CleanRecord]) -> Result<(), AnalyticsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(CleanedRow {
            platform: Some(record.platform.to_string()),
            text: Some(record.text.clone()),
            timestamp: Some(record.timestamp.format(CLEANED_TIMESTAMP_FORMAT).to_string()),
        })?;
    }
    writer.flush().map_err(|e| io_error(path, e))
}

/// Load all raw sources, normalize them, and write the cleaned dataset.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if a source cannot be read or the output
/// cannot be written.
pub fn combine_and_clean(
    raw_dir: &Path,
    cleaned_path: &Path,
    now: DateTime<Utc>,
) -> Result<Vec<CleanRecord>, AnalyticsError> {
    let raw = load_raw_sources(raw_dir)?;
    let total = raw.len();
    let cleaned = normalize(raw, now);
    write_cleaned(cleaned_path, &cleaned)?;
    tracing::info!(
        raw = total,
        cleaned = cleaned.len(),
        path = %cleaned_path.display(),
        "wrote cleaned dataset"
    );
    Ok(cleaned)
}

/// Read a cleaned dataset and re-normalize it.
///
/// # Errors
///
/// Returns [`AnalyticsError::Csv`] on malformed CSV.
pub fn read_cleaned<R: Read>(
    reader: R,
    now: DateTime<Utc>,
) -> Result<Vec<CleanRecord>, AnalyticsError> {
    let raw = csv_reader(reader)
        .deserialize::<CleanedRow>()
        .map(|row| -> Result<RawRecord, AnalyticsError> {
            let row = row?;
            Ok(RawRecord {
                platform: row.platform.as_deref().map(Platform::parse).unwrap_or_default(),
                text: row.text,
                timestamp: row.timestamp,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(normalize(raw, now))
}

/// Load the cleaned dataset from `path`. A missing file is an empty dataset.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the file exists but cannot be read or parsed.
pub fn load_cleaned(path: &Path, now: DateTime<Utc>) -> Result<Vec<CleanRecord>, AnalyticsError> {
    match std::fs::File::open(path) {
        Ok(file) => read_cleaned(file, now),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "cleaned dataset missing; treating as empty");
            Ok(Vec::new())
        }
        Err(e) => Err(io_error(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn read_source_stamps_platform_and_ignores_extra_columns() {
        let csv = "id,text,likes,timestamp\n1,Reggae Boyz won,10,2025-05-01 10:00:00\n2,,3,\n";
        let records = read_source(csv.as_bytes(), Platform::Instagram).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.platform == Platform::Instagram));
        assert_eq!(records[0].text.as_deref(), Some("Reggae Boyz won"));
        assert_eq!(records[0].timestamp.as_deref(), Some("2025-05-01 10:00:00"));
    }

    #[test]
    fn read_source_without_timestamp_column() {
        let csv = "text\nWater shortage again\n";
        let records = read_source(csv.as_bytes(), Platform::News).unwrap();
        assert_eq!(records[0].timestamp, None);
    }

    #[test]
    fn missing_sources_contribute_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_raw_sources(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn combine_keeps_source_order_for_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        std::fs::create_dir_all(&raw).unwrap();
        std::fs::write(
            raw.join("news_articles.csv"),
            "text,timestamp\nSame story,2025-05-02\n",
        )
        .unwrap();
        std::fs::write(
            raw.join("twitter_posts.csv"),
            "text,timestamp\n Same story ,2025-05-01 09:00:00\nOnly on twitter,\n",
        )
        .unwrap();

        let out = dir.path().join("cleaned.csv");
        let cleaned = combine_and_clean(&raw, &out, now()).unwrap();
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].platform, Platform::Twitter);
        assert_eq!(cleaned[0].text, "Same story");
        assert_eq!(cleaned[1].timestamp, now());

        let reloaded = load_cleaned(&out, now()).unwrap();
        assert_eq!(reloaded, cleaned);
    }

    #[test]
    fn load_cleaned_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records = load_cleaned(&dir.path().join("absent.csv"), now()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn read_cleaned_parses_unknown_platform() {
        let csv = "platform,text,timestamp\nMySpace,hello there,2025-01-01 00:00:00\n";
        let records = read_cleaned(csv.as_bytes(), now()).unwrap();
        assert_eq!(records[0].platform, Platform::Unknown);
    }
}
