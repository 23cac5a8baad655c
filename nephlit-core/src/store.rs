//! JSON persistence for the three output documents.
//!
//! Writes go to a `.tmp` sibling first and are renamed into place, so a
//! crash mid-write never leaves a truncated document behind. Loading a
//! record set from a path that does not exist yields an empty set, which
//! flows through aggregation as all-zero statistics.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::report::WeeklyReport;
use crate::trends::TrendSnapshot;
use crate::types::RecordSet;

/// Atomically write pretty-printed JSON to `path`, creating parent
/// directories as needed.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Load a previously persisted record set. A missing file is not an error.
pub fn load_articles(path: &Path) -> Result<RecordSet> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no persisted articles found, starting empty");
        return Ok(RecordSet::new());
    }
    let data = fs::read_to_string(path)?;
    let records: RecordSet = serde_json::from_str(&data)?;
    tracing::info!(path = %path.display(), categories = records.len(), "loaded articles");
    Ok(records)
}

/// Persist the raw record set unchanged (`articles.json`).
pub fn save_articles(path: &Path, records: &RecordSet) -> Result<()> {
    save_json(path, records)?;
    tracing::info!(path = %path.display(), categories = records.len(), "saved articles");
    Ok(())
}

/// Persist a trend snapshot (`trends.json`).
pub fn save_trends(path: &Path, snapshot: &TrendSnapshot) -> Result<()> {
    save_json(path, snapshot)?;
    tracing::info!(path = %path.display(), total = snapshot.total_count, "saved trend snapshot");
    Ok(())
}

/// Persist an assembled weekly report (`weekly_summary.json`).
pub fn save_report(path: &Path, report: &WeeklyReport) -> Result<()> {
    save_json(path, report)?;
    tracing::info!(
        path = %path.display(),
        featured = report.featured_articles.len(),
        "saved weekly report"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{ArticleRecord, CategoryBundle};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_records() -> RecordSet {
        let mut records = RecordSet::new();
        records.insert(
            "adult".into(),
            CategoryBundle {
                name: "成人腎臟學".into(),
                articles: vec![ArticleRecord {
                    pmid: "100".into(),
                    title: "A study".into(),
                    ..Default::default()
                }],
                count: 1,
                days_back: 7,
                ..Default::default()
            },
        );
        records
    }

    #[test]
    fn test_articles_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("articles.json");

        let records = sample_records();
        save_articles(&path, &records).unwrap();
        let loaded = load_articles(&path).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_missing_file_yields_empty_record_set() {
        let dir = TempDir::new().unwrap();
        let loaded = load_articles(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("articles.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_articles(&path).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("articles.json");
        save_articles(&path, &sample_records()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_no_tmp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("articles.json");
        save_articles(&path, &sample_records()).unwrap();
        assert!(!dir.path().join("articles.tmp").exists());
    }
}
