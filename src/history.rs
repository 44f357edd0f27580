//! Recent searches - bounded, most-recent-first, persisted as a JSON array

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::HistoryError;

/// Maximum number of remembered searches
pub const MAX_ENTRIES: usize = 5;

/// Ordered list of `"City, Country"` entries, newest first, no duplicates
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SearchHistory(Vec<String>);

impl SearchHistory {
    /// Build from a previously persisted list, enforcing the size bound
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut history = Self(Vec::with_capacity(MAX_ENTRIES));
        for entry in entries.into_iter().rev() {
            history.record(entry);
        }
        history
    }

    /// Move `entry` to the front, dropping any older copy and anything past
    /// the size bound. Returns whether the list changed.
    pub fn record(&mut self, entry: impl Into<String>) -> bool {
        let entry = entry.into();
        if self.0.first() == Some(&entry) {
            return false;
        }
        self.0.retain(|existing| *existing != entry);
        self.0.insert(0, entry);
        self.0.truncate(MAX_ENTRIES);
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// City part of a history entry (`"London, GB"` -> `"London"`)
pub fn city_of(entry: &str) -> &str {
    entry.split(',').next().unwrap_or(entry).trim()
}

/// Read the history file. A missing file is an empty history.
pub async fn load(path: &Path) -> Result<SearchHistory, HistoryError> {
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no history file yet");
            return Ok(SearchHistory::default());
        }
        Err(e) => return Err(e.into()),
    };
    let entries: Vec<String> = serde_json::from_str(&json)?;
    Ok(SearchHistory::from_entries(entries))
}

/// Overwrite the history file with `entries`
pub async fn save(path: &Path, entries: &[String]) -> Result<(), HistoryError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string(entries)?;
    tokio::fs::write(path, json).await?;
    debug!(path = %path.display(), count = entries.len(), "history saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_newest_first() {
        let mut history = SearchHistory::default();
        for city in ["Paris, FR", "Tokyo, JP", "Lima, PE"] {
            assert!(history.record(city));
        }
        assert_eq!(history.entries(), ["Lima, PE", "Tokyo, JP", "Paris, FR"]);
    }

    #[test]
    fn test_record_moves_repeat_to_front() {
        let mut history = SearchHistory::default();
        history.record("Paris, FR");
        history.record("Tokyo, JP");
        history.record("Lima, PE");

        assert!(history.record("Paris, FR"));
        assert_eq!(history.entries(), ["Paris, FR", "Lima, PE", "Tokyo, JP"]);

        assert!(!history.record("Paris, FR"));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_record_caps_at_max_entries() {
        let mut history = SearchHistory::default();
        for i in 0..8 {
            history.record(format!("City{i}, XX"));
        }
        assert_eq!(history.len(), MAX_ENTRIES);
        assert_eq!(history.get(0), Some("City7, XX"));
        assert_eq!(history.get(4), Some("City3, XX"));
    }

    #[test]
    fn test_from_entries_keeps_order_and_bound() {
        let entries: Vec<String> = ["A, X", "B, X", "A, X", "C, X", "D, X", "E, X", "F, X"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let history = SearchHistory::from_entries(entries);
        assert_eq!(history.entries(), ["A, X", "B, X", "C, X", "D, X", "E, X"]);
    }

    #[test]
    fn test_city_of() {
        assert_eq!(city_of("London, GB"), "London");
        assert_eq!(city_of("Reykjavik"), "Reykjavik");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("recent.json");

        let mut history = SearchHistory::default();
        history.record("Oslo, NO");
        history.record("Rome, IT");
        save(&path, history.entries()).await.unwrap();

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, r#"["Rome, IT","Oslo, NO"]"#);

        let loaded = load(&path).await.unwrap();
        assert_eq!(loaded, history);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");

        save(&path, &["Oslo, NO".to_string()]).await.unwrap();
        save(&path, &["Rome, IT".to_string()]).await.unwrap();

        let loaded = load(&path).await.unwrap();
        assert_eq!(loaded.entries(), ["Rome, IT"]);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load(&dir.path().join("absent.json")).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupted_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");
        std::fs::write(&path, "not json").unwrap();

        let result = load(&path).await;
        assert!(matches!(result, Err(HistoryError::Json(_))));
    }
}
