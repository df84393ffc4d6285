//! Recent searches
//!
//! Most-recent-first list of queries the shopper ran, persisted as JSON in
//! the platform data directory: `{data_dir}/partsearch/recent.json`.

use crate::error::AppError;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How many searches are remembered
pub const RECENT_CAPACITY: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearches {
    entries: Vec<String>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remember `query`. Blank queries are ignored; a repeated query moves
    /// to the front instead of appearing twice.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        self.entries.retain(|entry| entry != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(RECENT_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load from `path`; a missing or unreadable file is an empty history
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                debug!("No recent searches at {}", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&json) {
            Ok(mut recent) => {
                // Hand-edited files may exceed capacity or hold blanks
                let entries = std::mem::take(&mut recent.entries);
                for entry in entries.iter().rev() {
                    recent.record(entry);
                }
                recent
            }
            Err(e) => {
                warn!("Ignoring corrupt recent searches file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write to `path` atomically under an exclusive lock
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let lock_file = lock(path)?;
        self.write(path)?;
        lock_file.unlock()?;
        Ok(())
    }

    /// Load, change and save `path` while holding the lock, so concurrent
    /// updates never drop each other's entries
    pub fn update<F>(path: &Path, change: F) -> Result<Self, AppError>
    where
        F: FnOnce(&mut Self),
    {
        let lock_file = lock(path)?;
        let mut recent = Self::load(path);
        change(&mut recent);
        recent.write(path)?;
        lock_file.unlock()?;
        Ok(recent)
    }

    fn write(&self, path: &Path) -> Result<(), AppError> {
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(self)?)?;
        fs::rename(&tmp_path, path)?;
        debug!("Saved {} recent searches", self.entries.len());
        Ok(())
    }
}

/// Exclusive lock on the sidecar `.lock` file. The file stays in place so
/// every process locks the same inode.
fn lock(path: &Path) -> Result<fs::File, AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let lock_file = fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path.with_extension("lock"))?;
    lock_file.lock_exclusive()?;
    Ok(lock_file)
}

/// Default location of the recent searches file
pub fn default_path() -> Result<PathBuf, AppError> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Internal("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("partsearch").join("recent.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_recent_first() {
        let mut recent = RecentSearches::new();
        recent.record("brake pads");
        recent.record("spark plug");
        assert_eq!(recent.entries(), ["spark plug", "brake pads"]);
    }

    #[test]
    fn test_repeat_moves_to_front() {
        let mut recent = RecentSearches::new();
        recent.record("brake pads");
        recent.record("spark plug");
        recent.record("  brake pads ");
        assert_eq!(recent.entries(), ["brake pads", "spark plug"]);
    }

    #[test]
    fn test_capacity() {
        let mut recent = RecentSearches::new();
        for query in ["one", "two", "three", "four", "five"] {
            recent.record(query);
        }
        assert_eq!(recent.entries(), ["five", "four", "three", "two"]);
    }

    #[test]
    fn test_blank_ignored() {
        let mut recent = RecentSearches::new();
        recent.record("");
        recent.record("   ");
        assert!(recent.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("recent.json");

        let mut recent = RecentSearches::new();
        recent.record("ball joint");
        recent.record("555");
        recent.save(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.trim_start().starts_with('['));

        let loaded = RecentSearches::load(&path);
        assert_eq!(loaded, recent);
        assert!(path.with_extension("lock").exists());
    }

    #[test]
    fn test_update_holds_lock_across_read_modify_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");

        let handles: Vec<_> = ["brake", "spark", "joint", "rack"]
            .into_iter()
            .map(|query| {
                let path = path.clone();
                std::thread::spawn(move || {
                    RecentSearches::update(&path, |recent| recent.record(query)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut entries = RecentSearches::load(&path).entries().to_vec();
        entries.sort();
        assert_eq!(entries, ["brake", "joint", "rack", "spark"]);
    }

    #[test]
    fn test_update_returns_new_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");
        RecentSearches::update(&path, |recent| recent.record("555")).unwrap();
        let cleared = RecentSearches::update(&path, RecentSearches::clear).unwrap();
        assert!(cleared.is_empty());
        assert!(RecentSearches::load(&path).is_empty());
    }

    #[test]
    fn test_load_missing_or_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");
        assert!(RecentSearches::load(&path).is_empty());

        fs::write(&path, "{not json").unwrap();
        assert!(RecentSearches::load(&path).is_empty());
    }

    #[test]
    fn test_load_normalizes_hand_edited_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");
        fs::write(&path, r#"["a1", "", "b2", "a1", "c3", "d4", "e5"]"#).unwrap();

        let loaded = RecentSearches::load(&path);
        assert_eq!(loaded.entries(), ["a1", "b2", "c3", "d4"]);
    }
}
