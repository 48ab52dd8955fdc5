//! Score table storage
//!
//! The score table is the only persisted artifact: a JSON array of
//! `{ "name": "ABC", "score": 12 }` records in rank order.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::highscores::ScoreEntry;

/// Where the score table lives
pub trait ScoreStore {
    /// Entries in stored (rank) order; a missing store is an empty table
    fn load(&mut self) -> anyhow::Result<Vec<ScoreEntry>>;
    fn save(&mut self, entries: &[ScoreEntry]) -> anyhow::Result<()>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&mut self) -> anyhow::Result<Vec<ScoreEntry>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No score file at {}, starting fresh", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };
        let entries: Vec<ScoreEntry> = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        log::info!("Loaded {} high scores", entries.len());
        Ok(entries)
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        // Write aside then rename so a crash never leaves a torn file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        log::info!("High scores saved ({} entries)", entries.len());
        Ok(())
    }
}

/// In-memory store for tests and storage-less runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub entries: Vec<ScoreEntry>,
}

impl ScoreStore for MemoryStore {
    fn load(&mut self) -> anyhow::Result<Vec<ScoreEntry>> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> anyhow::Result<()> {
        self.entries = entries.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("square-dash-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let mut store = JsonFileStore::new(scratch_path("missing"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_keeps_order() {
        let path = scratch_path("order");
        let mut store = JsonFileStore::new(&path);
        let entries = vec![
            ScoreEntry {
                name: "BOB".to_string(),
                score: 9,
            },
            ScoreEntry {
                name: "ANN".to_string(),
                score: 3,
            },
        ];
        store.save(&entries).unwrap();
        assert_eq!(store.load().unwrap(), entries);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let mut store = JsonFileStore::new(&path);
        assert!(store.load().is_err());
        let _ = fs::remove_file(&path);
    }
}
