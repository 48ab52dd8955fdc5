//! High score leaderboard
//!
//! Three-letter names, ranked by coins, top 20 kept.

use serde::{Deserialize, Serialize};

use crate::consts::{INITIALS_LEN, MAX_SCORE_ENTRIES};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// High score leaderboard, best first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    entries: Vec<ScoreEntry>,
}

impl ScoreTable {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adopt stored entries, restoring rank order and the size cap
    pub fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_SCORE_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Insert a score below any equal ones, then trim to the cap.
    /// Returns the 1-indexed rank, or None if it fell off the end.
    pub fn add(&mut self, name: &str, score: u32) -> Option<usize> {
        let entry = ScoreEntry {
            name: name.to_string(),
            score,
        };

        // Find insertion point (sorted descending by score)
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_SCORE_ENTRIES);

        (pos < MAX_SCORE_ENTRIES).then_some(pos + 1)
    }
}

/// Turn typed letters into a leaderboard name: upper-case letters only,
/// padded with 'A' to three characters ("AAA" if nothing was typed).
pub fn finalize_initials(typed: &str) -> String {
    let mut name: String = typed
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .take(INITIALS_LEN)
        .collect();
    while name.len() < INITIALS_LEN {
        name.push('A');
    }
    name
}

/// Scoreboard line as shown on screen
pub fn format_entry(rank: usize, entry: &ScoreEntry) -> String {
    format!("{}. {}  -  {} coins", rank, entry.name, entry.score)
}
