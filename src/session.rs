//! Lives and coin ledger across attempts
//!
//! A [`Session`] is one game: it survives across attempts and levels, and is
//! reset only when a final score is recorded.

use serde::{Deserialize, Serialize};

use crate::highscores::ScoreTable;
use crate::persistence::ScoreStore;
use crate::sim::collision::Hazard;
use crate::sim::level::{LevelTable, generate};
use crate::sim::state::{Attempt, Viewport};

/// How an attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// Survived until the timer ran out
    Succeeded,
    Died(Hazard),
}

/// What happens after an attempt is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Level cleared and another one follows
    NextLevel { level_index: usize },
    /// Last level cleared; the run ends with this score
    AllLevelsComplete { final_score: u32 },
    /// Died with lives to spare
    RetrySameLevel { level_index: usize, lives: u32 },
    /// Died on the last life; the run ends with this score
    OutOfLives { final_score: u32 },
}

impl Transition {
    /// Whether the run is over and a score should be recorded
    pub fn ends_run(&self) -> bool {
        matches!(
            self,
            Transition::AllLevelsComplete { .. } | Transition::OutOfLives { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub starting_lives: u32,
    pub lives: u32,
    /// Coins banked from completed levels
    pub locked_coins: u32,
    /// Coins picked up in the attempt in progress
    pub attempt_coins: u32,
    pub level_index: usize,
}

impl Session {
    pub fn new(starting_lives: u32) -> Self {
        let starting_lives = starting_lives.max(1);
        Self {
            starting_lives,
            lives: starting_lives,
            locked_coins: 0,
            attempt_coins: 0,
            level_index: 0,
        }
    }

    /// Coins shown to the player: banked plus in-flight
    pub fn total_coins(&self) -> u32 {
        self.locked_coins + self.attempt_coins
    }

    /// Build a fresh attempt at the current level
    pub fn start_attempt(
        &mut self,
        levels: &LevelTable,
        viewport: Viewport,
        default_duration: f32,
    ) -> Attempt {
        let (index, entry) = levels.select(self.level_index);
        self.level_index = index;
        self.attempt_coins = 0;

        let duration = entry.duration_secs.unwrap_or(default_duration);
        log::info!(
            "Starting level {} ({}) - {} lives, {} coins banked",
            index + 1,
            entry.name,
            self.lives,
            self.locked_coins
        );
        Attempt::new(viewport, index, duration, generate(&entry.spec, &viewport, duration))
    }

    /// Count coins collected during the running attempt
    pub fn collect(&mut self, coins: u32) {
        self.attempt_coins += coins;
    }

    /// Settle the ledger for a finished attempt
    pub fn resolve(&mut self, outcome: AttemptOutcome, level_count: usize) -> Transition {
        match outcome {
            AttemptOutcome::Succeeded => {
                self.locked_coins += self.attempt_coins;
                self.attempt_coins = 0;
                if self.level_index + 1 < level_count {
                    self.level_index += 1;
                    log::info!("Level cleared, advancing to level {}", self.level_index + 1);
                    Transition::NextLevel {
                        level_index: self.level_index,
                    }
                } else {
                    log::info!("All levels cleared with {} coins", self.locked_coins);
                    Transition::AllLevelsComplete {
                        final_score: self.locked_coins,
                    }
                }
            }
            AttemptOutcome::Died(hazard) => {
                self.attempt_coins = 0;
                self.lives = self.lives.saturating_sub(1);
                log::info!("Died ({:?}), {} lives left", hazard, self.lives);
                if self.lives > 0 {
                    Transition::RetrySameLevel {
                        level_index: self.level_index,
                        lives: self.lives,
                    }
                } else {
                    Transition::OutOfLives {
                        final_score: self.locked_coins,
                    }
                }
            }
        }
    }

    /// Write the run's score under `name`, then start a new game.
    ///
    /// Storage failures are logged and the in-memory table is still returned.
    pub fn record_final_score(&mut self, name: &str, store: &mut dyn ScoreStore) -> ScoreTable {
        let mut table = match store.load() {
            Ok(entries) => ScoreTable::from_entries(entries),
            Err(e) => {
                log::warn!("Could not read score table, starting fresh: {:#}", e);
                ScoreTable::new()
            }
        };

        let score = self.locked_coins;
        let rank = table.add(name, score);
        log::info!("Recorded {} - {} coins (rank {})", name, score, rank.unwrap_or(0));

        if let Err(e) = store.save(table.entries()) {
            log::warn!("Could not save score table: {:#}", e);
        }

        self.reset();
        table
    }

    /// Back to level 0 with full lives and no coins
    pub fn reset(&mut self) {
        *self = Session::new(self.starting_lives);
    }
}
