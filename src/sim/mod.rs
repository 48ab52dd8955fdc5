//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies
//!
//! The one outside input besides buttons is elapsed wall-clock time, which
//! only the level timer reads.

pub mod collision;
pub mod geom;
pub mod level;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::Hazard;
pub use geom::Rect;
pub use level::{
    FixedLayout, GeneratedLevel, LevelEntry, LevelSpec, LevelTable, SeededParams, default_levels,
    generate,
};
pub use state::{
    Attempt, Coin, GameEvent, JumpKind, JumpTimers, Obstacle, ObstacleSprite, Platform, Player,
    Spikes, Viewport,
};
pub use tick::{TickInput, TickOutcome, TickReport, tick};
