//! Square Dash - a side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, physics, collisions)
//! - `session`: Lives/score ledger and attempt transitions
//! - `game`: Fixed timestep driver with modal screens
//! - `renderer`, `platform`, `audio`: Interfaces to the outside world
//! - `persistence`, `highscores`: Score table storage

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::{ScoreEntry, ScoreTable};
pub use session::{AttemptOutcome, Session, Transition};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 30;

    /// Default logical viewport
    pub const DEFAULT_WIDTH: f32 = 1200.0;
    pub const DEFAULT_HEIGHT: f32 = 800.0;

    /// Level length in seconds (also the platform count of a seeded level)
    pub const LEVEL_DURATION: f32 = 100.0;
    pub const STARTING_LIVES: u32 = 10;

    /// Vertical physics, in pixels and pixels/tick
    pub const GRAVITY: f32 = 1.0;
    pub const MIN_JUMP_STRENGTH: f32 = 15.0;
    pub const MAX_JUMP_STRENGTH: f32 = 45.0;
    pub const CHARGE_RATE: f32 = 1.0;

    /// Input forgiveness windows, in ticks
    pub const COYOTE_FRAMES: u32 = 5;
    pub const JUMP_BUFFER_FRAMES: u32 = 5;

    /// World scroll speed (pixels/tick, leftward)
    pub const SCROLL_SPEED: f32 = 5.0;

    /// Obstacle hitboxes shrink by this much on every side
    pub const COLLISION_TOLERANCE: f32 = 5.0;
    /// Platforms grow by this much horizontally when testing for a landing
    pub const PLATFORM_EDGE_TOLERANCE: f32 = 2.0;

    /// Sizes as fractions of the viewport
    pub const PLAYER_WIDTH_FRAC: f32 = 0.025;
    pub const PLATFORM_WIDTH_FRAC: f32 = 0.2;
    pub const PLATFORM_HEIGHT_FRAC: f32 = 0.0125;
    pub const OBSTACLE_WIDTH_FRAC: f32 = 1.0 / 30.0;
    pub const COIN_WIDTH_FRAC: f32 = 0.025;
    pub const SPIKE_HEIGHT_FRAC: f32 = 0.025;
    pub const SPIKE_COUNT: usize = 20;

    /// Player spawn point
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y_FRAC: f32 = 0.4;

    /// Level generation
    pub const FIRST_PLATFORM_X: f32 = 100.0;
    pub const COIN_SPAWN_ATTEMPTS: u32 = 5;
    pub const COIN_LIFT: f32 = 10.0;
    pub const OBSTACLE_SPAWN_ATTEMPTS: u32 = 10;
    /// Most platforms an endless stream appends in one refill
    pub const MAX_STREAM_REFILL: usize = 64;

    /// Horizontal nudge from the analog axis
    pub const NUDGE_DEADZONE: f32 = 0.2;
    pub const NUDGE_RANGE: f32 = 150.0;
    pub const NUDGE_SPEED: f32 = 0.2;

    /// Score table size
    pub const MAX_SCORE_ENTRIES: usize = 20;
    pub const INITIALS_LEN: usize = 3;
}
