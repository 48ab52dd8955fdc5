//! Entity records and per-attempt simulation state
//!
//! Everything one attempt mutates lives in [`Attempt`]; nothing here is
//! global, so several attempts can run side by side (tests do).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::level::{EndlessStream, GeneratedLevel};
use crate::consts::*;

/// Logical viewport all sizes and positions are measured in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Player is square, sized from the viewport width
    pub fn player_size(&self) -> Vec2 {
        let side = (PLAYER_WIDTH_FRAC * self.width).round();
        Vec2::splat(side)
    }

    pub fn platform_size(&self) -> Vec2 {
        Vec2::new(
            (PLATFORM_WIDTH_FRAC * self.width).round(),
            (PLATFORM_HEIGHT_FRAC * self.height).round(),
        )
    }

    pub fn obstacle_size(&self, sprite: ObstacleSprite) -> Vec2 {
        let w = (OBSTACLE_WIDTH_FRAC * self.width).round();
        Vec2::new(w, (w * sprite.aspect()).round())
    }

    pub fn coin_size(&self) -> Vec2 {
        Vec2::splat((COIN_WIDTH_FRAC * self.width).round())
    }

    pub fn spike_height(&self) -> f32 {
        (SPIKE_HEIGHT_FRAC * self.height).round()
    }
}

/// The two jump buttons, used to index per-kind timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpKind {
    /// Hold to charge, release to launch
    Charged,
    /// Fixed-strength jump on press, usable again once in mid-air
    Instant,
}

impl JumpKind {
    pub const ALL: [JumpKind; 2] = [JumpKind::Charged, JumpKind::Instant];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            JumpKind::Charged => 0,
            JumpKind::Instant => 1,
        }
    }
}

/// Coyote and jump-buffer counters, one slot per [`JumpKind`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpTimers {
    coyote: [u32; 2],
    buffer: [u32; 2],
}

impl JumpTimers {
    pub fn coyote(&self, kind: JumpKind) -> u32 {
        self.coyote[kind.index()]
    }

    pub fn set_coyote(&mut self, kind: JumpKind, ticks: u32) {
        self.coyote[kind.index()] = ticks;
    }

    pub fn buffer(&self, kind: JumpKind) -> u32 {
        self.buffer[kind.index()]
    }

    pub fn set_buffer(&mut self, kind: JumpKind, ticks: u32) {
        self.buffer[kind.index()] = ticks;
    }

    /// Count every window down by one tick, flooring at zero
    pub fn decay(&mut self) {
        for slot in self.coyote.iter_mut().chain(self.buffer.iter_mut()) {
            *slot = slot.saturating_sub(1);
        }
    }

    pub fn clear_coyote(&mut self) {
        self.coyote = [0; 2];
    }
}

/// The player's square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, positive is falling
    pub vel_y: f32,
    pub on_ground: bool,
    pub charging: bool,
    /// Launch strength being charged; zero whenever not charging
    pub jump_charge: f32,
    pub can_double_jump: bool,
    /// Resting x the horizontal nudge eases back to
    pub home_x: f32,
}

impl Player {
    pub fn spawn(viewport: &Viewport) -> Self {
        let pos = Vec2::new(PLAYER_SPAWN_X, (PLAYER_SPAWN_Y_FRAC * viewport.height).round());
        Self {
            pos,
            size: viewport.player_size(),
            vel_y: 0.0,
            on_ground: false,
            charging: false,
            jump_charge: 0.0,
            can_double_jump: true,
            home_x: pos.x,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A scrolling ledge the player can stand on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Platform {
    pub fn new(pos: Vec2, viewport: &Viewport) -> Self {
        Self {
            pos,
            size: viewport.platform_size(),
            speed: SCROLL_SPEED,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Cosmetic obstacle variants; each sprite has its own aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleSprite {
    Spark,
    Ember,
    Sprout,
    Splash,
}

impl ObstacleSprite {
    pub const ALL: [ObstacleSprite; 4] = [
        ObstacleSprite::Spark,
        ObstacleSprite::Ember,
        ObstacleSprite::Sprout,
        ObstacleSprite::Splash,
    ];

    /// Height over width of the sprite's source art
    pub fn aspect(self) -> f32 {
        match self {
            ObstacleSprite::Spark => 1.0,
            ObstacleSprite::Ember => 1.1,
            ObstacleSprite::Sprout => 0.9,
            ObstacleSprite::Splash => 1.05,
        }
    }

    /// Variant for a layout slot (fixed layouts pick sprites without RNG)
    pub fn cycle(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// A hazard resting on a platform; touching it ends the attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub sprite: ObstacleSprite,
}

impl Obstacle {
    pub fn new(pos: Vec2, sprite: ObstacleSprite, viewport: &Viewport) -> Self {
        Self {
            pos,
            size: viewport.obstacle_size(sprite),
            speed: SCROLL_SPEED,
            sprite,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Coin {
    pub fn new(pos: Vec2, viewport: &Viewport) -> Self {
        Self {
            pos,
            size: viewport.coin_size(),
            speed: SCROLL_SPEED,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Deadly strip pinned to the bottom of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spikes {
    /// y of the strip's top edge
    pub top: f32,
    pub height: f32,
}

impl Spikes {
    pub fn new(viewport: &Viewport) -> Self {
        let height = viewport.spike_height();
        Self {
            top: viewport.height - height,
            height,
        }
    }

    pub fn rect(&self, viewport: &Viewport) -> Rect {
        Rect::new(0.0, self.top, viewport.width, self.height)
    }
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player left the ground (or double jumped) with this launch speed
    Jumped { strength: f32 },
    CoinCollected,
}

/// One play-through of a single level
#[derive(Debug, Clone)]
pub struct Attempt {
    pub viewport: Viewport,
    pub level_index: usize,
    /// Seconds the player must survive
    pub duration_secs: f32,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub spikes: Spikes,
    pub timers: JumpTimers,
    /// Coins collected so far in this attempt
    pub coins_collected: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Source of further platforms in endless mode
    pub stream: Option<EndlessStream>,
}

impl Attempt {
    pub fn new(
        viewport: Viewport,
        level_index: usize,
        duration_secs: f32,
        level: GeneratedLevel,
    ) -> Self {
        Self {
            viewport,
            level_index,
            duration_secs,
            player: Player::spawn(&viewport),
            platforms: level.platforms,
            obstacles: level.obstacles,
            coins: level.coins,
            spikes: Spikes::new(&viewport),
            timers: JumpTimers::default(),
            coins_collected: 0,
            time_ticks: 0,
            stream: level.stream,
        }
    }

    /// Seconds left on the level timer, never negative
    pub fn remaining_secs(&self, elapsed_secs: f32) -> f32 {
        (self.duration_secs - elapsed_secs).max(0.0)
    }
}
