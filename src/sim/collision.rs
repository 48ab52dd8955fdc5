//! Hazard and pickup checks against the player rectangle
//!
//! None of these fail: a hit is an ordinary outcome the caller turns into a
//! state transition.

use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::{Coin, Obstacle, Player, Spikes};
use crate::consts::COLLISION_TOLERANCE;

/// What ended an attempt early
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hazard {
    Obstacle,
    Spikes,
}

/// Any obstacle overlap, with each hitbox shrunk by the collision tolerance
pub fn hits_obstacle(player: &Rect, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| {
        let hitbox = o.rect().inflate(-COLLISION_TOLERANCE, -COLLISION_TOLERANCE);
        player.intersects(&hitbox)
    })
}

/// Remove every coin the player overlaps; returns how many were taken
pub fn collect_coins(player: &Rect, coins: &mut Vec<Coin>) -> u32 {
    let before = coins.len();
    coins.retain(|c| !player.intersects(&c.rect()));
    (before - coins.len()) as u32
}

/// The strip spans the whole width, so only the player's bottom edge matters
pub fn touches_spikes(player: &Player, spikes: &Spikes) -> bool {
    player.bottom() >= spikes.top
}

/// Check hazards in a fixed order: obstacles, then spikes
pub fn check_hazards(player: &Player, obstacles: &[Obstacle], spikes: &Spikes) -> Option<Hazard> {
    if hits_obstacle(&player.rect(), obstacles) {
        Some(Hazard::Obstacle)
    } else if touches_spikes(player, spikes) {
        Some(Hazard::Spikes)
    } else {
        None
    }
}
