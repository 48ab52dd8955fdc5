//! Player physics and input forgiveness
//!
//! Gravity, platform landings, the two jump buttons, and the coyote-time and
//! jump-buffer windows. Counts are in ticks, never wall-clock time.

use super::state::{GameEvent, JumpKind, JumpTimers, Platform, Player};
use crate::consts::*;

/// On the ground, or still inside this button's coyote window
#[inline]
pub fn effectively_grounded(player: &Player, timers: &JumpTimers, kind: JumpKind) -> bool {
    player.on_ground || timers.coyote(kind) > 0
}

/// Set the player moving upward. Coyote time grants one jump, so both
/// windows close here.
fn launch(
    player: &mut Player,
    timers: &mut JumpTimers,
    strength: f32,
    events: &mut Vec<GameEvent>,
) {
    player.vel_y = -strength;
    timers.clear_coyote();
    events.push(GameEvent::Jumped { strength });
}

/// Charge button went down
pub fn press_charged(player: &mut Player, timers: &mut JumpTimers) {
    if player.charging {
        return;
    }
    if effectively_grounded(player, timers, JumpKind::Charged) {
        player.charging = true;
        player.jump_charge = MIN_JUMP_STRENGTH;
        timers.set_buffer(JumpKind::Charged, 0);
    } else {
        timers.set_buffer(JumpKind::Charged, JUMP_BUFFER_FRAMES);
    }
}

/// Charge button still held this tick. Charge only builds with feet on a
/// platform; coyote time lets a charge start, not grow.
pub fn hold_charged(player: &mut Player) {
    if player.charging && player.on_ground {
        player.jump_charge = (player.jump_charge + CHARGE_RATE).min(MAX_JUMP_STRENGTH);
    }
}

/// Charge button came up: launch if standing, always reset the charge
pub fn release_charged(
    player: &mut Player,
    timers: &mut JumpTimers,
    events: &mut Vec<GameEvent>,
) {
    if !player.charging {
        return;
    }
    if player.on_ground {
        let strength = player.jump_charge;
        launch(player, timers, strength, events);
    }
    player.charging = false;
    player.jump_charge = 0.0;
}

/// Instant jump button went down: ground jump, else double jump, else buffer
pub fn press_instant(player: &mut Player, timers: &mut JumpTimers, events: &mut Vec<GameEvent>) {
    if effectively_grounded(player, timers, JumpKind::Instant) {
        launch(player, timers, MIN_JUMP_STRENGTH, events);
        timers.set_buffer(JumpKind::Instant, 0);
    } else if !player.on_ground && player.can_double_jump {
        launch(player, timers, MIN_JUMP_STRENGTH, events);
        player.can_double_jump = false;
    } else {
        timers.set_buffer(JumpKind::Instant, JUMP_BUFFER_FRAMES);
    }
}

/// Apply gravity and resolve landings.
///
/// Landing only happens while falling. The test uses the rectangle swept
/// between the old and new position so a fast fall cannot skip a thin
/// platform. When several platforms qualify the last one wins.
pub fn integrate(player: &mut Player, platforms: &[Platform]) {
    let before = player.rect();

    player.vel_y += GRAVITY;
    player.pos.y += player.vel_y;
    player.on_ground = false;

    if player.vel_y <= 0.0 {
        return;
    }

    let swept = before.union(&player.rect());
    for platform in platforms {
        let target = platform.rect().inflate(PLATFORM_EDGE_TOLERANCE, 0.0);
        if swept.intersects(&target) {
            player.pos.y = platform.pos.y - player.size.y;
            player.vel_y = 0.0;
            player.on_ground = true;
            player.can_double_jump = true;
        }
    }
}

/// Per-tick window bookkeeping, run after movement.
///
/// Grounded: refill both coyote windows and replay any buffered press.
/// Airborne: count every window down.
pub fn update_forgiveness(
    player: &mut Player,
    timers: &mut JumpTimers,
    charge_held: bool,
    events: &mut Vec<GameEvent>,
) {
    if !player.on_ground {
        timers.decay();
        return;
    }

    for kind in JumpKind::ALL {
        timers.set_coyote(kind, COYOTE_FRAMES);
    }

    if timers.buffer(JumpKind::Charged) > 0 {
        timers.set_buffer(JumpKind::Charged, 0);
        if charge_held {
            press_charged(player, timers);
        } else {
            // Button already came up mid-air: treat it as a tap
            launch(player, timers, MIN_JUMP_STRENGTH, events);
        }
    }

    if timers.buffer(JumpKind::Instant) > 0 {
        timers.set_buffer(JumpKind::Instant, 0);
        press_instant(player, timers, events);
    }
}

/// Ease the player toward an x offset from its home column
pub fn nudge(player: &mut Player, axis: f32) {
    let axis = axis.clamp(-1.0, 1.0);
    let axis = if axis.abs() < NUDGE_DEADZONE { 0.0 } else { axis };
    let target_x = player.home_x + axis * NUDGE_RANGE;
    player.pos.x += NUDGE_SPEED * (target_x - player.pos.x);
}
