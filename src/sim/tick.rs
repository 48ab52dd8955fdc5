//! Fixed timestep simulation tick
//!
//! One call advances an attempt by one frame in a fixed order: input,
//! physics, world scroll, collisions, timer.

use serde::{Deserialize, Serialize};

use super::collision::{self, Hazard};
use super::physics;
use super::state::{Attempt, GameEvent};

/// Input for a single tick: button edges plus continuous state
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Charge button went down this tick
    pub charge_pressed: bool,
    /// Charge button came up this tick
    pub charge_released: bool,
    /// Charge button is down right now
    pub charge_held: bool,
    /// Instant jump button went down this tick
    pub instant_pressed: bool,
    /// Analog horizontal axis in [-1, 1]
    pub axis: f32,
    /// Wall-clock seconds since the attempt started
    pub elapsed_secs: f32,
}

/// Where an attempt stands after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    Running,
    /// Timer ran out with the player alive
    Succeeded,
    Died(Hazard),
}

#[derive(Debug, Clone)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub events: Vec<GameEvent>,
}

/// Advance the attempt by one fixed timestep
pub fn tick(attempt: &mut Attempt, input: &TickInput) -> TickReport {
    let mut events = Vec::new();
    attempt.time_ticks += 1;

    // Input before physics so a press takes effect this same tick
    let player = &mut attempt.player;
    let timers = &mut attempt.timers;
    if input.charge_pressed {
        physics::press_charged(player, timers);
    }
    if input.instant_pressed {
        physics::press_instant(player, timers, &mut events);
    }
    if input.charge_held {
        physics::hold_charged(player);
    }
    if input.charge_released {
        physics::release_charged(player, timers, &mut events);
    }
    physics::nudge(player, input.axis);

    physics::integrate(player, &attempt.platforms);
    physics::update_forgiveness(player, timers, input.charge_held, &mut events);

    advance_entities(attempt);

    let player_rect = attempt.player.rect();
    let collected = collision::collect_coins(&player_rect, &mut attempt.coins);
    if collected > 0 {
        attempt.coins_collected += collected;
        events.extend(std::iter::repeat_n(GameEvent::CoinCollected, collected as usize));
    }

    let hazard = collision::check_hazards(&attempt.player, &attempt.obstacles, &attempt.spikes);
    let outcome = match hazard {
        Some(hazard) => TickOutcome::Died(hazard),
        None if attempt.remaining_secs(input.elapsed_secs) <= 0.0 => TickOutcome::Succeeded,
        None => TickOutcome::Running,
    };

    TickReport { outcome, events }
}

/// Scroll the world left and drop whatever has left the screen.
/// Endless levels top the platform list back up afterwards.
pub fn advance_entities(attempt: &mut Attempt) {
    for p in &mut attempt.platforms {
        p.pos.x -= p.speed;
    }
    for o in &mut attempt.obstacles {
        o.pos.x -= o.speed;
    }
    for c in &mut attempt.coins {
        c.pos.x -= c.speed;
    }

    attempt.platforms.retain(|p| p.pos.x + p.size.x >= 0.0);
    attempt.obstacles.retain(|o| o.pos.x + o.size.x >= 0.0);
    attempt.coins.retain(|c| c.pos.x + c.size.x >= 0.0);

    if let Some(stream) = attempt.stream.as_mut() {
        let added = stream.refill(
            &mut attempt.platforms,
            &mut attempt.obstacles,
            &mut attempt.coins,
        );
        if added > 0 {
            log::debug!("Endless level streamed {} platform(s)", added);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::level::{FixedLayout, GeneratedLevel, LevelSpec, SeededParams, generate};
    use crate::sim::state::{Coin, Obstacle, ObstacleSprite, Platform, Viewport};
    use glam::Vec2;

    /// One long platform under the spawn point, nothing else
    fn flat_attempt(duration: f32) -> Attempt {
        let vp = Viewport::default();
        let spec = LevelSpec::Fixed(FixedLayout {
            platforms: (0..40).map(|i| [i as f32 * 240.0, 560.0]).collect(),
            ..FixedLayout::default()
        });
        Attempt::new(vp, 0, duration, generate(&spec, &vp, duration))
    }

    fn settle(attempt: &mut Attempt) {
        for _ in 0..60 {
            let report = tick(attempt, &TickInput::default());
            assert_eq!(report.outcome, TickOutcome::Running);
        }
        assert!(attempt.player.on_ground);
    }

    #[test]
    fn test_player_falls_onto_first_platform() {
        let mut attempt = flat_attempt(100.0);
        settle(&mut attempt);
        assert_eq!(attempt.player.bottom(), 560.0);
    }

    #[test]
    fn test_same_tick_jump() {
        let mut attempt = flat_attempt(100.0);
        settle(&mut attempt);

        let input = TickInput {
            instant_pressed: true,
            ..Default::default()
        };
        let report = tick(&mut attempt, &input);
        assert!(!attempt.player.on_ground);
        assert!(attempt.player.bottom() < 560.0);
        assert_eq!(
            report.events,
            vec![GameEvent::Jumped {
                strength: MIN_JUMP_STRENGTH
            }]
        );
    }

    #[test]
    fn test_charge_over_several_ticks() {
        let mut attempt = flat_attempt(100.0);
        settle(&mut attempt);

        tick(
            &mut attempt,
            &TickInput {
                charge_pressed: true,
                charge_held: true,
                ..Default::default()
            },
        );
        for _ in 0..9 {
            tick(
                &mut attempt,
                &TickInput {
                    charge_held: true,
                    ..Default::default()
                },
            );
        }
        assert!(attempt.player.charging);
        assert_eq!(attempt.player.jump_charge, MIN_JUMP_STRENGTH + 10.0 * CHARGE_RATE);

        let report = tick(
            &mut attempt,
            &TickInput {
                charge_released: true,
                ..Default::default()
            },
        );
        assert_eq!(
            report.events,
            vec![GameEvent::Jumped {
                strength: MIN_JUMP_STRENGTH + 10.0 * CHARGE_RATE
            }]
        );
        assert_eq!(attempt.player.jump_charge, 0.0);
    }

    #[test]
    fn test_entities_scroll_and_cull() {
        let vp = Viewport::default();
        let level = GeneratedLevel {
            platforms: vec![
                Platform::new(Vec2::new(-238.0, 500.0), &vp),
                Platform::new(Vec2::new(600.0, 500.0), &vp),
            ],
            obstacles: vec![Obstacle::new(Vec2::new(-36.0, 460.0), ObstacleSprite::Spark, &vp)],
            coins: vec![Coin::new(Vec2::new(300.0, 400.0), &vp)],
            stream: None,
        };
        let mut attempt = Attempt::new(vp, 0, 100.0, level);

        advance_entities(&mut attempt);
        assert_eq!(attempt.platforms.len(), 1);
        assert_eq!(attempt.platforms[0].pos.x, 600.0 - SCROLL_SPEED);
        assert!(attempt.obstacles.is_empty());
        assert_eq!(attempt.coins[0].pos.x, 300.0 - SCROLL_SPEED);
    }

    #[test]
    fn test_coin_collection_counts() {
        let mut attempt = flat_attempt(100.0);
        settle(&mut attempt);
        let vp = attempt.viewport;
        let p = attempt.player.pos;
        // Sits on the player after one tick of scrolling
        attempt.coins.push(Coin::new(Vec2::new(p.x + SCROLL_SPEED, p.y), &vp));

        let report = tick(&mut attempt, &TickInput::default());
        assert_eq!(attempt.coins_collected, 1);
        assert!(attempt.coins.is_empty());
        assert_eq!(report.events, vec![GameEvent::CoinCollected]);
    }

    #[test]
    fn test_obstacle_kills() {
        let mut attempt = flat_attempt(100.0);
        settle(&mut attempt);
        let vp = attempt.viewport;
        let p = attempt.player.pos;
        attempt
            .obstacles
            .push(Obstacle::new(Vec2::new(p.x, 520.0), ObstacleSprite::Spark, &vp));

        let report = tick(&mut attempt, &TickInput::default());
        assert_eq!(report.outcome, TickOutcome::Died(Hazard::Obstacle));
    }

    #[test]
    fn test_falling_into_spikes() {
        let vp = Viewport::default();
        let mut attempt = Attempt::new(vp, 0, 100.0, GeneratedLevel::default());
        let mut outcome = TickOutcome::Running;
        for _ in 0..100 {
            outcome = tick(&mut attempt, &TickInput::default()).outcome;
            if outcome != TickOutcome::Running {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Died(Hazard::Spikes));
    }

    #[test]
    fn test_timer_success_and_death_priority() {
        let mut attempt = flat_attempt(1.0);
        let input = TickInput {
            elapsed_secs: 0.5,
            ..Default::default()
        };
        assert_eq!(tick(&mut attempt, &input).outcome, TickOutcome::Running);
        let input = TickInput {
            elapsed_secs: 1.0,
            ..Default::default()
        };
        assert_eq!(tick(&mut attempt, &input).outcome, TickOutcome::Succeeded);

        // Death on the same tick the timer expires is still a death
        let mut attempt = flat_attempt(1.0);
        attempt.player.pos.y = attempt.spikes.top;
        let input = TickInput {
            elapsed_secs: 5.0,
            ..Default::default()
        };
        assert_eq!(
            tick(&mut attempt, &input).outcome,
            TickOutcome::Died(Hazard::Spikes)
        );
    }

    #[test]
    fn test_axis_nudges_then_eases_home() {
        let mut attempt = flat_attempt(100.0);
        settle(&mut attempt);
        let home = attempt.player.home_x;
        let pushed = TickInput {
            axis: 1.0,
            ..Default::default()
        };

        for _ in 0..30 {
            tick(&mut attempt, &pushed);
        }
        assert!(attempt.player.pos.x > home + NUDGE_RANGE - 10.0);
        assert!(attempt.player.pos.x <= home + NUDGE_RANGE);
        assert!(attempt.player.on_ground);

        for _ in 0..40 {
            tick(&mut attempt, &TickInput::default());
        }
        assert!((attempt.player.pos.x - home).abs() < 0.5);
        assert_eq!(attempt.player.home_x, home);
    }

    #[test]
    fn test_determinism() {
        let vp = Viewport::default();
        let spec = LevelSpec::Endless(SeededParams {
            seed: 77,
            ..SeededParams::default()
        });
        let mut a = Attempt::new(vp, 0, 100.0, generate(&spec, &vp, 100.0));
        let mut b = Attempt::new(vp, 0, 100.0, generate(&spec, &vp, 100.0));

        for i in 0..300u32 {
            let input = TickInput {
                instant_pressed: i % 17 == 0,
                charge_pressed: i % 40 == 5,
                charge_held: i % 40 >= 5 && i % 40 < 20,
                charge_released: i % 40 == 20,
                ..Default::default()
            };
            let ra = tick(&mut a, &input);
            let rb = tick(&mut b, &input);
            assert_eq!(ra.outcome, rb.outcome);
            assert_eq!(ra.events, rb.events);
            if ra.outcome != TickOutcome::Running {
                break;
            }
        }
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.platforms, b.platforms);
    }
}
