//! Time sources
//!
//! The level timer runs on elapsed seconds, not tick counts, so it stays
//! fair when frames run slow. Tests swap in [`ManualClock`].

use std::time::{Duration, Instant};

pub trait Clock {
    /// Seconds since some fixed origin
    fn now_secs(&self) -> f64;

    /// Block until `secs` have passed
    fn sleep(&mut self, secs: f64);
}

/// Real monotonic time
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep(&mut self, secs: f64) {
        if secs > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(secs));
        }
    }
}

/// Virtual time that only moves when slept on or advanced by hand
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, secs: f64) {
        self.now += secs.max(0.0);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now
    }

    fn sleep(&mut self, secs: f64) {
        self.advance(secs);
    }
}

/// Paces a loop at a fixed rate against a [`Clock`]
#[derive(Debug, Clone)]
pub struct FramePacer {
    step: f64,
    next: f64,
}

impl FramePacer {
    pub fn new(rate: u32, now: f64) -> Self {
        let step = 1.0 / rate.max(1) as f64;
        Self {
            step,
            next: now + step,
        }
    }

    /// Sleep until the next frame boundary. A late frame does not try to
    /// catch up; the schedule restarts from now.
    pub fn wait(&mut self, clock: &mut dyn Clock) {
        let now = clock.now_secs();
        if self.next > now {
            clock.sleep(self.next - now);
            self.next += self.step;
        } else {
            if now - self.next > self.step {
                log::debug!("Frame ran {:.1}ms late", (now - self.next) * 1000.0);
            }
            self.next = now + self.step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_moves_on_sleep() {
        let mut clock = ManualClock::new();
        clock.sleep(0.5);
        clock.advance(0.25);
        clock.sleep(-1.0);
        assert_eq!(clock.now_secs(), 0.75);
    }

    #[test]
    fn test_pacer_sleeps_to_boundary() {
        let mut clock = ManualClock::new();
        let mut pacer = FramePacer::new(10, clock.now_secs());
        pacer.wait(&mut clock);
        assert!((clock.now_secs() - 0.1).abs() < 1e-9);

        clock.advance(0.05);
        pacer.wait(&mut clock);
        assert!((clock.now_secs() - 0.2).abs() < 1e-9);

        // Far behind: no sleep, schedule restarts
        clock.advance(1.0);
        let before = clock.now_secs();
        pacer.wait(&mut clock);
        assert_eq!(clock.now_secs(), before);
    }
}
