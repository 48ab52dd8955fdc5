//! Sound effects
//!
//! The core only says which effect to play; an [`AudioSink`] backend makes the
//! noise. [`AudioManager`] applies volume and mute on top of any sink.

use crate::sim::state::GameEvent;

pub const DEFAULT_VOLUME: f32 = 0.8;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Boing,
    /// Coin picked up
    Coin,
}

impl SoundEffect {
    /// Asset name a backend should load for this effect
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Boing => "boing",
            SoundEffect::Coin => "coin",
        }
    }

    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Jumped { .. } => SoundEffect::Boing,
            GameEvent::CoinCollected => SoundEffect::Coin,
        }
    }
}

pub trait AudioSink {
    /// Start an effect at `volume` in [0, 1]. Must not block.
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Writes each effect to the debug log
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("play {} at {:.2}", effect.name(), volume);
    }
}

/// Discards everything
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: DEFAULT_VOLUME,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play whatever the tick's events call for
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }
}
