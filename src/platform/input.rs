//! Input events and the source trait
//!
//! Edge events are drained once per tick (or per modal-screen poll).
//! Continuous state is queried separately so a press is never lost on a
//! frame with no events.

use std::collections::VecDeque;

/// Discrete button edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    JumpChargeDown,
    JumpChargeUp,
    InstantJumpDown,
    /// Dismiss a modal screen
    Continue,
    /// Typed letter on the initials screen
    Letter(char),
    Backspace,
    Confirm,
    Quit,
}

pub trait InputSource {
    /// Drain the edge events that arrived since the last call
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Whether the charge button is down right now
    fn is_jump_charge_held(&self) -> bool;

    /// Analog stick x in [-1, 1]; zero without a controller
    fn horizontal_axis(&self) -> f32 {
        0.0
    }
}

#[derive(Debug, Clone)]
enum Step {
    Poll(Vec<InputEvent>),
    Axis(f32),
}

/// Replays a queue of per-poll event batches and stick moves. Tracks the
/// held state of the charge button from the edges it hands out. Runs out
/// into empty polls.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: VecDeque<Step>,
    held: bool,
    axis: f32,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a batch for one poll
    pub fn push(&mut self, events: Vec<InputEvent>) -> &mut Self {
        self.steps.push_back(Step::Poll(events));
        self
    }

    /// Queue `n` polls with no events
    pub fn idle(&mut self, n: usize) -> &mut Self {
        for _ in 0..n {
            self.steps.push_back(Step::Poll(Vec::new()));
        }
        self
    }

    /// Move the stick; takes effect from the next queued poll on
    pub fn axis(&mut self, axis: f32) -> &mut Self {
        self.steps.push_back(Step::Axis(axis.clamp(-1.0, 1.0)));
        self
    }

    /// Polls still queued
    pub fn remaining(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, Step::Poll(_)))
            .count()
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let events = loop {
            match self.steps.pop_front() {
                Some(Step::Axis(axis)) => self.axis = axis,
                Some(Step::Poll(events)) => break events,
                None => break Vec::new(),
            }
        };
        for event in &events {
            match event {
                InputEvent::JumpChargeDown => self.held = true,
                InputEvent::JumpChargeUp => self.held = false,
                _ => {}
            }
        }
        events
    }

    fn is_jump_charge_held(&self) -> bool {
        self.held
    }

    fn horizontal_axis(&self) -> f32 {
        self.axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_tracks_held() {
        let mut input = ScriptedInput::new();
        input
            .push(vec![InputEvent::JumpChargeDown])
            .idle(1)
            .push(vec![InputEvent::JumpChargeUp]);

        assert_eq!(input.poll_events(), vec![InputEvent::JumpChargeDown]);
        assert!(input.is_jump_charge_held());
        assert!(input.poll_events().is_empty());
        assert!(input.is_jump_charge_held());
        input.poll_events();
        assert!(!input.is_jump_charge_held());
        assert_eq!(input.remaining(), 0);
        assert!(input.poll_events().is_empty());
        assert_eq!(input.horizontal_axis(), 0.0);
    }

    #[test]
    fn test_scripted_axis_changes_between_polls() {
        let mut input = ScriptedInput::new();
        input.axis(0.5).idle(2).axis(-3.0).idle(1).axis(0.0);
        assert_eq!(input.remaining(), 3);

        input.poll_events();
        assert_eq!(input.horizontal_axis(), 0.5);
        input.poll_events();
        assert_eq!(input.horizontal_axis(), 0.5);
        input.poll_events();
        assert_eq!(input.horizontal_axis(), -1.0);
        // Trailing moves apply on the next (empty) poll
        assert!(input.poll_events().is_empty());
        assert_eq!(input.horizontal_axis(), 0.0);
    }
}
