//! Game driver
//!
//! Runs attempts at a fixed rate, resolves them through the [`Session`], and
//! shows the modal screens in between. Everything external (drawing, input,
//! time, sound, score storage) comes in through the platform traits, so the
//! same loop runs headless in tests.

use crate::audio::AudioManager;
use crate::consts::INITIALS_LEN;
use crate::highscores::{ScoreTable, finalize_initials};
use crate::persistence::ScoreStore;
use crate::platform::{Clock, FramePacer, InputEvent, InputSource};
use crate::renderer::{
    Hud, Renderer, draw_attempt, draw_initials_prompt, draw_message, draw_scoreboard,
};
use crate::session::{AttemptOutcome, Session, Transition};
use crate::settings::Settings;
use crate::sim::state::{Attempt, GameEvent, Viewport};
use crate::sim::tick::{TickInput, TickOutcome, tick};

pub struct Game<R, I, C, S> {
    settings: Settings,
    session: Session,
    renderer: R,
    input: I,
    clock: C,
    store: S,
    audio: AudioManager,
    runs_completed: u32,
    run_limit: Option<u32>,
}

impl<R, I, C, S> Game<R, I, C, S>
where
    R: Renderer,
    I: InputSource,
    C: Clock,
    S: ScoreStore,
{
    pub fn new(
        settings: Settings,
        renderer: R,
        input: I,
        clock: C,
        store: S,
        mut audio: AudioManager,
    ) -> Self {
        audio.set_master_volume(settings.volume);
        audio.set_muted(settings.muted);
        Self {
            session: Session::new(settings.starting_lives),
            settings,
            renderer,
            input,
            clock,
            store,
            audio,
            runs_completed: 0,
            run_limit: None,
        }
    }

    /// Stop after this many finished runs instead of starting a new game
    pub fn with_run_limit(mut self, runs: u32) -> Self {
        self.run_limit = Some(runs);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn runs_completed(&self) -> u32 {
        self.runs_completed
    }

    /// Play until quit (or until the run limit is hit)
    pub fn run(&mut self) {
        log::info!(
            "Starting game: {} levels, {} lives, {} Hz",
            self.settings.levels.len(),
            self.session.starting_lives,
            self.settings.tick_rate
        );

        loop {
            let Some(outcome) = self.play_attempt() else {
                log::info!("Quit during play");
                return;
            };

            let transition = self.session.resolve(outcome, self.settings.levels.len());
            let keep_going = match transition {
                Transition::NextLevel { level_index } => self.show_message(
                    "Level complete!",
                    Some(&format!("Press to start level {}", level_index + 1)),
                ),
                Transition::RetrySameLevel { lives, .. } => self.show_message(
                    "Game over",
                    Some(&format!("{} lives left - press to retry", lives)),
                ),
                Transition::AllLevelsComplete { final_score } => {
                    let coins = format!("{} coins", final_score);
                    self.show_message("You beat every level!", Some(&coins))
                        && self.finish_run(final_score)
                }
                Transition::OutOfLives { final_score } => {
                    let coins = format!("{} coins", final_score);
                    self.show_message("Out of lives", Some(&coins)) && self.finish_run(final_score)
                }
            };

            if !keep_going {
                log::info!("Quit from menu");
                return;
            }
            if self.run_limit.is_some_and(|limit| self.runs_completed >= limit) {
                log::info!("Run limit reached after {} run(s)", self.runs_completed);
                return;
            }
        }
    }

    /// Run one attempt to completion. `None` means the player quit.
    fn play_attempt(&mut self) -> Option<AttemptOutcome> {
        let mut attempt = self.session.start_attempt(
            &self.settings.levels,
            self.settings.viewport,
            self.settings.level_duration_secs,
        );
        let start = self.clock.now_secs();
        let mut pacer = FramePacer::new(self.settings.tick_rate, start);

        loop {
            let mut input = TickInput::default();
            for event in self.input.poll_events() {
                match event {
                    InputEvent::Quit => return None,
                    InputEvent::JumpChargeDown => input.charge_pressed = true,
                    InputEvent::JumpChargeUp => input.charge_released = true,
                    InputEvent::InstantJumpDown => input.instant_pressed = true,
                    _ => {}
                }
            }
            input.charge_held = self.input.is_jump_charge_held();
            input.axis = self.input.horizontal_axis();
            input.elapsed_secs = (self.clock.now_secs() - start) as f32;

            let report = tick(&mut attempt, &input);
            let coins = report
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::CoinCollected))
                .count() as u32;
            self.session.collect(coins);
            self.audio.play_events(&report.events);

            let hud = self.hud(&attempt, input.elapsed_secs);
            draw_attempt(&mut self.renderer, &attempt, &hud);

            match report.outcome {
                TickOutcome::Running => {}
                TickOutcome::Succeeded => {
                    log::info!(
                        "Level {} survived after {} ticks",
                        attempt.level_index + 1,
                        attempt.time_ticks
                    );
                    return Some(AttemptOutcome::Succeeded);
                }
                TickOutcome::Died(hazard) => return Some(AttemptOutcome::Died(hazard)),
            }

            pacer.wait(&mut self.clock);
        }
    }

    fn hud(&self, attempt: &Attempt, elapsed_secs: f32) -> Hud {
        Hud {
            remaining_secs: attempt.remaining_secs(elapsed_secs),
            coins: self.session.total_coins(),
            level_number: attempt.level_index + 1,
            level_count: self.settings.levels.len(),
            lives: self.session.lives,
        }
    }

    /// Initials, record, scoreboard. Returns false on quit.
    fn finish_run(&mut self, final_score: u32) -> bool {
        let Some(name) = self.enter_initials(final_score) else {
            return false;
        };
        let table = self.session.record_final_score(&name, &mut self.store);
        self.runs_completed += 1;

        // Ties insert below, so the new row is the last match
        let highlight = table
            .entries()
            .iter()
            .rposition(|e| e.name == name && e.score == final_score);
        self.show_scoreboard(&table, highlight)
    }

    fn show_message(&mut self, title: &str, subtitle: Option<&str>) -> bool {
        self.wait_for_continue(|r, vp| draw_message(r, vp, title, subtitle))
    }

    fn show_scoreboard(&mut self, table: &ScoreTable, highlight: Option<usize>) -> bool {
        self.wait_for_continue(|r, vp| draw_scoreboard(r, vp, table, highlight))
    }

    /// Redraw a static screen until continue (true) or quit (false)
    fn wait_for_continue(&mut self, draw: impl Fn(&mut R, &Viewport)) -> bool {
        loop {
            draw(&mut self.renderer, &self.settings.viewport);
            for event in self.input.poll_events() {
                match event {
                    InputEvent::Quit => return false,
                    InputEvent::Continue | InputEvent::Confirm => return true,
                    _ => {}
                }
            }
            self.clock.sleep(self.settings.tick_secs());
        }
    }

    /// Collect up to three letters. `None` means the player quit.
    fn enter_initials(&mut self, score: u32) -> Option<String> {
        let mut typed = String::new();
        loop {
            draw_initials_prompt(&mut self.renderer, &self.settings.viewport, &typed, score);
            for event in self.input.poll_events() {
                match event {
                    InputEvent::Quit => return None,
                    InputEvent::Letter(c)
                        if c.is_ascii_alphabetic() && typed.len() < INITIALS_LEN =>
                    {
                        typed.push(c.to_ascii_uppercase());
                    }
                    InputEvent::Backspace => {
                        typed.pop();
                    }
                    InputEvent::Confirm => return Some(finalize_initials(&typed)),
                    _ => {}
                }
            }
            self.clock.sleep(self.settings.tick_secs());
        }
    }
}
