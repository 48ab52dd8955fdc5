//! Square Dash entry point
//!
//! Runs the game headless with an autopilot input, a recording renderer and
//! the JSON score file. Useful for soak testing the loop and for watching the
//! log; a windowed frontend plugs its own `Renderer` and `InputSource` into
//! the same `Game`.
//!
//! Run with `--help` for the flags.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use square_dash::Game;
    use square_dash::audio::{AudioManager, LogAudio};
    use square_dash::persistence::JsonFileStore;
    use square_dash::platform::{Clock, InputEvent, InputSource, ManualClock, SystemClock};
    use square_dash::renderer::RecordingRenderer;
    use square_dash::settings::Settings;

    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Settings file, created with defaults by --write-settings
        #[arg(long, value_name = "PATH", default_value = "settings.json")]
        settings: PathBuf,
        /// Finished games to play before exiting
        #[arg(
            long,
            value_name = "COUNT",
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        runs: u32,
        /// Seed for the autopilot's button presses
        #[arg(long, value_name = "SEED", default_value_t = 0)]
        seed: u64,
        /// Pace ticks against the wall clock instead of a simulated one
        #[arg(long)]
        realtime: bool,
        /// Write the effective settings back to the settings file
        #[arg(long)]
        write_settings: bool,
    }

    /// Mashes the jump buttons at random and confirms every screen
    struct Autopilot {
        rng: Pcg32,
        held: bool,
    }

    impl Autopilot {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
                held: false,
            }
        }
    }

    impl InputSource for Autopilot {
        fn poll_events(&mut self) -> Vec<InputEvent> {
            let mut events = vec![InputEvent::Confirm];
            if self.held {
                if self.rng.random_bool(0.08) {
                    self.held = false;
                    events.push(InputEvent::JumpChargeUp);
                }
            } else if self.rng.random_bool(0.03) {
                self.held = true;
                events.push(InputEvent::JumpChargeDown);
            } else if self.rng.random_bool(0.04) {
                events.push(InputEvent::InstantJumpDown);
            }
            events
        }

        fn is_jump_charge_held(&self) -> bool {
            self.held
        }
    }

    fn play<C: Clock>(settings: Settings, args: &Args, clock: C) {
        let store = JsonFileStore::new(settings.score_file.clone());
        let mut game = Game::new(
            settings,
            RecordingRenderer::new(),
            Autopilot::new(args.seed),
            clock,
            store,
            AudioManager::new(Box::new(LogAudio)),
        )
        .with_run_limit(args.runs);

        game.run();

        log::info!(
            "Finished {} run(s), {} frames drawn",
            game.runs_completed(),
            game.renderer().frames()
        );
        for line in game.renderer().texts() {
            println!("{line}");
        }
    }

    pub fn main() -> anyhow::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
        log::info!("Square Dash (headless) starting...");

        let args = Args::parse();
        let settings = Settings::load(&args.settings);
        if args.write_settings {
            settings.save(&args.settings)?;
        }

        if args.realtime {
            play(settings, &args, SystemClock::new());
        } else {
            play(settings, &args, ManualClock::new());
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser frontend; the library is the deliverable on wasm
}
