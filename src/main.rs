//! Fire Arena headless runner
//!
//! Plays one scripted run at the fixed timestep and prints the result.
//! The browser build drives the library through `platform::ArenaGame` instead.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use glam::Vec2;

    use fire_arena::consts::SIM_DT;
    use fire_arena::platform::FrameLoop;
    use fire_arena::sim::{GameEvent, GamePhase, GameState, KeyState};
    use fire_arena::{GameMode, HighScores, Result, Settings};

    #[derive(Debug, Parser)]
    #[command(name = "fire-arena")]
    #[command(about = "Play one scripted Fire Arena run and print the score")]
    pub struct Args {
        /// Game mode: classic or overcharge (overrides the settings file)
        #[arg(long, value_parser = parse_mode)]
        pub mode: Option<GameMode>,

        /// RNG seed for enemy spawns
        #[arg(long, default_value = "1")]
        pub seed: u64,

        /// Longest run to simulate, in seconds
        #[arg(long, default_value = "60", value_parser = parse_seconds)]
        pub seconds: f32,

        /// Settings JSON file
        #[arg(long)]
        pub settings: Option<PathBuf>,
    }

    fn parse_mode(s: &str) -> std::result::Result<GameMode, String> {
        GameMode::from_str(s).ok_or_else(|| format!("unknown mode `{}`", s))
    }

    fn parse_seconds(s: &str) -> std::result::Result<f32, String> {
        s.parse::<f32>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| format!("expected a positive duration, got `{}`", s))
    }

    /// Circle the arena in the middle ring, steering with the four keys
    pub fn circling_keys(state: &GameState) -> KeyState {
        let arena = &state.arena;
        let offset = state.player.body().pos - arena.center;
        let r = offset.length();
        let radial = offset.normalize_or_zero();
        let tangent = Vec2::new(-radial.y, radial.x);

        let target_r = arena.outer_radius * 0.5;
        let correction = (target_r - r) / target_r;
        let dir = if r < 1.0 {
            Vec2::X
        } else {
            tangent + radial * correction * 2.0
        };

        KeyState {
            up: dir.y < -0.3,
            down: dir.y > 0.3,
            left: dir.x < -0.3,
            right: dir.x > 0.3,
        }
    }

    /// Settings from the file if given, with `mode` and its balance applied on top
    pub fn load_settings(path: Option<&Path>, mode: Option<GameMode>) -> Result<Settings> {
        Ok(match (path, mode) {
            (Some(path), None) => Settings::load(path)?,
            (Some(path), Some(mode)) => {
                let mut s = Settings::load(path)?;
                s.apply_mode(mode);
                s.validate()?;
                s
            }
            (None, mode) => Settings::for_mode(mode.unwrap_or_default()),
        })
    }

    pub fn run(args: Args) -> Result<()> {
        let settings = load_settings(args.settings.as_deref(), args.mode)?;
        let mode = settings.mode;

        let state = GameState::new(args.seed, settings)?;
        let mut game = FrameLoop::new(state);
        game.input.start = true;

        let max_ticks = (args.seconds / SIM_DT).ceil() as u64;
        log::info!(
            "Running {} mode, seed {}, up to {}s",
            mode.as_str(),
            args.seed,
            args.seconds
        );

        while game.state.time_ticks < max_ticks && game.state.phase != GamePhase::GameOver {
            game.set_keys(circling_keys(&game.state));
            game.input.explode = game.state.stats.is_overcharged();
            game.advance(SIM_DT);

            for event in game.drain_events() {
                match event {
                    GameEvent::CountdownTick { remaining } => log::info!("{}...", remaining),
                    GameEvent::Started => log::info!("Go!"),
                    GameEvent::EnemyDestroyed { id, .. } => log::debug!("Enemy {} down", id),
                    GameEvent::Exploded { destroyed, .. } => {
                        log::info!("Overcharge burst took out {}", destroyed)
                    }
                    GameEvent::GameOver { score, cause } => {
                        log::info!("Game over ({:?}) with score {}", cause, score)
                    }
                    _ => {}
                }
            }
        }

        let score = game.state.final_score();
        let elapsed = game.state.time_ms / 1000.0;
        println!(
            "{} run (seed {}): score {} after {:.1}s, {} enemies destroyed",
            mode.as_str(),
            args.seed,
            score,
            elapsed,
            game.state.enemies_destroyed
        );

        let mut board = HighScores::new();
        match board.add_score("headless", score, game.state.time_ms) {
            Some(rank) => println!("Leaderboard rank: #{}", rank),
            None => println!("Score did not make the leaderboard"),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();

    let args = headless::Args::parse();
    if let Err(e) = headless::run(args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::ArenaGame, this is just to satisfy the compiler
}
