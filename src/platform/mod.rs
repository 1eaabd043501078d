//! Platform abstraction layer
//!
//! Frame pacing for hosts that call in at display rate, plus the browser
//! handle a JS renderer drives. The simulation never sees wall-clock time.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GameState, KeyState, TickInput, tick};

/// Largest frame delta accepted before clamping (tab switches, breakpoints)
pub const MAX_FRAME_DT: f32 = 0.1;

/// Runs a `GameState` at the fixed timestep from variable frame deltas
#[derive(Debug)]
pub struct FrameLoop {
    pub state: GameState,
    pub input: TickInput,
    accumulator: f32,
}

impl FrameLoop {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    pub fn set_keys(&mut self, keys: KeyState) {
        self.input.keys = keys;
    }

    /// Advance by `dt` seconds of real time. Returns the substeps taken.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot inputs fire on a single tick
            self.input.explode = false;
            self.input.start = false;
            self.input.restart = false;
        }

        if substeps == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.take_events()
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    use super::FrameLoop;
    use crate::settings::{GameMode, Settings};
    use crate::sim::{GameState, KeyState};

    fn to_js(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Browser handle: the page feeds input and frame times, reads JSON back
    #[wasm_bindgen]
    pub struct ArenaGame {
        inner: FrameLoop,
    }

    #[wasm_bindgen]
    impl ArenaGame {
        #[wasm_bindgen(constructor)]
        pub fn new(seed: u64, mode: &str) -> Result<ArenaGame, JsValue> {
            let mode = GameMode::from_str(mode).unwrap_or_default();
            let state = GameState::new(seed, Settings::for_mode(mode)).map_err(to_js)?;
            Ok(Self {
                inner: FrameLoop::new(state),
            })
        }

        /// Replace the settings from a JSON document and start over
        pub fn load_settings(&mut self, json: &str, seed: u64) -> Result<(), JsValue> {
            let settings = Settings::from_json(json).map_err(to_js)?;
            let state = GameState::new(seed, settings).map_err(to_js)?;
            self.inner = FrameLoop::new(state);
            Ok(())
        }

        pub fn set_keys(&mut self, up: bool, down: bool, left: bool, right: bool) {
            self.inner.set_keys(KeyState {
                up,
                down,
                left,
                right,
            });
        }

        pub fn start(&mut self) {
            self.inner.input.start = true;
        }

        pub fn restart(&mut self) {
            self.inner.input.restart = true;
        }

        pub fn explode(&mut self) {
            self.inner.input.explode = true;
        }

        pub fn resize(&mut self, width: f32, height: f32) {
            self.inner.state.arena.resize(width, height);
        }

        /// Advance by `dt` seconds; returns the substeps taken
        pub fn frame(&mut self, dt: f32) -> u32 {
            self.inner.advance(dt)
        }

        pub fn state_json(&self) -> Result<String, JsValue> {
            serde_json::to_string(&self.inner.state).map_err(to_js)
        }

        pub fn events_json(&mut self) -> Result<String, JsValue> {
            serde_json::to_string(&self.inner.drain_events()).map_err(to_js)
        }

        pub fn score(&self) -> u64 {
            self.inner.state.final_score()
        }
    }

    #[wasm_bindgen(start)]
    pub fn init() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::ArenaGame;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameMode;
    use crate::sim::GamePhase;

    fn frame_loop() -> FrameLoop {
        FrameLoop::new(GameState::for_mode(11, GameMode::Classic).expect("valid settings"))
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut fl = frame_loop();
        assert_eq!(fl.advance(SIM_DT * 0.5), 0);
        assert_eq!(fl.advance(SIM_DT * 0.6), 1);
        assert_eq!(fl.state.time_ticks, 1);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut fl = frame_loop();
        // Huge deltas are clamped before they reach the accumulator
        assert!(fl.advance(10.0) <= 6);

        fl.accumulator = 1.0;
        assert_eq!(fl.advance(0.0), MAX_SUBSTEPS);
        // Backlog dropped: an empty frame doesn't keep catching up
        assert!(fl.advance(0.0) <= 1);
    }

    #[test]
    fn test_one_shot_inputs_clear() {
        let mut fl = frame_loop();
        fl.input.start = true;
        fl.advance(SIM_DT * 1.01);
        assert_eq!(fl.state.phase, GamePhase::Countdown);
        assert!(!fl.input.start);
    }
}
