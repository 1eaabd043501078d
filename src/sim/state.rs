//! Game state and core simulation types
//!
//! `GameState` is the single simulation context: it owns the player, the
//! enemy collection, the arena, timers and counters. Nothing is global.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Ring};
use super::entity::{Entity, Player};
use super::schedule::{Schedule, ScheduledKind};
use super::zones::{PlayerStats, RegenTracker};
use crate::consts::{COUNTDOWN_SECONDS, SPAWN_MARGIN};
use crate::error::Result;
use crate::settings::{GameMode, Settings};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start input
    NotStarted,
    /// Counting down before play
    Countdown,
    /// Active gameplay
    Running,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Player hit count reached the limit
    Worn,
    /// Player health ran out
    Drained,
    /// Player touched the lava wall
    Burned,
}

/// Side data for the renderer and HUD, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Motion streak behind a moving entity
    Trail {
        id: u32,
        pos: Vec2,
        vel: Vec2,
        speed: f32,
    },
    /// Two discs struck each other
    Impact { pos: Vec2 },
    /// A disc hit the wall; `intensity` drives screen shake
    WallHit { id: u32, pos: Vec2, intensity: f32 },
    CountdownTick { remaining: u32 },
    Started,
    EnemySpawned { id: u32, pos: Vec2 },
    EnemyDestroyed { id: u32, pos: Vec2 },
    PlayerHit { hits: u32 },
    Regenerated { hits: u32 },
    Exploded { pos: Vec2, radius: f32, destroyed: u32 },
    GameOver { score: u64, cause: GameOverCause },
}

/// What the leaderboard needs from a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub name: String,
    pub score: u64,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh generator for the next draw; each call uses a new stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub settings: Settings,
    pub arena: Arena,
    pub phase: GamePhase,
    /// Simulation clock (monotonic, milliseconds)
    pub time_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds left on the start countdown
    pub countdown: u32,
    pub player: Player,
    /// Live enemies (sorted by id for determinism)
    pub enemies: Vec<Entity>,
    pub stats: PlayerStats,
    pub regen: RegenTracker,
    /// Ring the player occupied at the end of the last tick
    pub current_ring: Ring,
    pub enemies_destroyed: u32,
    pub schedule: Schedule,
    /// Set when the run ends
    pub game_over: Option<GameOverCause>,
    /// Events emitted since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with the given seed and settings
    pub fn new(seed: u64, settings: Settings) -> Result<Self> {
        settings.validate()?;
        let arena = Arena::default();
        let player = Player::new(1, arena.center, &settings)?;

        Ok(Self {
            seed,
            rng_state: RngState::new(seed),
            stats: PlayerStats::new(&settings),
            regen: RegenTracker::new(&settings),
            current_ring: Ring::Inner,
            settings,
            arena,
            phase: GamePhase::NotStarted,
            time_ms: 0.0,
            time_ticks: 0,
            countdown: 0,
            player,
            enemies: Vec::new(),
            enemies_destroyed: 0,
            schedule: Schedule::new(),
            game_over: None,
            events: Vec::new(),
            next_id: 2,
        })
    }

    /// New game with the default settings for `mode`
    pub fn for_mode(seed: u64, mode: GameMode) -> Result<Self> {
        Self::new(seed, Settings::for_mode(mode))
    }

    pub fn mode(&self) -> GameMode {
        self.settings.mode
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the accumulated events to the caller
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// NotStarted/GameOver -> Countdown
    pub fn begin_countdown(&mut self) {
        self.countdown = COUNTDOWN_SECONDS;
        self.phase = GamePhase::Countdown;
        self.schedule.clear();
        for i in 1..=COUNTDOWN_SECONDS {
            self.schedule
                .once(self.time_ms + i as f64 * 1000.0, ScheduledKind::CountdownStep);
        }
        self.emit(GameEvent::CountdownTick {
            remaining: self.countdown,
        });
        log::info!("Countdown started ({}s)", COUNTDOWN_SECONDS);
    }

    /// Countdown -> Running; arms the spawn timer
    pub fn begin_running(&mut self) {
        self.phase = GamePhase::Running;
        if !self.schedule.contains(ScheduledKind::SpawnEnemy) {
            self.schedule.every(
                self.time_ms + self.settings.spawn_interval_ms,
                self.settings.spawn_interval_ms,
                ScheduledKind::SpawnEnemy,
            );
        }
        self.regen.reset();
        self.emit(GameEvent::Started);
        log::info!("Run started in {} mode", self.mode().as_str());
    }

    /// Spawn an enemy just inside the wall at a random angle
    pub fn spawn_enemy(&mut self) -> Result<u32> {
        let theta = self
            .rng_state
            .next_rng()
            .random_range(0.0..std::f32::consts::TAU);
        let pos = self.arena.spawn_point(theta, SPAWN_MARGIN);
        let id = self.next_entity_id();
        let enemy = Entity::enemy(id, pos, &self.settings)?;
        self.enemies.push(enemy);
        self.emit(GameEvent::EnemySpawned { id, pos });
        log::debug!("Spawned enemy {} at angle {:.2}", id, theta);
        Ok(id)
    }

    /// Score reported to the leaderboard
    pub fn final_score(&self) -> u64 {
        match self.mode() {
            GameMode::Classic => self.enemies_destroyed as u64,
            GameMode::Overcharge => self.stats.energy().floor() as u64,
        }
    }

    /// `(name, score)` for the leaderboard, once the run is over
    pub fn score_submission(&self, name: &str) -> Option<ScoreSubmission> {
        (self.phase == GamePhase::GameOver).then(|| ScoreSubmission {
            name: name.to_string(),
            score: self.final_score(),
        })
    }

    /// Running -> GameOver: stop spawning, clear enemies, report score
    pub fn end_run(&mut self, cause: GameOverCause) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over = Some(cause);
        self.schedule.clear();
        self.enemies.clear();
        let score = self.final_score();
        self.emit(GameEvent::GameOver { score, cause });
        log::info!("Game over ({:?}), score {}", cause, score);
    }

    /// Fresh player, stats, timers and an empty arena, then count down again
    pub fn reset(&mut self) -> Result<()> {
        self.player = Player::new(1, self.arena.center, &self.settings)?;
        self.stats = PlayerStats::new(&self.settings);
        self.regen = RegenTracker::new(&self.settings);
        self.current_ring = Ring::Inner;
        self.enemies.clear();
        self.enemies_destroyed = 0;
        self.game_over = None;
        self.next_id = 2;
        self.begin_countdown();
        Ok(())
    }

    /// Ensure enemies are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
    }

    /// Drop enemies destroyed during this tick
    pub fn remove_dead(&mut self) {
        self.enemies.retain(|e| e.alive);
    }
}
