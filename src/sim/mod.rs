//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod arena;
pub mod boundary;
pub mod collision;
pub mod combat;
pub mod entity;
pub mod movement;
pub mod schedule;
pub mod state;
pub mod tick;
pub mod zones;

pub use arena::{Arena, Ring};
pub use boundary::{BoundaryOutcome, BoundaryPolicy, resolve_boundary};
pub use collision::{CollisionResult, ImpulseParams, circle_collision, resolve_elastic};
pub use entity::{Body, Entity, EntityKind, Player};
pub use movement::KeyState;
pub use state::{GameEvent, GameOverCause, GamePhase, GameState, ScoreSubmission};
pub use tick::{TickInput, tick};
pub use zones::{PlayerStats, RegenTracker};
