//! Fire Arena - A circular arena survival game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, boundary, collisions, combat, lifecycle)
//! - `settings`: Data-driven game balance per game mode
//! - `highscores`: Leaderboard ranking for finished runs
//! - `platform`: Browser bindings for the host renderer
//! - `error`: Construction and configuration errors

pub mod error;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use highscores::HighScores;
pub use settings::{GameMode, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate the arena tuning was authored at)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame rate that per-frame friction factors are expressed in
    pub const REFERENCE_HZ: f32 = 60.0;

    /// Default arena dimensions
    pub const ARENA_CENTER_X: f32 = 400.0;
    pub const ARENA_CENTER_Y: f32 = 300.0;
    pub const ARENA_OUTER_RADIUS: f32 = 300.0;
    /// Ring boundaries as fractions of the outer radius (inner, middle)
    pub const RING_FRACTIONS: [f32; 2] = [1.0 / 3.0, 2.0 / 3.0];

    /// Enemies spawn this far inside the wall
    pub const SPAWN_MARGIN: f32 = 10.0;
    /// Countdown before a run starts
    pub const COUNTDOWN_SECONDS: u32 = 3;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Clamp each component of `v` to `[-max, max]`
#[inline]
pub fn clamp_components(v: Vec2, max: f32) -> Vec2 {
    v.clamp(Vec2::splat(-max), Vec2::splat(max))
}

/// Zero out components whose magnitude is below `epsilon`
#[inline]
pub fn snap_small(v: Vec2, epsilon: f32) -> Vec2 {
    Vec2::new(
        if v.x.abs() < epsilon { 0.0 } else { v.x },
        if v.y.abs() < epsilon { 0.0 } else { v.y },
    )
}

/// Kinetic energy of a body
#[inline]
pub fn kinetic_energy(mass: f32, vel: Vec2) -> f32 {
    0.5 * mass * vel.length_squared()
}

/// Scale a per-frame decay factor to an arbitrary timestep
#[inline]
pub fn frame_factor(per_frame: f32, dt: f32) -> f32 {
    per_frame.powf(dt * consts::REFERENCE_HZ)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_small() {
        let v = snap_small(Vec2::new(0.05, -3.0), 0.1);
        assert_eq!(v, Vec2::new(0.0, -3.0));
    }

    #[test]
    fn test_clamp_components() {
        let v = clamp_components(Vec2::new(500.0, -700.0), 480.0);
        assert_eq!(v, Vec2::new(480.0, -480.0));
    }

    #[test]
    fn test_frame_factor_matches_per_frame_at_reference_rate() {
        let f = frame_factor(0.95, consts::SIM_DT);
        assert!((f - 0.95).abs() < 1e-5);
        // Two half-steps decay as much as one full step
        let half = frame_factor(0.95, consts::SIM_DT / 2.0);
        assert!((half * half - 0.95).abs() < 1e-5);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(100.0, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-3);
        assert!((p.y - 100.0).abs() < 1e-3);
    }
}
