//! Movement integration
//!
//! One step of acceleration -> velocity -> position for each kind of entity.
//! Friction factors are per 60 Hz frame and rescaled to `dt`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::settings::Settings;
use crate::{clamp_components, frame_factor, snap_small};

/// Raw 4-way key state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    /// Unit input per axis (screen coordinates, +y is down)
    pub fn axis(&self) -> Vec2 {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        Vec2::new(x, y)
    }

    #[inline]
    fn horizontal_held(&self) -> bool {
        self.left || self.right
    }

    #[inline]
    fn vertical_held(&self) -> bool {
        self.up || self.down
    }
}

/// Limits applied after acceleration
#[derive(Debug, Clone, Copy)]
pub struct MotionLimits {
    pub max_speed: f32,
    pub stop_speed: f32,
}

/// Integrate the player from key input.
///
/// Friction only acts on an axis with no key held, so steering on one axis
/// never bleeds speed from the other.
pub fn integrate_player(body: &mut Body, keys: &KeyState, settings: &Settings, dt: f32) {
    body.vel += keys.axis() * settings.player_acceleration * dt;

    let friction = frame_factor(settings.player_friction, dt);
    if !keys.horizontal_held() {
        body.vel.x *= friction;
    }
    if !keys.vertical_held() {
        body.vel.y *= friction;
    }

    let limits = MotionLimits {
        max_speed: settings.player_max_speed,
        stop_speed: settings.stop_speed,
    };
    finish_step(body, limits, dt);
}

/// Integrate an enemy chasing `target`.
///
/// Plain seek: accelerate straight at the target's current position.
pub fn integrate_pursuit(body: &mut Body, target: Vec2, settings: &Settings, dt: f32) {
    let dir = (target - body.pos).normalize_or_zero();
    body.vel += dir * settings.enemy_acceleration * dt;
    body.vel *= frame_factor(settings.enemy_friction, dt);

    let limits = MotionLimits {
        max_speed: settings.enemy_max_speed,
        stop_speed: settings.stop_speed,
    };
    finish_step(body, limits, dt);
}

/// Clamp, snap, and advance position
fn finish_step(body: &mut Body, limits: MotionLimits, dt: f32) {
    body.vel = clamp_components(body.vel, limits.max_speed);
    body.vel = snap_small(body.vel, limits.stop_speed);
    body.pos += body.vel * dt;
}
