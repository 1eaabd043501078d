//! Circular rigid bodies for the player and enemies
//!
//! Both kinds share the same physical fields; what differs is how they are
//! driven (input vs pursuit) and what a hit does to them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::settings::Settings;

/// Physical state of a disc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
}

impl Body {
    /// Create a resting body. Mass and radius must be finite and positive.
    pub fn new(pos: Vec2, radius: f32, mass: f32) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass { mass });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidRadius { radius });
        }
        Ok(Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            mass,
        })
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Which behavior drives an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Integrates from key input
    Player,
    /// Integrates by pursuing the player
    Enemy,
}

/// A simulated disc with combat state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub body: Body,
    /// Hits taken; only regeneration ever lowers it
    pub hits: u32,
    /// Cleared when destroyed mid-tick; dead entities are skipped until removed
    pub alive: bool,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, body: Body) -> Self {
        Self {
            id,
            kind,
            body,
            hits: 0,
            alive: true,
        }
    }

    /// Spawn an enemy at `pos` using the configured size and mass
    pub fn enemy(id: u32, pos: Vec2, settings: &Settings) -> Result<Self> {
        let body = Body::new(pos, settings.enemy_radius, settings.enemy_mass)?;
        Ok(Self::new(id, EntityKind::Enemy, body))
    }
}

/// The player disc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub entity: Entity,
    /// Radius at spawn; shrinking is measured against this
    pub original_radius: f32,
    /// Ticks until a wall hit can count again
    #[serde(default)]
    pub wall_cooldown: u32,
}

impl Player {
    pub fn new(id: u32, pos: Vec2, settings: &Settings) -> Result<Self> {
        let body = Body::new(pos, settings.player_radius, settings.player_mass)?;
        Ok(Self {
            entity: Entity::new(id, EntityKind::Player, body),
            original_radius: settings.player_radius,
            wall_cooldown: 0,
        })
    }

    #[inline]
    pub fn body(&self) -> &Body {
        &self.entity.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.entity.body
    }

    #[inline]
    pub fn hits(&self) -> u32 {
        self.entity.hits
    }
}
