//! Game settings and balance
//!
//! Every physics and combat constant is a named field here so the two game
//! modes share one implementation and differ only in numbers and policy.
//! Velocities are in px/s, accelerations in px/s², times in milliseconds.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Hit-count survival: bouncy walls, ring regeneration, score = enemies destroyed
    #[default]
    Classic,
    /// Energy survival: lava walls, speed charges energy, overcharge explode
    Overcharge,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Overcharge => "Overcharge",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "overcharge" | "energy" => Some(GameMode::Overcharge),
            _ => None,
        }
    }

    /// Whether touching the arena wall ends the run
    pub fn fatal_wall(&self) -> bool {
        matches!(self, GameMode::Overcharge)
    }
}

/// Tunable simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: GameMode,

    // === Player movement ===
    pub player_radius: f32,
    pub player_mass: f32,
    pub player_acceleration: f32,
    pub player_max_speed: f32,
    /// Per-frame velocity factor on an axis with no input held
    pub player_friction: f32,
    /// Velocity components below this snap to zero
    pub stop_speed: f32,

    // === Enemy movement ===
    pub enemy_radius: f32,
    pub enemy_mass: f32,
    pub enemy_acceleration: f32,
    pub enemy_max_speed: f32,
    /// Per-frame velocity factor, always applied
    pub enemy_friction: f32,
    pub spawn_interval_ms: f64,

    // === Collisions ===
    pub restitution: f32,
    pub max_impulse: f32,
    /// Velocity kept when the player bounces off the wall
    pub player_wall_restitution: f32,
    /// Velocity kept when an enemy bounces off the wall
    pub enemy_wall_restitution: f32,
    /// Ticks after a wall hit before another one can hurt
    pub wall_hit_cooldown_ticks: u32,
    /// Whether enemy-enemy contacts also count as hits (physics only when false)
    pub enemy_collision_damage: bool,

    // === Classic combat ===
    pub max_player_hits: u32,
    pub enemy_kill_hits: u32,
    /// Smallest player radius as a fraction of the starting radius
    pub radius_floor: f32,
    pub mass_per_hit: f32,
    pub inner_regen_ms: f64,
    pub middle_regen_ms: f64,

    // === Overcharge combat ===
    pub max_energy: f32,
    pub start_energy: f32,
    pub energy_per_speed: f32,
    /// Energy gain multipliers (inner, middle, outer)
    pub ring_energy_multipliers: [f32; 3],
    /// Smallest energy cost of a contact, even standing still
    pub contact_energy_cost: f32,
    /// Energy spent per px/s of player speed to smash an enemy
    pub energy_cost_per_speed: f32,
    /// Health lost on a contact the player can't pay for
    pub contact_damage: f32,
    /// Explosion reach as a fraction of the outer radius
    pub explode_radius_fraction: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Classic,

            player_radius: 20.0,
            player_mass: 1.0,
            player_acceleration: 1800.0,
            player_max_speed: 480.0,
            player_friction: 0.95,
            stop_speed: 6.0,

            enemy_radius: 15.0,
            enemy_mass: 0.5,
            enemy_acceleration: 1800.0,
            enemy_max_speed: 240.0,
            enemy_friction: 0.98,
            spawn_interval_ms: 2000.0,

            restitution: 0.7,
            max_impulse: 1800.0,
            player_wall_restitution: 0.8,
            enemy_wall_restitution: 0.5,
            wall_hit_cooldown_ticks: 30,
            enemy_collision_damage: false,

            max_player_hits: 20,
            enemy_kill_hits: 2,
            radius_floor: 0.9,
            mass_per_hit: 0.1,
            inner_regen_ms: 500.0,
            middle_regen_ms: 1500.0,

            max_energy: 100.0,
            start_energy: 100.0,
            energy_per_speed: 0.01,
            ring_energy_multipliers: [1.0, 1.5, 2.0],
            contact_energy_cost: 10.0,
            energy_cost_per_speed: 0.1,
            contact_damage: 25.0,
            explode_radius_fraction: 1.0 / 3.0,
        }
    }
}

impl Settings {
    /// Defaults for a game mode
    pub fn for_mode(mode: GameMode) -> Self {
        let mut settings = Self::default();
        settings.apply_mode(mode);
        settings
    }

    /// Switch mode (updates mode-dependent balance)
    pub fn apply_mode(&mut self, mode: GameMode) {
        self.mode = mode;

        // The energy variant uses a lighter, smaller player and enemy
        if mode == GameMode::Overcharge {
            self.player_radius = 15.0;
            self.enemy_radius = 12.0;
            self.enemy_mass = 0.8;
        }
    }

    /// Parse settings from JSON. Missing fields take their Classic defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded {} settings", settings.mode.as_str());
        Ok(settings)
    }

    /// Read and parse a settings file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<()> {
        positive("player_radius", self.player_radius)?;
        positive("enemy_radius", self.enemy_radius)?;
        if !(self.player_mass.is_finite() && self.player_mass > 0.0) {
            return Err(SimError::InvalidMass {
                mass: self.player_mass,
            });
        }
        if !(self.enemy_mass.is_finite() && self.enemy_mass > 0.0) {
            return Err(SimError::InvalidMass {
                mass: self.enemy_mass,
            });
        }
        non_negative("mass_per_hit", self.mass_per_hit)?;
        positive("player_max_speed", self.player_max_speed)?;
        positive("enemy_max_speed", self.enemy_max_speed)?;
        positive("max_impulse", self.max_impulse)?;
        positive("max_energy", self.max_energy)?;
        positive("contact_energy_cost", self.contact_energy_cost)?;
        unit("player_friction", self.player_friction)?;
        unit("enemy_friction", self.enemy_friction)?;
        unit("restitution", self.restitution)?;
        unit("player_wall_restitution", self.player_wall_restitution)?;
        unit("enemy_wall_restitution", self.enemy_wall_restitution)?;
        unit("radius_floor", self.radius_floor)?;
        if self.radius_floor <= 0.0 {
            return Err(SimError::InvalidSetting {
                name: "radius_floor",
                value: self.radius_floor,
                expected: "a value in (0, 1]",
            });
        }
        if self.max_player_hits == 0 || self.enemy_kill_hits == 0 {
            return Err(SimError::InvalidSetting {
                name: "max_player_hits/enemy_kill_hits",
                value: 0.0,
                expected: "at least 1",
            });
        }
        if self.start_energy < 0.0 || self.start_energy > self.max_energy {
            return Err(SimError::InvalidSetting {
                name: "start_energy",
                value: self.start_energy,
                expected: "a value in [0, max_energy]",
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidSetting {
            name,
            value,
            expected: "a finite value > 0",
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidSetting {
            name,
            value,
            expected: "a finite value >= 0",
        })
    }
}

fn unit(name: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::InvalidSetting {
            name,
            value,
            expected: "a value in [0, 1]",
        })
    }
}
