//! Circular arena and its concentric rings
//!
//! The arena is a disc around `center`, split into three rings by distance:
//! - Inner: distance <= outer_radius * ring_fractions[0]
//! - Middle: distance <= outer_radius * ring_fractions[1]
//! - Outer: everything else

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_CENTER_X, ARENA_CENTER_Y, ARENA_OUTER_RADIUS, RING_FRACTIONS};
use crate::polar_to_cartesian;

/// One of the three concentric zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ring {
    Inner,
    Middle,
    Outer,
}

impl Ring {
    /// Index into per-ring tables (inner, middle, outer)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Ring::Inner => 0,
            Ring::Middle => 1,
            Ring::Outer => 2,
        }
    }
}

/// The circular play field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub center: Vec2,
    pub outer_radius: f32,
    /// Ring boundaries as fractions of `outer_radius` (inner, middle)
    pub ring_fractions: [f32; 2],
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(
            Vec2::new(ARENA_CENTER_X, ARENA_CENTER_Y),
            ARENA_OUTER_RADIUS,
        )
    }
}

impl Arena {
    pub fn new(center: Vec2, outer_radius: f32) -> Self {
        Self {
            center,
            outer_radius,
            ring_fractions: RING_FRACTIONS,
        }
    }

    /// Refit the arena to a new viewport (45% of the smaller side, centered)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.center = Vec2::new(width / 2.0, height / 2.0);
        self.outer_radius = width.min(height) * 0.45;
        log::debug!(
            "Arena resized: center=({}, {}) radius={}",
            self.center.x,
            self.center.y,
            self.outer_radius
        );
    }

    /// Radii of the ring boundaries (inner, middle)
    pub fn ring_radii(&self) -> [f32; 2] {
        [
            self.outer_radius * self.ring_fractions[0],
            self.outer_radius * self.ring_fractions[1],
        ]
    }

    #[inline]
    pub fn distance_from_center(&self, pos: Vec2) -> f32 {
        (pos - self.center).length()
    }

    /// Which ring a point is in. A point on a boundary belongs to the inner side.
    pub fn ring_at(&self, pos: Vec2) -> Ring {
        let d = self.distance_from_center(pos);
        let [inner, middle] = self.ring_radii();
        if d <= inner {
            Ring::Inner
        } else if d <= middle {
            Ring::Middle
        } else {
            Ring::Outer
        }
    }

    /// Spawn point just inside the wall at angle `theta`
    pub fn spawn_point(&self, theta: f32, margin: f32) -> Vec2 {
        self.center + polar_to_cartesian(self.outer_radius - margin, theta)
    }
}
