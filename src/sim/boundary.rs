//! Arena wall handling
//!
//! Either a bouncy wall (clamp onto the wall, reflect with energy loss) or a
//! lava wall (touching it is reported and the body is left where it is).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::reflect_velocity;
use super::entity::Body;

/// What happens when a body reaches the wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Clamp onto the wall and bounce, keeping `restitution` of the velocity
    Reflective { restitution: f32 },
    /// Touching the wall is a breach
    Fatal,
}

/// Result of a wall check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryOutcome {
    Inside,
    /// Clamped onto the wall. `intensity` is the outward speed at impact.
    Bounced { point: Vec2, intensity: f32 },
    Breached { point: Vec2 },
}

/// Outward unit normal at `pos`; +X when `pos` is the center
fn outward_normal(arena: &Arena, pos: Vec2) -> Vec2 {
    let n = (pos - arena.center).normalize_or_zero();
    if n == Vec2::ZERO { Vec2::X } else { n }
}

/// Keep a body inside the arena according to `policy`
pub fn resolve_boundary(body: &mut Body, arena: &Arena, policy: BoundaryPolicy) -> BoundaryOutcome {
    let distance = arena.distance_from_center(body.pos);
    if distance + body.radius <= arena.outer_radius {
        return BoundaryOutcome::Inside;
    }

    let n = outward_normal(arena, body.pos);
    let point = arena.center + n * arena.outer_radius;

    match policy {
        BoundaryPolicy::Fatal => BoundaryOutcome::Breached { point },
        BoundaryPolicy::Reflective { restitution } => {
            let limit = (arena.outer_radius - body.radius).max(0.0);
            body.pos = arena.center + n * limit;

            let outward_speed = body.vel.dot(n);
            if outward_speed > 0.0 {
                body.vel = restitution * reflect_velocity(body.vel, n);
            }

            BoundaryOutcome::Bounced {
                point,
                intensity: outward_speed.max(0.0),
            }
        }
    }
}
