//! Collision detection and response between discs
//!
//! Pairwise circle-circle tests with an impulse-based elastic response:
//! velocities change along the contact normal in inverse proportion to mass,
//! then the discs are pushed apart so they no longer overlap.

use glam::Vec2;

use super::entity::Body;

/// Below this center distance the contact normal is meaningless and the pair is skipped
pub const DEGENERATE_DISTANCE: f32 = 1e-4;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point (midway through the overlap)
    pub point: Vec2,
    /// Unit normal from `a` toward `b`
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Parameters for the impulse response
#[derive(Debug, Clone, Copy)]
pub struct ImpulseParams {
    /// Coefficient of restitution (0 = inelastic, 1 = elastic)
    pub restitution: f32,
    /// Upper bound on impulse magnitude
    pub max_impulse: f32,
}

/// Check overlap between two discs
pub fn circle_collision(a: &Body, b: &Body) -> CollisionResult {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let reach = a.radius + b.radius;

    if distance >= reach || distance < DEGENERATE_DISTANCE {
        return CollisionResult::miss();
    }

    let normal = delta / distance;
    let penetration = reach - distance;
    // Midpoint of the overlapping lens along the normal
    let point = a.pos + normal * (a.radius - penetration / 2.0);

    CollisionResult {
        hit: true,
        point,
        normal,
        penetration,
    }
}

/// Resolve a contact between two discs.
///
/// Returns true only when the discs were overlapping and approaching, and the
/// impulse and positional correction were applied. Separating or coincident
/// pairs are left untouched.
pub fn resolve_elastic(a: &mut Body, b: &mut Body, params: ImpulseParams) -> bool {
    let contact = circle_collision(a, b);
    if !contact.hit {
        if (b.pos - a.pos).length() < DEGENERATE_DISTANCE {
            log::trace!("Skipping coincident pair at ({}, {})", a.pos.x, a.pos.y);
        }
        return false;
    }
    let n = contact.normal;

    let v_rel = (b.vel - a.vel).dot(n);
    if v_rel > 0.0 {
        return false;
    }

    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let inv_sum = inv_a + inv_b;

    let j = (-(1.0 + params.restitution) * v_rel / inv_sum).min(params.max_impulse);
    let impulse = n * j;
    a.vel -= impulse * inv_a;
    b.vel += impulse * inv_b;

    // Heavier discs move less
    let correction = n * contact.penetration;
    a.pos -= correction * (inv_a / inv_sum);
    b.pos += correction * (inv_b / inv_sum);

    true
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinetic_energy;
    use proptest::prelude::*;

    const PARAMS: ImpulseParams = ImpulseParams {
        restitution: 0.7,
        max_impulse: 1800.0,
    };

    fn disc(x: f32, y: f32, r: f32, m: f32, vx: f32, vy: f32) -> Body {
        Body::new(Vec2::new(x, y), r, m)
            .expect("valid body")
            .with_velocity(Vec2::new(vx, vy))
    }

    #[test]
    fn test_head_on_collision_resolves() {
        let mut a = disc(0.0, 0.0, 20.0, 1.0, 10.0, 0.0);
        let mut b = disc(35.0, 0.0, 20.0, 1.0, 0.0, 0.0);

        assert!(resolve_elastic(&mut a, &mut b, PARAMS));

        let distance = (b.pos - a.pos).length();
        assert!((distance - 40.0).abs() < 1e-3);
        // j = 1.7 * 10 / 2 = 8.5, split evenly between equal masses
        assert!((a.vel.x - 1.5).abs() < 1e-4);
        assert!((b.vel.x - 8.5).abs() < 1e-4);
        assert_eq!(a.vel.y, 0.0);
        assert_eq!(b.vel.y, 0.0);
    }

    #[test]
    fn test_no_overlap_is_not_a_collision() {
        let mut a = disc(0.0, 0.0, 20.0, 1.0, 10.0, 0.0);
        let mut b = disc(40.0, 0.0, 20.0, 1.0, 0.0, 0.0);
        assert!(!resolve_elastic(&mut a, &mut b, PARAMS));
        assert_eq!(a.vel.x, 10.0);
    }

    #[test]
    fn test_separating_pair_is_skipped() {
        let mut a = disc(0.0, 0.0, 20.0, 1.0, -5.0, 0.0);
        let mut b = disc(30.0, 0.0, 20.0, 1.0, 5.0, 0.0);
        assert!(!resolve_elastic(&mut a, &mut b, PARAMS));
        assert_eq!(a.pos, Vec2::ZERO);
        assert_eq!(b.pos, Vec2::new(30.0, 0.0));
    }

    #[test]
    fn test_coincident_pair_is_skipped() {
        let mut a = disc(5.0, 5.0, 20.0, 1.0, 1.0, 0.0);
        let mut b = disc(5.0, 5.0, 20.0, 1.0, -1.0, 0.0);
        assert!(!resolve_elastic(&mut a, &mut b, PARAMS));
        assert!(a.vel.is_finite() && b.vel.is_finite());
    }

    #[test]
    fn test_impulse_is_clamped() {
        let params = ImpulseParams {
            restitution: 0.7,
            max_impulse: 30.0,
        };
        let mut a = disc(0.0, 0.0, 20.0, 1.0, 1000.0, 0.0);
        let mut b = disc(35.0, 0.0, 20.0, 1.0, 0.0, 0.0);
        assert!(resolve_elastic(&mut a, &mut b, params));
        assert!((b.vel.x - 30.0).abs() < 1e-3);
        assert!((a.vel.x - 970.0).abs() < 1e-3);
    }

    #[test]
    fn test_heavier_body_moves_less() {
        let mut light = disc(0.0, 0.0, 20.0, 0.5, 10.0, 0.0);
        let mut heavy = disc(30.0, 0.0, 20.0, 2.0, 0.0, 0.0);
        assert!(resolve_elastic(&mut light, &mut heavy, PARAMS));
        let light_shift = light.pos.x.abs();
        let heavy_shift = (heavy.pos.x - 30.0).abs();
        assert!(light_shift > heavy_shift);
        assert!(light.vel.x.abs() < 10.0);
    }

    #[test]
    fn test_reflect_velocity() {
        // Disc moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    proptest! {
        #[test]
        fn prop_no_residual_penetration(
            ax in -50.0f32..50.0, ay in -50.0f32..50.0,
            bx in -50.0f32..50.0, by in -50.0f32..50.0,
            ra in 5.0f32..30.0, rb in 5.0f32..30.0,
            ma in 0.2f32..5.0, mb in 0.2f32..5.0,
            avx in -500.0f32..500.0, avy in -500.0f32..500.0,
            bvx in -500.0f32..500.0, bvy in -500.0f32..500.0,
        ) {
            let mut a = disc(ax, ay, ra, ma, avx, avy);
            let mut b = disc(bx, by, rb, mb, bvx, bvy);
            if resolve_elastic(&mut a, &mut b, PARAMS) {
                let distance = (b.pos - a.pos).length();
                prop_assert!(distance >= ra + rb - 1e-2);
            }
        }

        #[test]
        fn prop_kinetic_energy_never_increases(
            bx in 1.0f32..39.0, by in -10.0f32..10.0,
            ma in 0.2f32..5.0, mb in 0.2f32..5.0,
            avx in -500.0f32..500.0, avy in -500.0f32..500.0,
            bvx in -500.0f32..500.0, bvy in -500.0f32..500.0,
            restitution in 0.0f32..1.0,
            max_impulse in 1.0f32..2000.0,
        ) {
            let params = ImpulseParams { restitution, max_impulse };
            let mut a = disc(0.0, 0.0, 20.0, ma, avx, avy);
            let mut b = disc(bx, by, 20.0, mb, bvx, bvy);
            let before = kinetic_energy(ma, a.vel) + kinetic_energy(mb, b.vel);
            resolve_elastic(&mut a, &mut b, params);
            let after = kinetic_energy(ma, a.vel) + kinetic_energy(mb, b.vel);
            prop_assert!(after <= before * (1.0 + 1e-4) + 1e-2);
        }
    }
}
