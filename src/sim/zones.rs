//! Ring effects: hit regeneration (Classic) and energy gain (Overcharge)
//!
//! The two modes read the rings in opposite ways. Classic heals fastest near
//! the center; Overcharge charges fastest near the wall.

use serde::{Deserialize, Serialize};

use super::arena::Ring;
use crate::settings::Settings;

/// Continuous dwell timer for one ring
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegenTimer {
    /// Clock time the current dwell started (or the last regen fired)
    pub start_ms: f64,
    /// Set while the player is inside this timer's ring
    pub current_ring: Option<Ring>,
}

impl RegenTimer {
    /// Advance the timer for one tick. Returns true when a regen fires.
    fn step(&mut self, ring: Ring, occupied: Ring, now_ms: f64, threshold_ms: f64, hits: u32) -> bool {
        if occupied != ring {
            // Leaving drops any partial dwell
            self.current_ring = None;
            return false;
        }

        if self.current_ring != Some(ring) {
            self.start_ms = now_ms;
            self.current_ring = Some(ring);
        }

        if now_ms - self.start_ms >= threshold_ms && hits > 0 {
            self.start_ms = now_ms;
            return true;
        }
        false
    }
}

/// Dwell timers for the two regenerating rings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegenTracker {
    pub inner: RegenTimer,
    pub middle: RegenTimer,
    pub inner_threshold_ms: f64,
    pub middle_threshold_ms: f64,
}

impl RegenTracker {
    pub fn new(settings: &Settings) -> Self {
        Self {
            inner: RegenTimer::default(),
            middle: RegenTimer::default(),
            inner_threshold_ms: settings.inner_regen_ms,
            middle_threshold_ms: settings.middle_regen_ms,
        }
    }

    /// Update both timers for the ring the player occupies.
    ///
    /// Returns true when one hit should be regenerated this tick.
    pub fn update(&mut self, occupied: Ring, now_ms: f64, hits: u32) -> bool {
        let inner = self
            .inner
            .step(Ring::Inner, occupied, now_ms, self.inner_threshold_ms, hits);
        let middle = self
            .middle
            .step(Ring::Middle, occupied, now_ms, self.middle_threshold_ms, hits);
        inner || middle
    }

    /// Forget all dwell progress
    pub fn reset(&mut self) {
        self.inner = RegenTimer::default();
        self.middle = RegenTimer::default();
    }
}

/// Player resources for the energy variant
///
/// `is_overcharged` is derived from `energy` and recomputed on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    energy: f32,
    max_energy: f32,
    health: f32,
    speed: f32,
    is_overcharged: bool,
}

/// Full health
pub const MAX_HEALTH: f32 = 100.0;

impl PlayerStats {
    pub fn new(settings: &Settings) -> Self {
        let mut stats = Self {
            energy: 0.0,
            max_energy: settings.max_energy,
            health: MAX_HEALTH,
            speed: 0.0,
            is_overcharged: false,
        };
        stats.set_energy(settings.start_energy);
        stats
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn max_energy(&self) -> f32 {
        self.max_energy
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_overcharged(&self) -> bool {
        self.is_overcharged
    }

    /// Set energy, clamped to `[0, max_energy]`
    pub fn set_energy(&mut self, value: f32) {
        self.energy = value.clamp(0.0, self.max_energy);
        self.is_overcharged = self.energy >= self.max_energy;
    }

    pub fn set_speed(&mut self, value: f32) {
        self.speed = value.max(0.0);
    }

    /// Set health, clamped to `[0, MAX_HEALTH]`
    pub fn set_health(&mut self, value: f32) {
        self.health = value.clamp(0.0, MAX_HEALTH);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Accrue energy from speed; farther rings pay more
    pub fn gain_energy(&mut self, ring: Ring, dt: f32, settings: &Settings) {
        let multiplier = settings.ring_energy_multipliers[ring.index()];
        let gain = self.speed * settings.energy_per_speed * multiplier * dt;
        self.set_energy(self.energy + gain);
    }

    /// Spend energy if there is enough. Returns false (and spends nothing) otherwise.
    /// A cost that isn't positive can't be paid.
    pub fn try_spend(&mut self, cost: f32) -> bool {
        if cost > 0.0 && self.energy >= cost {
            self.set_energy(self.energy - cost);
            true
        } else {
            false
        }
    }

    /// Fire the overcharge burst: halves the energy pool
    pub fn try_explode(&mut self) -> bool {
        if !self.is_overcharged {
            return false;
        }
        self.set_energy(self.max_energy / 2.0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> RegenTracker {
        RegenTracker::new(&Settings::default())
    }

    #[test]
    fn test_inner_regen_after_threshold() {
        let mut t = tracker();
        assert!(!t.update(Ring::Inner, 0.0, 5));
        assert!(!t.update(Ring::Inner, 499.0, 5));
        assert!(t.update(Ring::Inner, 500.0, 5));
        // Timer restarted at 500
        assert!(!t.update(Ring::Inner, 600.0, 4));
        assert_eq!(t.inner.start_ms, 500.0);
        assert!(t.update(Ring::Inner, 1000.0, 4));
    }

    #[test]
    fn test_middle_regen_is_slower() {
        let mut t = tracker();
        assert!(!t.update(Ring::Middle, 0.0, 3));
        assert!(!t.update(Ring::Middle, 1000.0, 3));
        assert!(t.update(Ring::Middle, 1500.0, 3));
    }

    #[test]
    fn test_outer_never_regens() {
        let mut t = tracker();
        for step in 0..100 {
            assert!(!t.update(Ring::Outer, step as f64 * 100.0, 10));
        }
    }

    #[test]
    fn test_no_regen_without_hits() {
        let mut t = tracker();
        t.update(Ring::Inner, 0.0, 0);
        assert!(!t.update(Ring::Inner, 5000.0, 0));
    }

    #[test]
    fn test_leaving_ring_drops_partial_dwell() {
        let mut t = tracker();
        t.update(Ring::Inner, 0.0, 5);
        t.update(Ring::Inner, 400.0, 5);
        // Brief exit
        assert!(!t.update(Ring::Middle, 450.0, 5));
        assert_eq!(t.inner.current_ring, None);
        // Re-entry restarts the clock
        assert!(!t.update(Ring::Inner, 500.0, 5));
        assert!(!t.update(Ring::Inner, 900.0, 5));
        assert!(t.update(Ring::Inner, 1000.0, 5));
    }

    #[test]
    fn test_overcharge_is_derived_from_energy() {
        let settings = Settings {
            start_energy: 50.0,
            ..Default::default()
        };
        let mut stats = PlayerStats::new(&settings);
        assert!(!stats.is_overcharged());

        stats.set_energy(250.0);
        assert_eq!(stats.energy(), 100.0);
        assert!(stats.is_overcharged());

        assert!(stats.try_spend(10.0));
        assert!(!stats.is_overcharged());
    }

    #[test]
    fn test_energy_gain_scales_with_ring() {
        let settings = Settings {
            start_energy: 0.0,
            ..Default::default()
        };
        let mut inner = PlayerStats::new(&settings);
        let mut outer = PlayerStats::new(&settings);
        inner.set_speed(300.0);
        outer.set_speed(300.0);
        inner.gain_energy(Ring::Inner, 1.0, &settings);
        outer.gain_energy(Ring::Outer, 1.0, &settings);
        assert!((inner.energy() - 3.0).abs() < 1e-4);
        assert!((outer.energy() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_explode_requires_overcharge() {
        let settings = Settings {
            start_energy: 99.0,
            ..Default::default()
        };
        let mut stats = PlayerStats::new(&settings);
        assert!(!stats.try_explode());
        assert_eq!(stats.energy(), 99.0);

        stats.set_energy(100.0);
        assert!(stats.try_explode());
        assert_eq!(stats.energy(), 50.0);
        assert!(!stats.is_overcharged());
    }

    #[test]
    fn test_spend_refused_when_short() {
        let settings = Settings {
            start_energy: 5.0,
            ..Default::default()
        };
        let mut stats = PlayerStats::new(&settings);
        assert!(!stats.try_spend(6.0));
        assert_eq!(stats.energy(), 5.0);
        assert!(!stats.try_spend(0.0));
        assert!(!stats.try_spend(-1.0));
        assert_eq!(stats.energy(), 5.0);
    }
}
