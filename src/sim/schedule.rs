//! Timed events on the simulation clock
//!
//! Spawning and the start countdown run off entries here instead of host
//! timers, so a run is fully steppable from `tick` alone.

use serde::{Deserialize, Serialize};

/// What a scheduled entry does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledKind {
    SpawnEnemy,
    /// One second of the start countdown elapsed
    CountdownStep,
}

/// A pending timed event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub due_ms: f64,
    pub kind: ScheduledKind,
    /// Re-arm interval; `None` fires once
    pub repeat_ms: Option<f64>,
}

/// Pending events, fired in due order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    entries: Vec<ScheduledEvent>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn once(&mut self, due_ms: f64, kind: ScheduledKind) {
        self.entries.push(ScheduledEvent {
            due_ms,
            kind,
            repeat_ms: None,
        });
    }

    pub fn every(&mut self, first_due_ms: f64, interval_ms: f64, kind: ScheduledKind) {
        self.entries.push(ScheduledEvent {
            due_ms: first_due_ms,
            kind,
            repeat_ms: Some(interval_ms.max(1.0)),
        });
    }

    /// Remove and return every firing due at or before `now_ms`, oldest first.
    /// Repeating entries fire once per elapsed interval.
    pub fn pop_due(&mut self, now_ms: f64) -> Vec<ScheduledKind> {
        let mut fired: Vec<(f64, ScheduledKind)> = Vec::new();

        self.entries.retain_mut(|entry| {
            while entry.due_ms <= now_ms {
                fired.push((entry.due_ms, entry.kind));
                match entry.repeat_ms {
                    Some(interval) => entry.due_ms += interval,
                    None => return false,
                }
            }
            true
        });

        fired.sort_by(|a, b| a.0.total_cmp(&b.0));
        fired.into_iter().map(|(_, kind)| kind).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, kind: ScheduledKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }
}
