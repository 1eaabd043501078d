//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::boundary::{BoundaryOutcome, BoundaryPolicy, resolve_boundary};
use super::collision::{ImpulseParams, resolve_elastic};
use super::combat;
use super::movement::{KeyState, integrate_player, integrate_pursuit};
use super::schedule::ScheduledKind;
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};
use crate::settings::{GameMode, Settings};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub keys: KeyState,
    /// Fire the overcharge burst (Overcharge mode only)
    pub explode: bool,
    /// Start a run from the title screen
    pub start: bool,
    /// Restart after game over
    pub restart: bool,
}

/// Wall policy for the player under the configured mode
pub fn player_boundary_policy(settings: &Settings) -> BoundaryPolicy {
    if settings.mode.fatal_wall() {
        BoundaryPolicy::Fatal
    } else {
        BoundaryPolicy::Reflective {
            restitution: settings.player_wall_restitution,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;
    state.time_ms += dt as f64 * 1000.0;

    match state.phase {
        GamePhase::NotStarted => {
            if input.start {
                state.begin_countdown();
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart {
                if let Err(e) = state.reset() {
                    log::error!("Failed to reset run: {}", e);
                }
            }
            return;
        }
        GamePhase::Countdown | GamePhase::Running => {}
    }

    fire_scheduled(state);
    if state.phase != GamePhase::Running {
        return;
    }

    state.normalize_order();
    step_player(state, input, dt);
    if state.phase != GamePhase::Running {
        return;
    }
    step_enemies(state, dt);
    collide_player(state);
    if state.phase != GamePhase::Running {
        return;
    }
    collide_enemies(state);
    state.remove_dead();

    update_zones(state, dt);

    if input.explode && state.mode() == GameMode::Overcharge {
        combat::explode(state);
        state.remove_dead();
    }

    emit_trails(state);
}

/// Run every scheduled event due by now
fn fire_scheduled(state: &mut GameState) {
    for kind in state.schedule.pop_due(state.time_ms) {
        match kind {
            ScheduledKind::CountdownStep => {
                if state.phase != GamePhase::Countdown {
                    continue;
                }
                state.countdown = state.countdown.saturating_sub(1);
                if state.countdown == 0 {
                    state.begin_running();
                } else {
                    state.emit(GameEvent::CountdownTick {
                        remaining: state.countdown,
                    });
                }
            }
            ScheduledKind::SpawnEnemy => {
                if state.phase != GamePhase::Running {
                    continue;
                }
                if let Err(e) = state.spawn_enemy() {
                    log::warn!("Enemy spawn failed: {}", e);
                }
            }
        }
    }
}

/// Move the player and keep it inside the arena
fn step_player(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.player.wall_cooldown > 0 {
        state.player.wall_cooldown -= 1;
    }

    integrate_player(state.player.body_mut(), &input.keys, &state.settings, dt);

    let policy = player_boundary_policy(&state.settings);
    let id = state.player.entity.id;
    match resolve_boundary(state.player.body_mut(), &state.arena, policy) {
        BoundaryOutcome::Inside => {}
        BoundaryOutcome::Bounced { point, intensity } => {
            state.emit(GameEvent::WallHit {
                id,
                pos: point,
                intensity,
            });
            if state.mode() == GameMode::Classic {
                combat::player_wall_hit(state);
            }
        }
        BoundaryOutcome::Breached { point } => {
            let intensity = state.player.body().speed();
            state.emit(GameEvent::WallHit {
                id,
                pos: point,
                intensity,
            });
            state.end_run(GameOverCause::Burned);
        }
    }
}

/// Chase the player, then bounce off the wall
fn step_enemies(state: &mut GameState, dt: f32) {
    let target = state.player.body().pos;
    let policy = BoundaryPolicy::Reflective {
        restitution: state.settings.enemy_wall_restitution,
    };

    let mut hits = Vec::new();
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        integrate_pursuit(&mut enemy.body, target, &state.settings, dt);
        if let BoundaryOutcome::Bounced { point, intensity } =
            resolve_boundary(&mut enemy.body, &state.arena, policy)
        {
            hits.push(GameEvent::WallHit {
                id: enemy.id,
                pos: point,
                intensity,
            });
        }
    }
    state.events.extend(hits);
}

fn impulse_params(settings: &Settings) -> ImpulseParams {
    ImpulseParams {
        restitution: settings.restitution,
        max_impulse: settings.max_impulse,
    }
}

/// Player against every live enemy, in ID order.
///
/// Works from a snapshot of IDs: an enemy destroyed earlier in the pass is
/// skipped, and the pass stops as soon as the run ends.
fn collide_player(state: &mut GameState) {
    let params = impulse_params(&state.settings);
    let ids: Vec<u32> = state
        .enemies
        .iter()
        .filter(|e| e.alive)
        .map(|e| e.id)
        .collect();

    for id in ids {
        if state.phase != GamePhase::Running {
            return;
        }
        let Some(idx) = state.enemies.iter().position(|e| e.id == id && e.alive) else {
            continue;
        };

        let impact_speed = state.player.body().speed();
        let enemy = &mut state.enemies[idx].body;
        if resolve_elastic(&mut state.player.entity.body, enemy, params) {
            combat::player_enemy_contact(state, idx, impact_speed);
        }
    }
}

/// Enemy pairs, each once. Physics only unless `enemy_collision_damage` is set.
fn collide_enemies(state: &mut GameState) {
    let params = impulse_params(&state.settings);
    let damage = state.settings.enemy_collision_damage;
    let n = state.enemies.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = state.enemies.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);
            if !a.alive || !b.alive {
                continue;
            }
            if !resolve_elastic(&mut a.body, &mut b.body, params) || !damage {
                continue;
            }

            let mut destroyed = Vec::new();
            for enemy in [a, b] {
                if combat::hit_enemy(enemy, &state.settings) {
                    destroyed.push(GameEvent::EnemyDestroyed {
                        id: enemy.id,
                        pos: enemy.body.pos,
                    });
                }
            }
            state.events.extend(destroyed);
        }
    }
}

/// Ring effects for the ring the player ends the tick in
fn update_zones(state: &mut GameState, dt: f32) {
    let ring = state.arena.ring_at(state.player.body().pos);
    state.current_ring = ring;

    match state.mode() {
        GameMode::Classic => {
            if state.regen.update(ring, state.time_ms, state.player.hits()) {
                state.player.entity.hits = state.player.hits().saturating_sub(1);
                state.emit(GameEvent::Regenerated {
                    hits: state.player.hits(),
                });
                log::trace!("Regenerated in {:?} ring", ring);
            }
        }
        GameMode::Overcharge => {
            state.stats.set_speed(state.player.body().speed());
            state.stats.gain_energy(ring, dt, &state.settings);
        }
    }
}

/// Motion streaks for everything still moving
fn emit_trails(state: &mut GameState) {
    let trails: Vec<GameEvent> = std::iter::once(&state.player.entity)
        .chain(state.enemies.iter())
        .filter(|e| e.alive && e.body.speed() > 0.0)
        .map(|e| GameEvent::Trail {
            id: e.id,
            pos: e.body.pos,
            vel: e.body.vel,
            speed: e.body.speed(),
        })
        .collect();
    state.events.extend(trails);
}
