//! Hit accounting and the overcharge burst
//!
//! Classic contacts wear both sides down: enemies die after a fixed number of
//! hits, the player shrinks and grows heavier until the hit limit ends the run.
//! Overcharge contacts are paid for with energy, or with health when the
//! player can't afford them.

use glam::Vec2;

use super::entity::{Entity, Player};
use super::state::{GameEvent, GameOverCause, GameState};
use crate::settings::{GameMode, Settings};

/// Register one hit on an enemy. Returns true if this hit destroyed it.
pub fn hit_enemy(enemy: &mut Entity, settings: &Settings) -> bool {
    if !enemy.alive {
        return false;
    }
    enemy.hits += 1;
    if enemy.hits >= settings.enemy_kill_hits {
        enemy.alive = false;
        return true;
    }
    false
}

/// Register one hit on the player. Returns true when the hit limit is reached.
///
/// The player gets smaller (down to `radius_floor` of its original size) and
/// heavier with every hit. Regeneration lowers `hits` but never regrows the disc.
pub fn hit_player(player: &mut Player, settings: &Settings) -> bool {
    player.entity.hits += 1;
    let hits = player.entity.hits.min(settings.max_player_hits) as f32;
    let worn = hits / settings.max_player_hits as f32;
    let target = player.original_radius * (1.0 - (1.0 - settings.radius_floor) * worn);

    let body = player.body_mut();
    body.radius = body.radius.min(target);
    body.mass += settings.mass_per_hit;

    player.entity.hits >= settings.max_player_hits
}

/// Count a kill and announce it
fn record_kill(state: &mut GameState, idx: usize) {
    let (id, pos) = (state.enemies[idx].id, state.enemies[idx].body.pos);
    state.enemies_destroyed += 1;
    state.emit(GameEvent::EnemyDestroyed { id, pos });
    log::debug!("Enemy {} destroyed ({} total)", id, state.enemies_destroyed);
}

/// Destroy an enemy outright; its hit count jumps to the kill threshold
fn destroy_enemy(state: &mut GameState, idx: usize) {
    let kill_hits = state.settings.enemy_kill_hits;
    let enemy = &mut state.enemies[idx];
    enemy.alive = false;
    enemy.hits = enemy.hits.max(kill_hits);
    record_kill(state, idx);
}

/// Apply the combat side of a resolved player-enemy contact.
///
/// `impact_speed` is the player's speed just before the impulse.
pub fn player_enemy_contact(state: &mut GameState, idx: usize, impact_speed: f32) {
    if !state.enemies.get(idx).is_some_and(|e| e.alive) {
        return;
    }
    let midpoint = (state.enemies[idx].body.pos + state.player.body().pos) / 2.0;
    state.emit(GameEvent::Impact { pos: midpoint });

    match state.mode() {
        GameMode::Classic => {
            let settings = state.settings.clone();
            if hit_enemy(&mut state.enemies[idx], &settings) {
                record_kill(state, idx);
            }

            let worn = hit_player(&mut state.player, &settings);
            state.emit(GameEvent::PlayerHit {
                hits: state.player.hits(),
            });
            if worn {
                state.end_run(GameOverCause::Worn);
            }
        }
        GameMode::Overcharge => {
            let cost = (impact_speed * state.settings.energy_cost_per_speed)
                .max(state.settings.contact_energy_cost);
            if state.stats.try_spend(cost) {
                destroy_enemy(state, idx);
                return;
            }

            state.player.entity.hits += 1;
            let health = state.stats.health() - state.settings.contact_damage;
            state.stats.set_health(health);
            state.emit(GameEvent::PlayerHit {
                hits: state.player.hits(),
            });
            if state.stats.is_dead() {
                state.end_run(GameOverCause::Drained);
            }
        }
    }
}

/// Player bounced off the wall in Classic mode; counts as a hit unless the
/// wall cooldown is still running.
pub fn player_wall_hit(state: &mut GameState) {
    if state.player.wall_cooldown > 0 {
        return;
    }
    state.player.wall_cooldown = state.settings.wall_hit_cooldown_ticks;

    let settings = state.settings.clone();
    let worn = hit_player(&mut state.player, &settings);
    state.emit(GameEvent::PlayerHit {
        hits: state.player.hits(),
    });
    if worn {
        state.end_run(GameOverCause::Worn);
    }
}

/// Fire the overcharge burst. Returns the number of enemies destroyed,
/// or `None` if the player wasn't overcharged.
pub fn explode(state: &mut GameState) -> Option<u32> {
    if !state.stats.try_explode() {
        return None;
    }

    let center: Vec2 = state.player.body().pos;
    let radius = state.arena.outer_radius * state.settings.explode_radius_fraction;

    let caught: Vec<usize> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive && e.body.pos.distance(center) <= radius)
        .map(|(i, _)| i)
        .collect();

    for &idx in &caught {
        destroy_enemy(state, idx);
    }

    let destroyed = caught.len() as u32;
    state.emit(GameEvent::Exploded {
        pos: center,
        radius,
        destroyed,
    });
    log::debug!("Overcharge burst destroyed {} enemies", destroyed);
    Some(destroyed)
}
