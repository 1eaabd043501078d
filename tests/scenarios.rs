//! End-to-end runs through the public API

use glam::Vec2;

use fire_arena::consts::SIM_DT;
use fire_arena::sim::collision::{ImpulseParams, resolve_elastic};
use fire_arena::sim::{
    Body, Entity, GameEvent, GameOverCause, GamePhase, GameState, Ring, TickInput, tick,
};
use fire_arena::{GameMode, HighScores, Settings};

/// A Classic run already past the countdown, with spawning switched off
fn running_classic(seed: u64) -> GameState {
    let settings = Settings {
        spawn_interval_ms: 1.0e9,
        ..Settings::for_mode(GameMode::Classic)
    };
    let mut state = GameState::new(seed, settings).expect("valid settings");
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &start, SIM_DT);
    while state.phase != GamePhase::Running {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    state.take_events();
    state
}

fn push_enemy(state: &mut GameState, offset: Vec2, vel: Vec2) -> u32 {
    let id = state.next_entity_id();
    let mut enemy =
        Entity::enemy(id, state.arena.center + offset, &state.settings).expect("valid enemy");
    enemy.body.vel = vel;
    state.enemies.push(enemy);
    id
}

#[test]
fn head_on_impulse_matches_hand_computation() {
    let mut a = Body::new(Vec2::new(0.0, 0.0), 20.0, 1.0)
        .expect("valid body")
        .with_velocity(Vec2::new(1.5, 0.0));
    let mut b = Body::new(Vec2::new(30.0, 0.0), 15.0, 0.5)
        .expect("valid body")
        .with_velocity(Vec2::new(-1.0, 0.0));
    let params = ImpulseParams {
        restitution: 0.7,
        max_impulse: 30.0,
    };

    // vRel = -2.5, j = 1.7 * 2.5 / 3 = 1.41667
    assert!(resolve_elastic(&mut a, &mut b, params));
    assert!((a.vel.x - (1.5 - 1.416_667)).abs() < 1e-3);
    assert!((b.vel.x - (-1.0 + 2.0 * 1.416_667)).abs() < 1e-3);
    assert!((b.pos - a.pos).length() >= 35.0 - 1e-3);
}

#[test]
fn dwelling_on_inner_boundary_regenerates_one_hit() {
    let mut state = running_classic(21);
    state.player.body_mut().pos = state.arena.center + Vec2::new(100.0, 0.0);
    state.player.entity.hits = 5;

    for _ in 0..36 {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }

    assert_eq!(state.current_ring, Ring::Inner);
    assert_eq!(state.player.hits(), 4);
    let regens = state
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::Regenerated { .. }))
        .count();
    assert_eq!(regens, 1);
}

#[test]
fn enemy_destroyed_after_second_contact() {
    let mut state = running_classic(22);
    let id = push_enemy(&mut state, Vec2::new(34.0, 0.0), Vec2::new(-200.0, 0.0));

    let mut player_hits = Vec::new();
    for _ in 0..600 {
        tick(&mut state, &TickInput::default(), SIM_DT);
        for event in state.take_events() {
            if let GameEvent::PlayerHit { hits } = event {
                player_hits.push(hits);
            }
        }
        if state.enemies.is_empty() {
            break;
        }
    }

    assert!(state.enemies.iter().all(|e| e.id != id));
    assert_eq!(state.enemies_destroyed, 1);
    assert_eq!(state.phase, GamePhase::Running);
    // Two contacts, and regeneration may have healed in between
    assert_eq!(player_hits.len(), 2);
}

#[test]
fn twentieth_hit_ends_the_run() {
    let mut state = running_classic(23);
    state.player.entity.hits = state.settings.max_player_hits - 1;
    state.enemies_destroyed = 3;
    push_enemy(&mut state, Vec2::new(34.0, 0.0), Vec2::new(-200.0, 0.0));

    tick(&mut state, &TickInput::default(), SIM_DT);

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.game_over, Some(GameOverCause::Worn));
    assert!(state.enemies.is_empty());
    assert_eq!(state.final_score(), 3);
    let over = state
        .take_events()
        .into_iter()
        .find_map(|e| match e {
            GameEvent::GameOver { score, .. } => Some(score),
            _ => None,
        });
    assert_eq!(over, Some(3));

    // Nothing moves after game over
    let pos = state.player.body().pos;
    tick(&mut state, &TickInput::default(), SIM_DT);
    assert_eq!(state.player.body().pos, pos);

    let submission = state.score_submission("ash").expect("run is over");
    let mut board = HighScores::new();
    assert_eq!(board.add_submission(&submission, 0.0), Some(1));
}

#[test]
fn overcharge_burst_clears_nearby_enemies() {
    let settings = Settings {
        spawn_interval_ms: 1.0e9,
        ..Settings::for_mode(GameMode::Overcharge)
    };
    let mut state = GameState::new(24, settings).expect("valid settings");
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        SIM_DT,
    );
    while state.phase != GamePhase::Running {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    assert!(state.stats.is_overcharged());

    push_enemy(&mut state, Vec2::new(60.0, 0.0), Vec2::ZERO);
    push_enemy(&mut state, Vec2::new(0.0, 240.0), Vec2::ZERO);

    let explode = TickInput {
        explode: true,
        ..Default::default()
    };
    tick(&mut state, &explode, SIM_DT);

    assert_eq!(state.enemies.len(), 1);
    assert_eq!(state.enemies_destroyed, 1);
    assert!(!state.stats.is_overcharged());
    assert!(state.stats.energy() < state.stats.max_energy());
}

#[test]
fn same_seed_same_run() {
    let run = |seed: u64| {
        let mut state = GameState::for_mode(seed, GameMode::Classic).expect("valid settings");
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, SIM_DT);
        for _ in 0..1200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        state
            .enemies
            .iter()
            .map(|e| (e.id, e.body.pos))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(77), run(77));
}
