//! Per-frame simulation step
//!
//! Background parallax runs in every phase. Everything else only moves
//! while the run is `Running`; a `Paused` run just bobs the character.

use rand::Rng;

use super::collision::detect_collision;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::MAX_FRAME_DT;

/// Advance the game by `dt` seconds (clamped to [`MAX_FRAME_DT`])
pub fn tick(state: &mut GameState, dt: f32) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    state.time += dt as f64;

    state
        .background
        .advance(&mut state.rng, state.tuning.game_speed, dt, &state.field);

    match state.phase {
        GamePhase::Paused => {
            state.character.float_idle(
                &state.field,
                state.tuning.idle_float_amplitude,
                state.time,
            );
        }
        GamePhase::Running => {
            if step_running(state, dt) {
                state.end_run();
            }
        }
        GamePhase::NotStarted | GamePhase::GameOver => {}
    }
}

/// One running frame. Returns true if the character crashed.
fn step_running(state: &mut GameState, dt: f32) -> bool {
    let GameState {
        tuning,
        field,
        rng,
        character,
        obstacles,
        effects,
        score,
        ..
    } = &mut *state;

    // A character already outside the field crashes even if this step
    // would carry it back in
    let started_out = character.out_of_bounds(field);

    // Ambient effects
    effects.update_thrust(dt);
    effects.maybe_spawn_bubble(rng, tuning.bubble_rate, dt, field);
    effects.refill_flames(rng, tuning, field);
    effects.maybe_spawn_comet(rng, tuning.comet_chance, dt, field);
    effects.advance(dt, field);

    character.integrate(tuning.gravity, dt);

    // Obstacles and scoring
    let passed = obstacles.advance(
        tuning.scroll_speed(),
        dt,
        tuning.obstacle_width,
        character.pos.x,
    );
    let mut scored = Vec::new();
    for _ in 0..passed {
        *score += 1;
        effects.spawn_score_popup(field);
        scored.push(GameEvent::Scored { score: *score });
    }
    if passed > 0 {
        effects.start_thrust(tuning.thrust_duration);
    }

    if effects.thrusting() {
        for rocket in &obstacles.rockets {
            if rng.random::<f32>() < tuning.thrust_chance {
                effects.emit_thrust(rng, rocket, tuning);
            }
        }
    }

    if obstacles.needs_spawn(field, tuning.spawn_interval) {
        obstacles.spawn(rng, tuning, field);
    }
    obstacles.retire(tuning.obstacle_width);

    let crashed = started_out
        || detect_collision(&character.hitbox(), &obstacles.rockets, tuning, field)
        || character.out_of_bounds(field);

    for event in scored {
        state.push_event(event);
    }
    crashed
}
