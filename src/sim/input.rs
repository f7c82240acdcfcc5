//! Pointer and tap handling
//!
//! Coordinates here are already in game space; see
//! [`crate::platform::to_game_space`] for the display conversion.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState, Popup};

/// Resolve a click or tap against the current phase
pub fn handle_tap(state: &mut GameState, pos: Vec2, now_ms: f64) {
    match state.phase() {
        GamePhase::Start => {
            state.begin_play(now_ms);
        }
        GamePhase::Playing => {
            state.player.face_toward(pos.x);
            pwn_at(state, pos);
        }
        GamePhase::GameOver => {
            state.reset_to_title();
        }
    }
}

/// Mouse/touch movement only turns the player around
pub fn handle_pointer_move(state: &mut GameState, pos: Vec2) {
    if state.phase() == GamePhase::Playing {
        state.player.face_toward(pos.x);
    }
}

/// Remove the newest jeet under `pos`. At most one per tap.
fn pwn_at(state: &mut GameState, pos: Vec2) -> bool {
    let Some(index) = state.enemies.iter().rposition(|e| e.rect().contains(pos)) else {
        return false;
    };
    let enemy = state.enemies.remove(index);
    state.kills += 1;
    state.popups.push(Popup::for_kill(&enemy));
    state.push_event(GameEvent::EnemyPwned { pos: enemy.pos });
    true
}
