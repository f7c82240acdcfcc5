//! Per-frame simulation step
//!
//! Called once per display refresh, before rendering.

use super::spawn;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Advance the session by one frame. `now_ms` is the host clock.
pub fn tick(state: &mut GameState, now_ms: f64) {
    if state.phase() != GamePhase::Playing {
        return;
    }

    // Survival time; a clock stepping backwards adds nothing
    state.seconds_played += ((now_ms - state.last_time_ms) / 1000.0).max(0.0);
    state.last_time_ms = now_ms;

    // Shared walk cycle
    state.animation_frame += 1;
    if state.animation_frame % ANIMATION_PERIOD == 0 {
        for enemy in &mut state.enemies {
            enemy.toggle_pose();
        }
    }

    spawn::step(state);

    // Move everyone first; the run ends once no matter how many touch
    let mut caught = false;
    for enemy in &mut state.enemies {
        enemy.advance();
        caught |= enemy.touches(&state.player);
    }
    if caught {
        state.end_run();
    }

    age_popups(state);
}

/// Drop expired popups, count down the rest
fn age_popups(state: &mut GameState) {
    state.popups.retain_mut(|popup| {
        if popup.timer <= 0 {
            return false;
        }
        popup.timer -= 1;
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::handle_tap;
    use crate::sim::state::{Enemy, GameEvent, Popup, Side};
    use glam::Vec2;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345);
        state.begin_play(0.0);
        state.drain_events();
        state
    }

    #[test]
    fn test_tick_idle_outside_playing() {
        let mut state = GameState::new(1);
        tick(&mut state, 5000.0);
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.seconds_played, 0.0);
    }

    #[test]
    fn test_tick_accumulates_time() {
        let mut state = playing_state();
        for i in 1..=120 {
            tick(&mut state, i as f64 * FRAME_MS);
            state.enemies.clear();
        }
        assert!((state.seconds_played - 2.0).abs() < 1e-9);
        assert_eq!(state.whole_seconds(), 2);
    }

    #[test]
    fn test_clock_going_backwards_keeps_time() {
        let mut state = GameState::new(7);
        state.begin_play(10_000.0);
        tick(&mut state, 11_000.0);
        let before = state.seconds_played;
        assert!((before - 1.0).abs() < 1e-9);

        tick(&mut state, 5_000.0);
        assert_eq!(state.seconds_played, before);

        // Counting resumes from the new reading
        tick(&mut state, 5_500.0);
        assert!((state.seconds_played - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_enemies_walk_and_animate() {
        let mut state = playing_state();
        state.enemies.push(Enemy::entering_from(Side::Left, 4.0));
        for frame in 1..=9 {
            tick(&mut state, frame as f64);
        }
        assert_eq!(state.enemies[0].anim_frame, 0);
        assert_eq!(state.enemies[0].pos.x, -32.0 + 9.0 * 4.0);
        tick(&mut state, 10.0);
        assert_eq!(state.enemies[0].anim_frame, 1);
        for frame in 11..=20 {
            tick(&mut state, frame as f64);
        }
        assert_eq!(state.enemies[0].anim_frame, 0);
    }

    #[test]
    fn test_collision_ends_run_once() {
        let mut state = playing_state();
        // Two jeets land on the player in the same frame
        let mut a = Enemy::entering_from(Side::Left, 3.0);
        a.pos.x = state.player.pos.x - 33.0;
        let mut b = Enemy::entering_from(Side::Right, 3.0);
        b.pos.x = state.player.pos.x + state.player.size.x + 1.0;
        let (ax, bx) = (a.pos.x, b.pos.x);
        state.enemies.push(a);
        state.enemies.push(b);

        tick(&mut state, FRAME_MS);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.drain_events(), vec![GameEvent::PlayerCaught]);
        // Both still moved this frame
        assert_eq!(state.enemies[0].pos.x, ax + 3.0);
        assert_eq!(state.enemies[1].pos.x, bx - 3.0);

        // Frozen after that
        tick(&mut state, 2.0 * FRAME_MS);
        assert_eq!(state.enemies[0].pos.x, ax + 3.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_popup_lifetime() {
        let mut state = playing_state();
        let enemy = Enemy::entering_from(Side::Left, 3.0);
        state.popups.push(Popup::for_kill(&enemy));

        for step in 1..=POPUP_FRAMES {
            tick(&mut state, step as f64 * FRAME_MS);
            assert_eq!(state.popups.len(), 1, "missing after step {step}");
        }
        tick(&mut state, (POPUP_FRAMES + 1) as f64 * FRAME_MS);
        assert!(state.popups.is_empty());
    }

    #[test]
    fn test_popups_are_independent() {
        let mut state = playing_state();
        let enemy = Enemy::entering_from(Side::Left, 3.0);
        state.popups.push(Popup::for_kill(&enemy));
        for step in 1..=10 {
            tick(&mut state, step as f64 * FRAME_MS);
        }
        state.popups.push(Popup::for_kill(&enemy));
        for step in 11..=31 {
            tick(&mut state, step as f64 * FRAME_MS);
        }
        assert_eq!(state.popups.len(), 1);
        assert_eq!(state.popups[0].timer, POPUP_FRAMES - 21);
    }

    #[test]
    fn test_full_session() {
        let mut state = GameState::new(99999);
        let mut now = 10_000.0;

        // Title -> playing
        handle_tap(&mut state, Vec2::new(5.0, 5.0), now);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.seconds_played, 0.0);

        // Three jeets spawn on frames 60, 118 and 174: each check uses the
        // interval already lowered by the previous spawn
        while state.enemies.len() < 3 {
            spawn::step(&mut state);
        }
        assert_eq!(state.frame_count, 174);
        assert_eq!(state.spawn_interval, 57);

        // Spread them out so each has its own box
        for (enemy, x) in state.enemies.iter_mut().zip([0.0, 100.0, 560.0]) {
            enemy.pos.x = x;
        }

        // Pwn the second one
        let second = state.enemies[1].clone();
        let target = second.pos + second.size / 2.0;
        handle_tap(&mut state, target, now);
        assert_eq!(state.kills, 1);
        assert_eq!(state.popups.len(), 1);
        assert_eq!(state.enemies.len(), 2);
        assert!(!state.enemies.contains(&second));

        // Sooner or later a jeet reaches the player
        let mut frames = 0;
        while state.phase() == GamePhase::Playing {
            now += FRAME_MS;
            tick(&mut state, now);
            frames += 1;
            assert!(frames < 10_000, "jeets never arrived");
        }
        assert!(state.seconds_played > 0.0);

        // Back to the title screen
        handle_tap(&mut state, Vec2::ZERO, now);
        assert_eq!(state.phase(), GamePhase::Start);
        assert_eq!(state.kills, 0);
        assert!(state.enemies.is_empty());

        let events = state.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::Started));
        assert_eq!(events.last(), Some(&GameEvent::Reset));
        assert!(events.contains(&GameEvent::PlayerCaught));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing_state();
        let mut state2 = playing_state();
        for frame in 1..=300 {
            tick(&mut state1, frame as f64 * FRAME_MS);
            tick(&mut state2, frame as f64 * FRAME_MS);
        }
        assert_eq!(state1.phase(), state2.phase());
        assert_eq!(state1.enemies, state2.enemies);
    }
}
