//! Jeet spawning on a decaying frame interval

use rand::Rng;

use super::state::{Enemy, GameState, Side};
use crate::consts::*;

/// A jeet is due on every frame that is an exact multiple of the interval
#[inline]
pub fn spawn_due(frame: u64, interval: u32) -> bool {
    interval > 0 && frame % interval as u64 == 0
}

/// Interval after one more spawn
#[inline]
pub fn next_interval(interval: u32) -> u32 {
    interval.saturating_sub(1).max(SPAWN_INTERVAL_FLOOR)
}

/// Roll a jeet on a random side with a random speed
pub fn spawn_enemy<R: Rng>(rng: &mut R) -> Enemy {
    let side = if rng.random_bool(0.5) {
        Side::Left
    } else {
        Side::Right
    };
    let speed = ENEMY_SPEED_BASE + rng.random::<f32>() * ENEMY_SPEED_SPREAD;
    Enemy::entering_from(side, speed)
}

/// Advance the spawn clock by one frame, spawning if due.
/// Returns true when a jeet was added.
pub fn step(state: &mut GameState) -> bool {
    state.frame_count += 1;
    if !spawn_due(state.frame_count, state.spawn_interval) {
        return false;
    }
    let enemy = spawn_enemy(&mut state.rng);
    state.enemies.push(enemy);
    state.spawn_interval = next_interval(state.spawn_interval);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_spawn_on_frame_sixty() {
        let mut state = GameState::new(42);
        for _ in 0..59 {
            assert!(!step(&mut state));
        }
        assert!(step(&mut state));
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_interval, 59);
    }

    #[test]
    fn test_interval_floor() {
        assert_eq!(next_interval(60), 59);
        assert_eq!(next_interval(16), 15);
        assert_eq!(next_interval(15), 15);
    }

    #[test]
    fn test_spawned_enemy_ranges() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut lefts = 0;
        for _ in 0..500 {
            let enemy = spawn_enemy(&mut rng);
            assert!(enemy.speed >= ENEMY_SPEED_BASE);
            assert!(enemy.speed < ENEMY_SPEED_BASE + ENEMY_SPEED_SPREAD);
            assert_eq!(enemy.pos.y, ENEMY_Y);
            assert_eq!(enemy.anim_frame, 0);
            if enemy.walks_right() {
                assert_eq!(enemy.pos.x, -ENEMY_SIZE);
                lefts += 1;
            } else {
                assert_eq!(enemy.pos.x, CANVAS_WIDTH);
            }
        }
        // Both sides show up
        assert!(lefts > 150 && lefts < 350, "lefts = {lefts}");
    }

    proptest! {
        #[test]
        fn prop_spawn_iff_multiple(frame in 0u64..100_000, interval in SPAWN_INTERVAL_FLOOR..=SPAWN_INTERVAL_START) {
            prop_assert_eq!(spawn_due(frame, interval), frame % interval as u64 == 0);
        }

        #[test]
        fn prop_interval_after_n_spawns(n in 0u32..200) {
            let mut interval = SPAWN_INTERVAL_START;
            for _ in 0..n {
                interval = next_interval(interval);
            }
            prop_assert_eq!(interval, SPAWN_INTERVAL_START.saturating_sub(n).max(SPAWN_INTERVAL_FLOOR));
            prop_assert!((SPAWN_INTERVAL_FLOOR..=SPAWN_INTERVAL_START).contains(&interval));
        }
    }
}
