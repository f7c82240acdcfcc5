//! Idle/demo player
//!
//! Picks the jeet closest to the player and taps it, with a fixed reaction
//! delay between taps so runs still end eventually.

use glam::Vec2;

use super::state::{GamePhase, GameState};

/// Frames between autopilot taps
pub const DEFAULT_REACTION_FRAMES: u32 = 18;
/// Frames spent on the game over screen before retrying
pub const RETRY_DELAY_FRAMES: u32 = 120;

#[derive(Debug, Clone)]
pub struct Autopilot {
    reaction_frames: u32,
    cooldown: u32,
    retry_pending: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(DEFAULT_REACTION_FRAMES)
    }
}

impl Autopilot {
    pub fn new(reaction_frames: u32) -> Self {
        Self {
            reaction_frames,
            cooldown: 0,
            retry_pending: false,
        }
    }

    /// Where to tap this frame, if anywhere
    pub fn next_tap(&mut self, state: &GameState) -> Option<Vec2> {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }
        let tap = match state.phase() {
            GamePhase::Start => Some(Vec2::ZERO),
            GamePhase::Playing => most_threatening(state),
            GamePhase::GameOver if !self.retry_pending => {
                self.retry_pending = true;
                self.cooldown = RETRY_DELAY_FRAMES;
                return None;
            }
            GamePhase::GameOver => {
                self.retry_pending = false;
                Some(Vec2::ZERO)
            }
        };
        if tap.is_some() {
            self.cooldown = self.reaction_frames;
        }
        tap
    }
}

/// Center of the jeet with the least ground left to cover
fn most_threatening(state: &GameState) -> Option<Vec2> {
    let player_center = state.player.center_x();
    state
        .enemies
        .iter()
        .min_by(|a, b| {
            let da = (a.pos.x + a.size.x / 2.0 - player_center).abs();
            let db = (b.pos.x + b.size.x / 2.0 - player_center).abs();
            da.total_cmp(&db)
        })
        .map(|e| e.pos + e.size / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::handle_tap;
    use crate::sim::state::{Enemy, Side};
    use crate::sim::tick;

    #[test]
    fn test_targets_closest_enemy() {
        let mut state = GameState::new(5);
        handle_tap(&mut state, Vec2::ZERO, 0.0);
        let mut far = Enemy::entering_from(Side::Left, 3.0);
        far.pos.x = 10.0;
        let mut near = Enemy::entering_from(Side::Right, 3.0);
        near.pos.x = 420.0;
        state.enemies.push(far);
        state.enemies.push(near);

        let mut pilot = Autopilot::new(5);
        assert_eq!(pilot.next_tap(&state), Some(Vec2::new(436.0, 432.0)));
        // Cooling down
        for _ in 0..5 {
            assert_eq!(pilot.next_tap(&state), None);
        }
        assert!(pilot.next_tap(&state).is_some());
    }

    #[test]
    fn test_plays_and_retries() {
        let mut state = GameState::new(77);
        let mut pilot = Autopilot::new(24);
        let mut runs = 0;
        let mut now = 0.0;
        for _ in 0..20_000 {
            now += 16.0;
            tick(&mut state, now);
            let was_over = state.phase() == GamePhase::GameOver;
            if let Some(tap) = pilot.next_tap(&state) {
                handle_tap(&mut state, tap, now);
            }
            if was_over && state.phase() == GamePhase::Start {
                runs += 1;
            }
        }
        assert!(runs >= 1, "autopilot never finished a run");
    }
}
