//! Game session state
//!
//! Everything the frame stepper, input handler and renderer share lives on
//! [`GameState`]. The phase is private so it can only move through the
//! transition methods below.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen, waiting for the first tap
    #[default]
    Start,
    /// Jeets are spawning and walking
    Playing,
    /// A jeet reached the player
    GameOver,
}

impl GamePhase {
    /// The only phase reachable from this one
    pub fn next(self) -> Self {
        match self {
            GamePhase::Start => GamePhase::Playing,
            GamePhase::Playing => GamePhase::GameOver,
            GamePhase::GameOver => GamePhase::Start,
        }
    }
}

/// Something the host should react to (sound cues, logging)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Start -> Playing
    Started,
    /// A tap removed a jeet at this position
    EnemyPwned { pos: Vec2 },
    /// Playing -> GameOver
    PlayerCaught,
    /// GameOver -> Start
    Reset,
}

/// Axis-aligned box used for hit tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Inclusive point containment (taps on the border count)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// The player character. Never moves, only turns around.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub facing_right: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, PLAYER_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            facing_right: true,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Face toward a horizontal game-space coordinate
    pub fn face_toward(&mut self, x: f32) {
        self.facing_right = x > self.center_x();
    }
}

/// Screen edge a jeet enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A jeet walking toward the player
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// +1 walks right, -1 walks left
    pub direction: f32,
    /// Walk cycle pose, 0 or 1
    pub anim_frame: u8,
}

impl Enemy {
    /// A jeet just off-screen on `side`, walking inward
    pub fn entering_from(side: Side, speed: f32) -> Self {
        let (x, direction) = match side {
            Side::Left => (-ENEMY_SIZE, 1.0),
            Side::Right => (CANVAS_WIDTH, -1.0),
        };
        Self {
            pos: Vec2::new(x, ENEMY_Y),
            size: Vec2::splat(ENEMY_SIZE),
            speed,
            direction,
            anim_frame: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn walks_right(&self) -> bool {
        self.direction > 0.0
    }

    pub fn advance(&mut self) {
        self.pos.x += self.speed * self.direction;
    }

    pub fn toggle_pose(&mut self) {
        self.anim_frame = (self.anim_frame + 1) % 2;
    }

    /// Touching the player box. The bottom edge of the player is not checked:
    /// jeets walk on the ground line so they can never pass underneath.
    pub fn touches(&self, player: &Player) -> bool {
        let me = self.rect();
        let them = player.rect();
        me.right() > them.left() && me.left() < them.right() && me.bottom() > them.top()
    }
}

/// Floating "Pwned!" marker left behind by a kill
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub pos: Vec2,
    pub text: &'static str,
    /// Frames left to live
    pub timer: i32,
}

impl Popup {
    pub fn for_kill(enemy: &Enemy) -> Self {
        Self {
            pos: Vec2::new(enemy.pos.x, enemy.pos.y - POPUP_RISE),
            text: POPUP_TEXT,
            timer: POPUP_FRAMES,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    phase: GamePhase,
    pub player: Player,
    /// Live jeets in spawn order (newest last)
    pub enemies: Vec<Enemy>,
    pub popups: Vec<Popup>,
    /// Jeets pwned this run
    pub kills: u32,
    /// Survival time this run
    pub seconds_played: f64,
    /// Timestamp (ms) survival time is measured from
    pub last_time_ms: f64,
    /// Current spawn interval in frames
    pub spawn_interval: u32,
    /// Playing frames since the run started (spawn clock)
    pub frame_count: u64,
    /// Shared walk-cycle clock, never reset
    pub animation_frame: u64,
    pub rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session on the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::Start,
            player: Player::default(),
            enemies: Vec::new(),
            popups: Vec::new(),
            kills: 0,
            seconds_played: 0.0,
            last_time_ms: 0.0,
            spawn_interval: SPAWN_INTERVAL_START,
            frame_count: 0,
            animation_frame: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whole seconds survived, as shown on the HUD and hashed into the mission code
    pub fn whole_seconds(&self) -> u64 {
        self.seconds_played.floor() as u64
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Start -> Playing. Survival time is measured from `now_ms`.
    pub fn begin_play(&mut self, now_ms: f64) -> bool {
        if self.phase != GamePhase::Start {
            return false;
        }
        self.phase = self.phase.next();
        self.last_time_ms = now_ms;
        self.push_event(GameEvent::Started);
        true
    }

    /// Playing -> GameOver. Returns false if the run was already over.
    pub fn end_run(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = self.phase.next();
        self.push_event(GameEvent::PlayerCaught);
        true
    }

    /// GameOver -> Start, clearing the run
    pub fn reset_to_title(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.phase = self.phase.next();
        self.kills = 0;
        self.seconds_played = 0.0;
        self.enemies.clear();
        self.popups.clear();
        self.spawn_interval = SPAWN_INTERVAL_START;
        self.frame_count = 0;
        self.push_event(GameEvent::Reset);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_cycle() {
        assert_eq!(GamePhase::Start.next(), GamePhase::Playing);
        assert_eq!(GamePhase::Playing.next(), GamePhase::GameOver);
        assert_eq!(GamePhase::GameOver.next(), GamePhase::Start);
    }

    #[test]
    fn test_transitions_reject_out_of_order() {
        let mut state = GameState::new(1);
        assert!(!state.end_run());
        assert!(!state.reset_to_title());
        assert_eq!(state.phase(), GamePhase::Start);

        assert!(state.begin_play(1000.0));
        assert!(!state.begin_play(2000.0));
        assert_eq!(state.last_time_ms, 1000.0);

        assert!(state.end_run());
        assert!(!state.end_run());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Started, GameEvent::PlayerCaught]
        );
    }

    #[test]
    fn test_reset_clears_run() {
        let mut state = GameState::new(7);
        state.begin_play(0.0);
        state.kills = 12;
        state.seconds_played = 33.5;
        state.spawn_interval = 20;
        state.frame_count = 900;
        state.animation_frame = 900;
        state.enemies.push(Enemy::entering_from(Side::Left, 4.0));
        state.end_run();

        assert!(state.reset_to_title());
        assert_eq!(state.phase(), GamePhase::Start);
        assert_eq!(state.kills, 0);
        assert_eq!(state.seconds_played, 0.0);
        assert!(state.enemies.is_empty());
        assert_eq!(state.spawn_interval, SPAWN_INTERVAL_START);
        assert_eq!(state.frame_count, 0);
        // Walk cycle clock keeps running across runs
        assert_eq!(state.animation_frame, 900);
    }

    #[test]
    fn test_enemy_entry_positions() {
        let left = Enemy::entering_from(Side::Left, 3.5);
        assert_eq!(left.pos, Vec2::new(-32.0, 416.0));
        assert!(left.walks_right());

        let right = Enemy::entering_from(Side::Right, 3.5);
        assert_eq!(right.pos, Vec2::new(640.0, 416.0));
        assert!(!right.walks_right());
    }

    #[test]
    fn test_enemy_touches_player_edges() {
        let player = Player::default();
        let mut enemy = Enemy::entering_from(Side::Left, 3.0);

        // Right edge exactly on the player's left edge is not a touch
        enemy.pos.x = player.pos.x - ENEMY_SIZE;
        assert!(!enemy.touches(&player));
        enemy.pos.x += 0.5;
        assert!(enemy.touches(&player));

        // Left edge exactly on the player's right edge is not a touch
        enemy.pos.x = player.pos.x + player.size.x;
        assert!(!enemy.touches(&player));
        enemy.pos.x -= 0.5;
        assert!(enemy.touches(&player));
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let rect = Rect {
            pos: Vec2::new(10.0, 10.0),
            size: Vec2::splat(32.0),
        };
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(42.0, 42.0)));
        assert!(!rect.contains(Vec2::new(42.1, 20.0)));
        assert!(!rect.contains(Vec2::new(f32::NAN, 20.0)));
    }

    #[test]
    fn test_player_faces_tap() {
        let mut player = Player::default();
        player.face_toward(0.0);
        assert!(!player.facing_right);
        player.face_toward(639.0);
        assert!(player.facing_right);
        // Exactly on center counts as left
        player.face_toward(player.center_x());
        assert!(!player.facing_right);
    }
}
