//! Jeet Shredder - tap the jeets before they reach you
//!
//! Core modules:
//! - `sim`: Game session (phase machine, spawning, collisions, input, mission code)
//! - `renderer`: Draw commands against a 2D surface (canvas on the web)
//! - `assets`: Image/audio sources and load-completion signals
//! - `audio`: Music/sfx cue direction and browser playback
//! - `platform`: Display scaling and key/value storage
//! - `wallet`: Fee payment gate in front of the game canvas
//! - `settings`: Persisted player preferences

pub mod assets;
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod wallet;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical canvas resolution (independent of the displayed element size)
    pub const CANVAS_WIDTH: f32 = 640.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;

    /// Player sprite box
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const PLAYER_X: f32 = CANVAS_WIDTH / 2.0 - 20.0;
    pub const PLAYER_Y: f32 = CANVAS_HEIGHT - 50.0 - 40.0;

    /// Jeets walk along the ground line
    pub const ENEMY_SIZE: f32 = 32.0;
    pub const ENEMY_Y: f32 = CANVAS_HEIGHT - 64.0;
    /// Speed is drawn from [ENEMY_SPEED_BASE, ENEMY_SPEED_BASE + ENEMY_SPEED_SPREAD)
    pub const ENEMY_SPEED_BASE: f32 = 3.0;
    pub const ENEMY_SPEED_SPREAD: f32 = 3.0;

    /// Spawn interval in frames (decays by one per spawn)
    pub const SPAWN_INTERVAL_START: u32 = 60;
    pub const SPAWN_INTERVAL_FLOOR: u32 = 15;

    /// Walk cycle flips every N frames
    pub const ANIMATION_PERIOD: u64 = 10;

    /// Kill popup lifetime in frames
    pub const POPUP_FRAMES: i32 = 30;
    /// Popup is drawn this far above the enemy it replaces
    pub const POPUP_RISE: f32 = 20.0;
    pub const POPUP_TEXT: &str = "Pwned!";
}
