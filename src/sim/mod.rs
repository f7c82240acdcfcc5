//! Game simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - Host clock passed in, never read
//! - Seeded RNG only
//! - Enemies iterate in spawn order

pub mod autopilot;
pub mod input;
pub mod mission;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use input::{handle_pointer_move, handle_tap};
pub use mission::mission_code;
pub use state::{Enemy, GameEvent, GamePhase, GameState, Player, Popup, Rect, Side};
pub use tick::tick;
