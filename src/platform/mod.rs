//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Display scaling (fixed logical canvas in a responsive element)
//! - Storage (LocalStorage on web)

pub mod storage;

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

pub use storage::{KeyValueStore, MemoryStore, StorageError};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Bounding box of the canvas element in display pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

#[cfg(target_arch = "wasm32")]
impl From<web_sys::DomRect> for DisplayRect {
    fn from(rect: web_sys::DomRect) -> Self {
        Self {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        }
    }
}

/// Convert a client-space pointer position to logical canvas pixels.
///
/// A collapsed element (zero width or height) maps everything to the
/// far-away `NaN` point, which no hit test matches.
pub fn to_game_space(client: Vec2, rect: DisplayRect) -> Vec2 {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Vec2::NAN;
    }
    let scale = Vec2::new(CANVAS_WIDTH / rect.width, CANVAS_HEIGHT / rect.height);
    (client - Vec2::new(rect.left, rect.top)) * scale
}

/// Largest uniform scale that fits the logical canvas in the viewport
pub fn fit_scale(viewport_width: f32, viewport_height: f32) -> f32 {
    (viewport_width / CANVAS_WIDTH).min(viewport_height / CANVAS_HEIGHT)
}

/// Displayed element size for a viewport, in CSS pixels
pub fn fitted_size(viewport_width: f32, viewport_height: f32) -> (f32, f32) {
    let scale = fit_scale(viewport_width, viewport_height);
    (CANVAS_WIDTH * scale, CANVAS_HEIGHT * scale)
}
