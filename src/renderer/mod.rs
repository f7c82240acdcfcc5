//! 2D rendering module
//!
//! Scenes are plain functions over a [`Surface`]; the browser backs it with a
//! canvas context.

pub mod scene;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{render, render_paywall};
pub use surface::{DrawCommand, RecordingSurface, Surface, TextAlign};

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasSurface, load_images};
