//! Drawing surface abstraction
//!
//! The scene code only talks to [`Surface`]. The browser implementation wraps
//! a 2D canvas context; [`RecordingSurface`] keeps the commands for tests and
//! headless runs.

use crate::assets::ImageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// Logical-pixel 2D drawing primitives
pub trait Surface {
    fn set_fill(&mut self, color: &str);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, w: f32, h: f32);
    fn save(&mut self);
    fn restore(&mut self);
    fn scale(&mut self, x: f32, y: f32);
    fn set_image_smoothing(&mut self, enabled: bool);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(String),
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Font(String),
    Align(TextAlign),
    Text { text: String, x: f32, y: f32 },
    Image { image: ImageId, x: f32, y: f32, w: f32, h: f32 },
    Save,
    Restore,
    Scale { x: f32, y: f32 },
    Smoothing(bool),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Every string drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn text_position(&self, needle: &str) -> Option<(f32, f32)> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Text { text, x, y } if text.contains(needle) => Some((*x, *y)),
            _ => None,
        })
    }

    pub fn images(&self) -> Vec<ImageId> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { image, .. } => Some(*image),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn set_fill(&mut self, color: &str) {
        self.commands.push(DrawCommand::Fill(color.to_string()));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::Rect { x, y, w, h });
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::Font(font.to_string()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.commands.push(DrawCommand::Align(align));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::Image { image, x, y, w, h });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Scale { x, y });
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.commands.push(DrawCommand::Smoothing(enabled));
    }
}
