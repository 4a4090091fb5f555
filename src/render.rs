//! Frame rendering abstraction.
//!
//! The canvas draws through [`FrameRenderer`] so the actual graphics layer is
//! swappable: the windowed frontend paints with egui, tests and headless
//! callers use [`FrameRecorder`] to capture the command stream.
//!
//! Colors are linear-ish RGB `Vec3`s in 0..1, the same convention the rest of
//! the crate uses for visuals.

use glam::{Vec2, Vec3};

/// Fixed dark background the canvas clears to (#0d0d0d).
pub const BACKGROUND: Vec3 = Vec3::new(0.051, 0.051, 0.051);

/// Fill for the body under the pointer (#e3ff00).
pub const HIGHLIGHT: Vec3 = Vec3::new(0.890, 1.0, 0.0);

/// Fill for every other circle (#f2f1f0).
pub const NEUTRAL: Vec3 = Vec3::new(0.949, 0.945, 0.941);

/// Label text color (#0d0d0d).
pub const INK: Vec3 = Vec3::new(0.051, 0.051, 0.051);

/// Label text size.
pub const LABEL_SIZE: f32 = 15.0;

/// Build a color from 8-bit channel values.
#[inline]
pub fn rgb_u8(r: u8, g: u8, b: u8) -> Vec3 {
    Vec3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Capability interface over a 2D drawing surface.
pub trait FrameRenderer {
    /// Fill the whole frame with one color.
    fn clear(&mut self, color: Vec3);

    /// Draw a filled, borderless circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3);

    /// Draw text centered on `center`.
    fn draw_text(&mut self, text: &str, center: Vec2, size: f32, color: Vec3);

    /// Resize the drawing surface.
    fn resize(&mut self, width: f32, height: f32);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Vec3,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Vec3,
    },
    Text {
        text: String,
        center: Vec2,
        size: f32,
        color: Vec3,
    },
    Resize {
        width: f32,
        height: f32,
    },
}

/// [`FrameRenderer`] that records commands instead of drawing.
///
/// `clear` starts a fresh frame, so after a draw pass the recorder holds
/// exactly the commands of the latest frame.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    commands: Vec<DrawCommand>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the current frame, in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Texts drawn this frame, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Circles drawn this frame, in draw order.
    pub fn circles(&self) -> Vec<(Vec2, f32, Vec3)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => Some((*center, *radius, *color)),
                _ => None,
            })
            .collect()
    }
}

impl FrameRenderer for FrameRecorder {
    fn clear(&mut self, color: Vec3) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, center: Vec2, size: f32, color: Vec3) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            center,
            size,
            color,
        });
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Resize { width, height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_u8_matches_constants() {
        assert!((rgb_u8(0x0d, 0x0d, 0x0d) - BACKGROUND).length() < 1e-3);
        assert!((rgb_u8(0xe3, 0xff, 0x00) - HIGHLIGHT).length() < 1e-3);
        assert!((rgb_u8(0xf2, 0xf1, 0xf0) - NEUTRAL).length() < 1e-3);
    }

    #[test]
    fn clear_starts_a_fresh_frame() {
        let mut recorder = FrameRecorder::new();
        recorder.clear(BACKGROUND);
        recorder.fill_circle(Vec2::ZERO, 10.0, NEUTRAL);
        recorder.draw_text("hi", Vec2::ZERO, LABEL_SIZE, INK);
        assert_eq!(recorder.commands().len(), 3);

        recorder.clear(BACKGROUND);
        assert_eq!(recorder.commands().len(), 1);
        assert!(recorder.texts().is_empty());
    }
}
