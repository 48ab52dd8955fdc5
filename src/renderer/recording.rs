//! A renderer that records draw calls instead of rasterising them.
//! Used by the headless binary and by tests.

use glam::Vec2;

use super::{Anchor, Color, ImageId, Renderer};
use crate::sim::geom::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { rect: Rect, color: Color },
    Image { image: ImageId, pos: Vec2 },
    Polygon { points: Vec<Vec2>, color: Color },
    Text { text: String, pos: Vec2, color: Color, anchor: Anchor },
}

/// Keeps the commands of the last frame and a count of finished frames
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Every string drawn in the current frame
    pub fn texts(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, _clear: Color) {
        self.commands.clear();
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_image(&mut self, image: ImageId, pos: Vec2) {
        self.commands.push(DrawCommand::Image { image, pos });
    }

    fn draw_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, anchor: Anchor) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            color,
            anchor,
        });
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}
