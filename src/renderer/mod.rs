//! Rendering interface
//!
//! The core issues draw calls once per tick through [`Renderer`]; a backend
//! turns them into pixels. Asset handles are symbolic ([`ImageId`]).

pub mod frame;
pub mod recording;
pub mod shapes;

pub use frame::{Hud, draw_attempt, draw_initials_prompt, draw_message, draw_scoreboard};
pub use recording::{DrawCommand, RecordingRenderer};

use glam::Vec2;

use crate::sim::geom::Rect;
use crate::sim::state::ObstacleSprite;

/// RGBA, 0-1 per channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Color = Color([0.0, 0.0, 0.0, 1.0]);
    pub const RED: Color = Color([1.0, 0.0, 0.0, 1.0]);
    pub const GREEN: Color = Color([0.0, 1.0, 0.0, 1.0]);
    pub const BLUE: Color = Color([0.0, 0.0, 1.0, 1.0]);
    pub const SKY: Color = Color([0.68, 0.85, 0.9, 1.0]);
    pub const GREY: Color = Color([0.78, 0.78, 0.78, 1.0]);
}

/// Which point of the text box the position refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    Center,
}

/// Images a backend is expected to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageId {
    Obstacle(ObstacleSprite),
    Coin,
}

pub trait Renderer {
    fn begin_frame(&mut self, _clear: Color) {}
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_image(&mut self, image: ImageId, pos: Vec2);
    fn draw_polygon(&mut self, points: &[Vec2], color: Color);
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, anchor: Anchor);
    fn end_frame(&mut self) {}
}
