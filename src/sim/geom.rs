//! Axis-aligned rectangles
//!
//! Screen space: x grows right, y grows down. Edges follow the usual
//! half-open convention, so rectangles that only touch do not intersect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Degenerate rectangles never collide
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }

    /// True if the two rectangles share a region of positive area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.is_solid()
            && other.is_solid()
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Grow (positive) or shrink (negative) each side by the given amounts,
    /// keeping the center fixed. Sizes never go below zero.
    pub fn inflate(&self, dx: f32, dy: f32) -> Rect {
        let w = (self.w + 2.0 * dx).max(0.0);
        let h = (self.h + 2.0 * dy).max(0.0);
        Rect::new(
            self.x + (self.w - w) / 2.0,
            self.y + (self.h - h) / 2.0,
            w,
            h,
        )
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Horizontal overlap with the span [left, right)
    pub fn overlaps_span(&self, left: f32, right: f32) -> bool {
        self.left() < right && left < self.right()
    }
}
