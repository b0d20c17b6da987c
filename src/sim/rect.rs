//! Axis-aligned box geometry shared by every entity
//!
//! A box is defined by:
//! - x, y: top-left corner in viewport pixels
//! - w, h: extent to the right and downward

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp;
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of the given size centered on `center`
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test; boxes that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        rects_intersect(self, other)
    }

    /// Largest x that keeps the box inside the viewport
    #[inline]
    pub fn max_x(&self) -> f32 {
        VIEWPORT_WIDTH - self.w
    }

    /// Largest y that keeps the box inside the viewport
    #[inline]
    pub fn max_y(&self) -> f32 {
        VIEWPORT_HEIGHT - self.h
    }

    /// Pull the box fully inside the viewport
    pub fn clamp_to_viewport(&mut self) {
        self.x = clamp(self.x, 0.0, self.max_x());
        self.y = clamp(self.y, 0.0, self.max_y());
    }

    /// True once any part of the box has left the viewport on some side
    /// far enough that nothing of it remains visible
    pub fn is_outside_viewport(&self) -> bool {
        self.right() < 0.0 || self.x > VIEWPORT_WIDTH || self.bottom() < 0.0 || self.y > VIEWPORT_HEIGHT
    }

    /// True once the right edge has passed the left viewport edge
    #[inline]
    pub fn is_past_left_edge(&self) -> bool {
        self.right() < 0.0
    }
}

/// Half-open overlap on both axes
#[inline]
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
