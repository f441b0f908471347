//! Axis-aligned rectangles in viewport (client) pixel space.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, origin at the top-left corner.
///
/// Mirrors the shape of a DOM bounding client rect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rectangle at the origin covering a `width` x `height` viewport.
    pub fn viewport(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Whether `point` lies inside, edges included.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Area, treating negative extents as empty.
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grows (positive) or shrinks (negative) each edge independently,
    /// in CSS margin order: top, right, bottom, left.
    pub fn expand(&self, top: f64, right: f64, bottom: f64, left: f64) -> Rect {
        Rect {
            left: self.left - left,
            top: self.top - top,
            width: self.width + left + right,
            height: self.height + top + bottom,
        }
    }

    /// The overlapping region, or `None` when the rectangles do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}
