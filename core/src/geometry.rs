//! Axis-aligned geometry shared by the collision pass and the renderer.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle expressed by its four edges in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl Rect {
    /// Builds the rectangle covered by an object at `(x, y)` with the given size.
    #[must_use]
    pub fn from_bounds(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.left
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.top
    }

    /// Right edge.
    #[must_use]
    pub const fn right(&self) -> f32 {
        self.right
    }

    /// Bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Closed-interval overlap test: rectangles that merely touch intersect.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.left > self.right
            || other.right < self.left
            || other.top > self.bottom
            || other.bottom < self.top)
    }
}

/// Dimensions of the playable area in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Horizontal extent of the arena.
    pub width: f32,
    /// Vertical extent of the arena.
    pub height: f32,
}

impl Arena {
    /// Creates an arena description.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Rectangle covering the whole arena.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_bounds(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}
