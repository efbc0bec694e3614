//! Viewport and screen-space bounding boxes

use super::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the 2D drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a viewport of the given size
    pub const fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    /// Screen position of the world origin
    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Rectangle covered by the viewport
    pub fn bounds(&self) -> BoundingBox2D {
        BoundingBox2D::new(Vector2::ZERO, Vector2::new(self.width, self.height))
    }

    /// True when there is no area to draw on
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(600.0, 600.0)
    }
}

/// Screen-space rectangle, `min` top-left and `max` bottom-right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2D {
    pub min: Vector2,
    pub max: Vector2,
}

impl BoundingBox2D {
    pub fn new(min: Vector2, max: Vector2) -> Self {
        BoundingBox2D { min, max }
    }

    /// Smallest box around `points`, `None` for an empty slice
    pub fn from_points(points: &[Vector2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |b, p| {
            Self::new(
                Vector2::new(b.min.x.min(p.x), b.min.y.min(p.y)),
                Vector2::new(b.max.x.max(p.x), b.max.y.max(p.y)),
            )
        }))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    fn within(&self, p: Vector2, inside: impl Fn(f64, f64, f64) -> bool) -> bool {
        inside(self.min.x, p.x, self.max.x) && inside(self.min.y, p.y, self.max.y)
    }

    /// Edges count as inside
    pub fn contains(&self, point: Vector2) -> bool {
        self.within(point, |lo, v, hi| lo <= v && v <= hi)
    }

    /// Edges count as outside
    pub fn contains_strictly(&self, point: Vector2) -> bool {
        self.within(point, |lo, v, hi| lo < v && v < hi)
    }
}

impl fmt::Display for BoundingBox2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}
