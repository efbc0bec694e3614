//! Draw commands produced by the 2D projection.
//!
//! A [`DrawList`] is a flat, back-to-front list of primitives in screen
//! space. Each item is tagged with the [`DrawLayer`] it belongs to so a
//! presenter (or a test) can pick out the grid, a given vector, or the angle
//! arc without re-deriving geometry.

use super::Projection;
use crate::types::{BoundingBox2D, Color, Vector2, Viewport};

/// Line color and width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Color, width: f64) -> Self {
        Stroke { color, width }
    }
}

/// A single screen-space primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Solid rectangle
    Fill {
        min: Vector2,
        max: Vector2,
        color: Color,
    },
    /// Straight segment
    Line {
        from: Vector2,
        to: Vector2,
        stroke: Stroke,
    },
    /// Open polyline through `points`
    Polyline { points: Vec<Vector2>, stroke: Stroke },
    /// Circle outline
    Circle {
        center: Vector2,
        radius: f64,
        stroke: Stroke,
    },
    /// Text anchored at its baseline start
    Text {
        position: Vector2,
        content: String,
        color: Color,
    },
}

impl DrawCommand {
    /// Screen points the primitive touches (circle: its center)
    pub fn points(&self) -> Vec<Vector2> {
        match self {
            DrawCommand::Fill { min, max, .. } => vec![*min, *max],
            DrawCommand::Line { from, to, .. } => vec![*from, *to],
            DrawCommand::Polyline { points, .. } => points.clone(),
            DrawCommand::Circle { center, .. } => vec![*center],
            DrawCommand::Text { position, .. } => vec![*position],
        }
    }

    /// Text content, if this is a label
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

/// What part of the picture an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawLayer {
    Background,
    Grid,
    Axis,
    Tick,
    /// Arrow and label of the vector at this display index
    Vector(usize),
    /// Sum of the first two vectors
    Sum,
    AngleArc,
    Orthogonality,
}

/// A tagged draw command
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub layer: DrawLayer,
    pub command: DrawCommand,
}

/// Output of one 2D render pass
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    /// Surface the list was laid out for
    pub viewport: Viewport,
    /// World-to-screen mapping used for every item
    pub projection: Projection,
    items: Vec<DrawItem>,
}

impl DrawList {
    /// Create an empty list
    pub fn new(viewport: Viewport, projection: Projection) -> Self {
        DrawList {
            viewport,
            projection,
            items: Vec::new(),
        }
    }

    /// Append a command on top of everything drawn so far
    pub fn push(&mut self, layer: DrawLayer, command: DrawCommand) {
        self.items.push(DrawItem { layer, command });
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing was drawn
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items back to front
    pub fn iter(&self) -> std::slice::Iter<'_, DrawItem> {
        self.items.iter()
    }

    /// Commands of one layer, in drawing order
    pub fn layer(&self, layer: DrawLayer) -> Vec<&DrawCommand> {
        self.items
            .iter()
            .filter(|item| item.layer == layer)
            .map(|item| &item.command)
            .collect()
    }

    /// Whether any item belongs to `layer`
    pub fn has_layer(&self, layer: DrawLayer) -> bool {
        self.items.iter().any(|item| item.layer == layer)
    }

    /// All label strings, in drawing order
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().filter_map(|item| item.command.text()).collect()
    }

    /// Bounding box of every item of `layer`
    pub fn extent(&self, layer: DrawLayer) -> Option<BoundingBox2D> {
        let points: Vec<Vector2> = self
            .items
            .iter()
            .filter(|item| item.layer == layer)
            .flat_map(|item| item.command.points())
            .collect();
        BoundingBox2D::from_points(&points)
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawItem;
    type IntoIter = std::slice::Iter<'a, DrawItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
