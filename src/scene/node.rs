//! Scene graph primitives.

use super::camera::{self, ViewTransform};
use super::mesh::ConeMesh;
use crate::config::CameraSettings;
use crate::types::{Color, Transform, Vector2, Vector3, VectorId, Viewport};

/// Geometry of a scene node in its local frame
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Cylinder along local Y, centered on the origin
    Cylinder { radius: f64, height: f64 },
    /// Cone along local Y, apex up, centered on its height
    Cone(ConeMesh),
    /// Axis-aligned cube centered on the origin
    Cube { size: f64 },
    /// Text anchored at the origin
    Text(String),
}

/// A shape with a flat material color, placed by a transform
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub shape: Shape,
    pub color: Color,
    pub transform: Transform,
}

impl SceneNode {
    pub fn new(shape: Shape, color: Color) -> Self {
        SceneNode {
            shape,
            color,
            transform: Transform::identity(),
        }
    }

    pub fn cylinder(radius: f64, height: f64, color: Color) -> Self {
        Self::new(Shape::Cylinder { radius, height }, color)
    }

    pub fn cone(mesh: ConeMesh, color: Color) -> Self {
        Self::new(Shape::Cone(mesh), color)
    }

    pub fn cube(size: f64, color: Color) -> Self {
        Self::new(Shape::Cube { size }, color)
    }

    pub fn text(content: impl Into<String>, color: Color) -> Self {
        Self::new(Shape::Text(content.into()), color)
    }

    /// Apply `transform` after the current placement
    pub fn placed(mut self, transform: Transform) -> Self {
        self.transform = self.transform.then(&transform);
        self
    }

    /// Move by `offset` after the current placement
    pub fn translated(self, offset: Vector3) -> Self {
        self.placed(Transform::from_translation(offset))
    }

    /// Where the local origin ends up
    pub fn position(&self) -> Vector3 {
        self.transform.apply(Vector3::ZERO)
    }

    /// Where local +Y points (the long axis of cylinders and cones)
    pub fn direction(&self) -> Vector3 {
        self.transform.apply_rotation(Vector3::UNIT_Y)
    }

    pub fn label(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text(content) => Some(content),
            _ => None,
        }
    }
}

/// Arrow for one world vector, built along +Y then oriented
#[derive(Debug, Clone, PartialEq)]
pub struct VectorArrow {
    /// Display position in the world
    pub index: usize,
    pub id: VectorId,
    pub color: Color,
    /// Arrow length in scene pixels
    pub length: f64,
    /// Rotation carrying +Y onto the vector direction
    pub orientation: Transform,
    pub shaft: SceneNode,
    pub head: SceneNode,
    pub caption: SceneNode,
}

impl VectorArrow {
    /// Scene position of the arrow tip
    pub fn tip(&self) -> Vector3 {
        self.orientation.apply(Vector3::new(0.0, self.length, 0.0))
    }

    /// Caption text
    pub fn label(&self) -> &str {
        self.caption.label().unwrap_or_default()
    }

    /// Shaft, head and caption in scene coordinates
    pub fn nodes(&self) -> [SceneNode; 3] {
        [&self.shaft, &self.head, &self.caption].map(|node| node.clone().placed(self.orientation))
    }
}

/// Output of one 3D render pass
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph {
    /// Scene pixels per world unit
    pub scale: f64,
    /// World units covered from the origin to each axis end
    pub span_units: f64,
    pub camera: CameraSettings,
    pub view: ViewTransform,
    pub axes: Vec<SceneNode>,
    pub grid: Vec<SceneNode>,
    pub ticks: Vec<SceneNode>,
    pub vectors: Vec<VectorArrow>,
}

impl SceneGraph {
    /// Orbit rotation applied to every node
    pub fn root_transform(&self) -> Transform {
        self.view.transform()
    }

    /// Total number of primitives
    pub fn node_count(&self) -> usize {
        self.axes.len() + self.grid.len() + self.ticks.len() + 3 * self.vectors.len()
    }

    /// Arrow of the vector at display position `index`
    pub fn vector(&self, index: usize) -> Option<&VectorArrow> {
        self.vectors.iter().find(|arrow| arrow.index == index)
    }

    /// All text labels: axes first, then vector captions
    pub fn labels(&self) -> Vec<&str> {
        self.axes
            .iter()
            .filter_map(SceneNode::label)
            .chain(self.vectors.iter().map(VectorArrow::label))
            .collect()
    }

    /// Screen position of a scene point for this frame's camera
    pub fn project(&self, point: Vector3, viewport: Viewport) -> Option<Vector2> {
        camera::project(&self.view, &self.camera, viewport, point)
    }
}
