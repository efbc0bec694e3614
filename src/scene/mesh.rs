//! Hand-built cone mesh used for every arrowhead in the 3D scene.

use crate::types::Vector3;
use std::f64::consts::PI;

/// Smallest ring that still encloses a volume
pub const MIN_DIVISIONS: usize = 3;

/// Triangle mesh of a solid cone.
///
/// The cone points along +Y and is centered on its own height: the apex sits
/// at `y = height / 2`, the base ring and base center at `y = -height / 2`.
///
/// Vertex layout is `[apex, ring[0], .., ring[n-1], base_center]`. The ring
/// runs counter-clockwise seen from the apex, so side triangles
/// `(apex, ring[i], ring[i+1])` and base triangles
/// `(center, ring[i+1], ring[i])` all face outward.
#[derive(Debug, Clone, PartialEq)]
pub struct ConeMesh {
    pub radius: f64,
    pub height: f64,
    pub divisions: usize,
    pub points: Vec<Vector3>,
    /// Triangles as vertex indices, side fan first, then base fan
    pub faces: Vec<[usize; 3]>,
}

impl ConeMesh {
    /// Index of the apex vertex
    pub const APEX: usize = 0;

    /// Index of the base center vertex
    pub fn base_center(&self) -> usize {
        self.divisions + 1
    }

    /// Index of ring vertex `i` (wraps around)
    pub fn ring(&self, i: usize) -> usize {
        1 + i % self.divisions
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Unnormalized normal of a face by the right-hand rule
    pub fn face_normal(&self, face: usize) -> Option<Vector3> {
        let [a, b, c] = *self.faces.get(face)?;
        let (a, b, c) = (self.points[a], self.points[b], self.points[c]);
        Some((b - a).cross(&(c - a)))
    }

    /// Centroid of a face
    pub fn face_center(&self, face: usize) -> Option<Vector3> {
        let [a, b, c] = *self.faces.get(face)?;
        Some((self.points[a] + self.points[b] + self.points[c]) / 3.0)
    }
}

/// Build a cone of `radius` and `height` with `divisions` ring vertices.
///
/// Fewer than [`MIN_DIVISIONS`] divisions are raised to that minimum.
pub fn build_cone_mesh(radius: f64, height: f64, divisions: usize) -> ConeMesh {
    let n = divisions.max(MIN_DIVISIONS);
    let half = height / 2.0;

    let mut points = Vec::with_capacity(n + 2);
    points.push(Vector3::new(0.0, half, 0.0));
    for i in 0..n {
        let angle = 2.0 * PI * i as f64 / n as f64;
        points.push(Vector3::new(radius * angle.cos(), -half, -radius * angle.sin()));
    }
    points.push(Vector3::new(0.0, -half, 0.0));

    let center = n + 1;
    let mut faces = Vec::with_capacity(2 * n);
    for i in 0..n {
        let next = (i + 1) % n;
        faces.push([ConeMesh::APEX, 1 + i, 1 + next]);
    }
    for i in 0..n {
        let next = (i + 1) % n;
        faces.push([center, 1 + next, 1 + i]);
    }

    ConeMesh {
        radius,
        height,
        divisions: n,
        points,
        faces,
    }
}
