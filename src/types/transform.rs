//! Affine transforms for scene nodes
//!
//! Provides the 4x4 matrix used to place cylinders, cones, cubes and labels
//! in the 3D scene, and to apply the orbit camera.

use crate::math::NEGLIGIBLE;
use crate::types::Vector3;
use std::ops::Mul;

/// Row-major 4x4 matrix; only rotations and translations are ever built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    pub rows: [[f64; 4]; 4],
}

impl Matrix4 {
    pub const IDENTITY: Matrix4 = Matrix4 {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn translation(offset: Vector3) -> Self {
        let mut result = Self::IDENTITY;
        result.rows[0][3] = offset.x;
        result.rows[1][3] = offset.y;
        result.rows[2][3] = offset.z;
        result
    }

    /// Right-handed rotation of `angle` radians about `axis` (Rodrigues)
    pub fn rotation(axis: Vector3, angle: f64) -> Self {
        let Vector3 { x, y, z } = axis.normalize();
        let (sin, cos) = angle.sin_cos();
        let t = 1.0 - cos;

        Self {
            rows: [
                [cos + x * x * t, x * y * t - z * sin, x * z * t + y * sin, 0.0],
                [y * x * t + z * sin, cos + y * y * t, y * z * t - x * sin, 0.0],
                [z * x * t - y * sin, z * y * t + x * sin, cos + z * z * t, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    fn linear(&self, v: Vector3) -> [f64; 3] {
        let r = &self.rows;
        [
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        ]
    }

    /// Rotate then translate
    pub fn transform_point(&self, v: Vector3) -> Vector3 {
        let [x, y, z] = self.linear(v);
        Vector3::new(x + self.rows[0][3], y + self.rows[1][3], z + self.rows[2][3])
    }

    /// Rotate only
    pub fn transform_direction(&self, v: Vector3) -> Vector3 {
        let [x, y, z] = self.linear(v);
        Vector3::new(x, y, z)
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
            }
        }
        Matrix4 { rows }
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Placement of a scene node: rotation and translation combined
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The 4x4 transformation matrix
    pub matrix: Matrix4,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::IDENTITY,
        }
    }

    /// Rotation about `axis` in radians
    pub fn from_rotation(axis: Vector3, angle: f64) -> Self {
        Self {
            matrix: Matrix4::rotation(axis, angle),
        }
    }

    pub fn from_rotation_degrees(axis: Vector3, degrees: f64) -> Self {
        Self::from_rotation(axis, degrees.to_radians())
    }

    pub fn from_translation(translation: Vector3) -> Self {
        Self {
            matrix: Matrix4::translation(translation),
        }
    }

    /// Rotation that carries the unit `reference` direction onto `direction`.
    ///
    /// The rotation axis is `reference × direction` and the angle is
    /// `acos(direction · reference)`. When the two are parallel the cross
    /// product vanishes and the result is a 0° or 180° turn about `fallback`.
    /// A zero `direction` yields the identity.
    pub fn rotation_between(reference: Vector3, direction: Vector3, fallback: Vector3) -> Self {
        if direction.length() < NEGLIGIBLE {
            return Self::identity();
        }
        let reference = reference.normalize();
        let dir = direction.normalize();
        let axis = reference.cross(&dir);
        let cos = dir.dot(&reference).clamp(-1.0, 1.0);

        if axis.length() < NEGLIGIBLE {
            let angle = if cos > 0.0 { 0.0 } else { std::f64::consts::PI };
            return Self::from_rotation(fallback, angle);
        }
        Self::from_rotation(axis, cos.acos())
    }

    pub fn apply(&self, point: Vector3) -> Vector3 {
        self.matrix.transform_point(point)
    }

    /// Apply only the rotation portion
    pub fn apply_rotation(&self, direction: Vector3) -> Vector3 {
        self.matrix.transform_direction(direction)
    }

    /// Combine with another transform (this transform applied first)
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Combine with another transform (other transform applied first)
    pub fn compose(&self, other: &Transform) -> Transform {
        Transform {
            matrix: self.matrix * other.matrix,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}
