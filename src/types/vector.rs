//! Fixed-size points used by the render output.
//!
//! [`Vector2`] carries screen-space positions of the 2D projection (pixels,
//! Y growing downwards). [`Vector3`] carries scene-space positions of the 3D
//! scene (pixels, Y growing upwards). Model vectors live in
//! [`crate::world::Vector`]; these types are only geometry scratch space.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Component-wise arithmetic shared by both point types
macro_rules! componentwise {
    ($name:ident { $($field:ident),+ }) => {
        impl $name {
            pub const ZERO: $name = $name { $($field: 0.0),+ };

            pub fn dot(&self, other: &$name) -> f64 {
                0.0 $(+ self.$field * other.$field)+
            }

            /// Euclidean length; `hypot` keeps huge components from overflowing
            pub fn length(&self) -> f64 {
                let mut length = 0.0_f64;
                $(length = length.hypot(self.$field);)+
                length
            }

            pub fn distance(&self, other: &$name) -> f64 {
                (*self - *other).length()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::ZERO
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, k: f64) -> $name {
                $name { $($field: self.$field * k),+ }
            }
        }

        impl Div<f64> for $name {
            type Output = $name;
            fn div(self, k: f64) -> $name {
                $name { $($field: self.$field / k),+ }
            }
        }

        impl Neg for $name {
            type Output = $name;
            fn neg(self) -> $name {
                $name { $($field: -self.$field),+ }
            }
        }
    };
}

/// Screen-space point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

componentwise!(Vector2 { x, y });

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Scene-space point or direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

componentwise!(Vector3 { x, y, z });

impl Vector3 {
    pub const UNIT_X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    /// Build from 2 or 3 model components; a missing Z is 0
    pub fn from_components(c: &[f64]) -> Self {
        let at = |i: usize| c.get(i).copied().unwrap_or(0.0);
        Vector3::new(at(0), at(1), at(2))
    }

    /// Unit vector in the same direction; the zero vector stays zero
    pub fn normalize(&self) -> Self {
        match self.length() {
            len if len > 0.0 => *self / len,
            _ => *self,
        }
    }

    /// Right-handed cross product
    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
