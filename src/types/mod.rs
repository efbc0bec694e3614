//! Basic value types shared by the engines

pub mod bounds;
pub mod color;
pub mod id;
pub mod transform;
pub mod vector;

pub use bounds::{BoundingBox2D, Viewport};
pub use color::{palette_2d, palette_3d, Color};
pub use id::VectorId;
pub use transform::{Matrix4, Transform};
pub use vector::{Vector2, Vector3};
