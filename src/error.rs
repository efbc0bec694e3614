//! Error types for the vectorlab library

use crate::types::VectorId;
use crate::world::Axis;
use thiserror::Error;

/// Main error type for vector operations
#[derive(Debug, Error)]
pub enum VectorError {
    /// Operands of a binary operation have different lengths
    #[error("Dimension mismatch: {left} vs {right} components")]
    DimensionMismatch { left: usize, right: usize },

    /// Operation is not defined for this number of components
    #[error("Invalid dimension: {0} (expected 3)")]
    InvalidDimension(usize),

    /// Direction requested from a zero-magnitude vector
    #[error("Degenerate vector: magnitude is zero")]
    DegenerateVector,

    /// NaN or infinity offered as a vector component
    #[error("Non-finite value {value} for component {axis}")]
    NonFiniteComponent { axis: Axis, value: f64 },

    /// Component does not exist for a vector of this dimension
    #[error("Component {axis} is out of range for a {dimension}D vector")]
    AxisOutOfRange { axis: Axis, dimension: usize },

    /// No vector with this id in the world
    #[error("Unknown vector: {0}")]
    UnknownVector(VectorId),

    /// Snapshot cannot be turned back into a world
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for vectorlab operations
pub type Result<T> = std::result::Result<T, VectorError>;
