//! Identity of vectors inside a world
//!
//! Ids are allocated by the world, start at 1 and are never reused, so a
//! removed vector can never be confused with a later one.

use std::fmt;

/// A unique identifier for a vector in a [`crate::World`]
///
/// Id 0 is reserved and invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VectorId(u64);

impl VectorId {
    /// The null/invalid id (0)
    pub const NULL: VectorId = VectorId(0);

    /// Create an id from a raw value
    #[inline]
    pub const fn new(value: u64) -> Self {
        VectorId(value)
    }

    /// Get the raw value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Check if this is the null id
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl Default for VectorId {
    fn default() -> Self {
        VectorId::NULL
    }
}

impl fmt::Display for VectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
