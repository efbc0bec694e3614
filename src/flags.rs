//! Display toggles shared by the 2D and 3D canvases.

use bitflags::bitflags;

bitflags! {
    /// What the canvases draw besides the vectors themselves.
    ///
    /// One value is shared by both canvases, so switching between 2D and 3D
    /// keeps the grid and tick choices.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DisplayFlags: u8 {
        /// Sum of the first two vectors.
        const RESULT = 0x01;
        /// Coordinate pair next to each vector label.
        const COORDINATES = 0x02;
        /// Arc and degree label between the first two vectors.
        const ANGLE = 0x04;
        /// Marker at the origin when the first two vectors are orthogonal.
        const ORTHOGONALITY = 0x08;
        /// Tick marks and integer labels along the axes.
        const TICKS = 0x10;
        /// Lattice at every integer coordinate.
        const GRID = 0x20;
    }
}

impl DisplayFlags {
    /// Toggles consumed by the 3D scene
    pub const SCENE: DisplayFlags = DisplayFlags::TICKS.union(DisplayFlags::GRID);

    /// Defaults of the two-vector direct-manipulation canvas (grid off)
    pub fn pair_default() -> Self {
        DisplayFlags::all().difference(DisplayFlags::GRID)
    }

    /// Turn one or more toggles on or off
    pub fn with(self, flags: DisplayFlags, on: bool) -> Self {
        let mut result = self;
        result.set(flags, on);
        result
    }
}

impl Default for DisplayFlags {
    fn default() -> Self {
        DisplayFlags::all()
    }
}
