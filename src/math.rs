//! Vector algebra on plain component slices.
//!
//! Every function takes `&[f64]` so that 2D and 3D vectors share one
//! implementation. Binary operations require operands of equal length and
//! fail with [`VectorError::DimensionMismatch`] otherwise; nothing is ever
//! truncated or zero-padded.

use crate::error::{Result, VectorError};

/// Below this magnitude a component (or vector) is treated as zero.
///
/// This is the single "is it effectively 3D" threshold used by the world,
/// the canvas selector and the 3D scene.
pub const NEGLIGIBLE: f64 = 1e-6;

fn check_same_len(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(VectorError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        })
    }
}

/// Element-wise sum
pub fn add(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_same_len(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// Element-wise difference `a - b`
pub fn subtract(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_same_len(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

/// Multiply every component by `k`
pub fn scale(k: f64, a: &[f64]) -> Vec<f64> {
    a.iter().map(|x| k * x).collect()
}

/// Dot product
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    check_same_len(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Squared Euclidean norm
pub fn magnitude_squared(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum()
}

/// Euclidean norm.
///
/// Components are divided by the largest one before squaring, so vectors
/// near `f64::MAX` do not overflow to infinity.
pub fn magnitude(a: &[f64]) -> f64 {
    let largest = a.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    if largest == 0.0 || !largest.is_finite() {
        return largest;
    }
    largest * a.iter().map(|x| (x / largest).powi(2)).sum::<f64>().sqrt()
}

/// Most lattice cells drawn on one side of an axis
pub const MAX_LATTICE_CELLS: usize = 50;

/// Spacing of a grid or tick lattice covering `extent` units per side.
///
/// The spacing is one unit while at most `max_cells` cells fit, and grows by
/// powers of ten beyond that, so the cell count stays bounded for any
/// finite extent.
pub fn lattice_step(extent: f64, max_cells: usize) -> f64 {
    let cells = extent / max_cells.max(1) as f64;
    if !(cells > 1.0) {
        return 1.0;
    }
    let step = 10_f64.powi(cells.log10().ceil() as i32);
    if step.is_finite() {
        step
    } else {
        f64::MAX
    }
}

/// Lattice lines on one side of the origin, capped at `max_cells`
pub fn lattice_cells(extent: f64, step: f64, max_cells: usize, round_up: bool) -> usize {
    let cells = extent / step;
    let cells = if round_up { cells.ceil() } else { cells.floor() };
    // `as` saturates, NaN becomes 0
    (cells as usize).min(max_cells)
}

/// Scale to unit length.
///
/// Fails with [`VectorError::DegenerateVector`] when the magnitude is exactly zero.
pub fn normalize(a: &[f64]) -> Result<Vec<f64>> {
    let len = magnitude(a);
    if len == 0.0 {
        return Err(VectorError::DegenerateVector);
    }
    Ok(a.iter().map(|x| x / len).collect())
}

/// Cross product, defined for 3-component operands only
pub fn cross(a: &[f64], b: &[f64]) -> Result<[f64; 3]> {
    check_same_len(a, b)?;
    if a.len() != 3 {
        return Err(VectorError::InvalidDimension(a.len()));
    }
    let (x1, y1, z1) = (a[0], a[1], a[2]);
    let (x2, y2, z2) = (b[0], b[1], b[2]);
    Ok([
        y1 * z2 - z1 * y2,
        z1 * x2 - x1 * z2,
        x1 * y2 - y1 * x2,
    ])
}

/// Angle between two vectors in radians, in `[0, π]`.
///
/// Returns 0 when either operand has zero magnitude. The cosine is clamped
/// to `[-1, 1]` before `acos` so rounding never produces NaN.
pub fn angle_radians(a: &[f64], b: &[f64]) -> Result<f64> {
    let d = dot(a, b)?;
    let (s1, s2) = (magnitude_squared(a), magnitude_squared(b));
    if s1 == 0.0 || s2 == 0.0 {
        return Ok(0.0);
    }
    // sqrt(s * s) == s exactly, so a vector against itself gives cos = 1
    let mut denom = (s1 * s2).sqrt();
    if !denom.is_finite() || denom == 0.0 {
        denom = s1.sqrt() * s2.sqrt();
    }
    let cos = (d / denom).clamp(-1.0, 1.0);
    Ok(cos.acos())
}

/// Angle between two vectors in degrees, in `[0, 180]`
pub fn angle_degrees(a: &[f64], b: &[f64]) -> Result<f64> {
    angle_radians(a, b).map(f64::to_degrees)
}

/// Whether two vectors are orthogonal within [`NEGLIGIBLE`]
pub fn is_orthogonal(a: &[f64], b: &[f64]) -> Result<bool> {
    Ok(dot(a, b)?.abs() < NEGLIGIBLE)
}

/// Signed lattice indices `-cells..=cells`
pub fn lattice_range(cells: usize) -> std::ops::RangeInclusive<i64> {
    let n = i64::try_from(cells).unwrap_or(i64::MAX);
    -n..=n
}
