//! Tolerance-based assertions for floats and points.

#![allow(dead_code)]

use vectorlab::{Vector2, Vector3};

/// Default tolerance for floating-point comparisons.
pub const TOL: f64 = 1e-9;

/// Check approximate equality of two f64 values within `tol`.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// Assert two f64 values are approximately equal.
pub fn assert_f64_eq(a: f64, b: f64, tol: f64) {
    assert!(
        approx_eq(a, b, tol),
        "f64 mismatch: {a} vs {b} (delta={}, tol={tol})",
        (a - b).abs()
    );
}

/// Assert two component slices are approximately equal.
pub fn assert_slice_eq(a: &[f64], b: &[f64], tol: f64) {
    assert_eq!(a.len(), b.len(), "length mismatch: {a:?} vs {b:?}");
    for (x, y) in a.iter().zip(b) {
        assert!(approx_eq(*x, *y, tol), "slice mismatch: {a:?} vs {b:?} tol={tol}");
    }
}

/// Assert two Vector2 values are approximately equal component-wise.
pub fn assert_vec2_eq(a: &Vector2, b: &Vector2, tol: f64) {
    assert!(
        approx_eq(a.x, b.x, tol) && approx_eq(a.y, b.y, tol),
        "Vector2 mismatch: ({},{}) vs ({},{}) tol={tol}",
        a.x, a.y, b.x, b.y
    );
}

/// Assert two Vector3 values are approximately equal component-wise.
pub fn assert_vec3_eq(a: &Vector3, b: &Vector3, tol: f64) {
    assert!(
        approx_eq(a.x, b.x, tol) && approx_eq(a.y, b.y, tol) && approx_eq(a.z, b.z, tol),
        "Vector3 mismatch: ({},{},{}) vs ({},{},{}) tol={tol}",
        a.x, a.y, a.z, b.x, b.y, b.z
    );
}
