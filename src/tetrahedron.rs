//! Per-element quantities of a linear tetrahedron.

use crate::vector::Vector3;


/// Signed volume, `(x1 - x0) · ((x2 - x0) × (x3 - x0)) / 6`.
///
/// Positive when `x1 - x0`, `x2 - x0`, `x3 - x0` form a right-handed set.
pub fn volume(x0: &Vector3, x1: &Vector3, x2: &Vector3, x3: &Vector3) -> f64 {
    let a = *x1 - *x0;
    let b = *x2 - *x0;
    let c = *x3 - *x0;
    a.dot(&b.cross(&c)) / 6.0
}

pub fn centroid(x0: &Vector3, x1: &Vector3, x2: &Vector3, x3: &Vector3) -> Vector3 {
    (*x0 + *x1 + *x2 + *x3) / 4.0
}
