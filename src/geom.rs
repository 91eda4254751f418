//! Infinite planes, spheres and where they meet.

use serde::{Deserialize, Serialize};

use crate::vector::Vector3;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn canonical_form_matches_point_normal_form() {
        let a = InfinitePlane::from_canonical(0.0, 0.0, 2.0, 1.0, 1.0, 3.0);
        let b = InfinitePlane::new(Vector3::new(5.0, -2.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
        assert_abs_diff_eq!(a.c(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.offset(), -3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.offset(), b.offset(), epsilon = 1e-12);
    }

    #[test]
    fn projection_lands_on_the_plane() {
        let plane = InfinitePlane::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 1.0, 0.0));
        let p = Vector3::new(-4.0, 0.5, 7.0);
        let q = plane.project(&p);
        assert_abs_diff_eq!(plane.signed_distance(&q), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            (p - q).norm_squared().sqrt(),
            plane.signed_distance(&p).abs(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn zero_normal_collapses_to_zero_distance() {
        let plane = InfinitePlane::new(Vector3::new(1.0, 2.0, 3.0), Vector3::zeros());
        assert_eq!(plane.n(), Vector3::zeros());
        assert_eq!(plane.signed_distance(&Vector3::new(-7.0, 4.0, 9.0)), 0.0);

        let sphere = Sphere::new(Vector3::zeros(), 1.0);
        let circle = sphere_plane_intersection(&sphere, &plane).unwrap();
        assert_eq!(circle.normal, Vector3::zeros());
        assert_eq!(circle.radius, 1.0);
    }

    #[test]
    fn sphere_cut_through_its_centre() {
        let sphere = Sphere::new(Vector3::new(0.0, 0.0, 1.0), 2.0);
        let plane = InfinitePlane::new(Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 1.0));
        let circle = sphere_plane_intersection(&sphere, &plane).unwrap();
        assert_abs_diff_eq!(circle.radius, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(circle.centre.z(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn off_centre_cut_and_miss() {
        let sphere = Sphere::new(Vector3::zeros(), 5.0);
        let plane = InfinitePlane::from_canonical(1.0, 0.0, 0.0, 3.0, 0.0, 0.0);
        let circle = sphere_plane_intersection(&sphere, &plane).unwrap();
        assert_abs_diff_eq!(circle.radius, 4.0, epsilon = 1e-6);
        assert_abs_diff_eq!(circle.centre.x(), 3.0, epsilon = 1e-6);

        let far = InfinitePlane::from_canonical(1.0, 0.0, 0.0, 6.0, 0.0, 0.0);
        assert!(sphere_plane_intersection(&sphere, &far).is_none());
    }
}

/// A plane in point-normal form, `n · (x - r0) = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfinitePlane {
    r0: Vector3,
    n: Vector3,
}

impl InfinitePlane {
    /// Plane through `r0` with normal direction `n`. The normal is normalised.
    ///
    /// A zero `n` is not rejected. It normalises to the zero vector, so every
    /// point then has `signed_distance` 0 and [`sphere_plane_intersection`]
    /// returns a circle with a zero normal. Callers that accept user input
    /// should check `n` first.
    pub fn new(r0: Vector3, n: Vector3) -> Self {
        Self {
            r0,
            n: n.normalised(),
        }
    }

    /// Plane `a (x - x0) + b (y - y0) + c (z - z0) = 0`.
    pub fn from_canonical(a: f64, b: f64, c: f64, x0: f64, y0: f64, z0: f64) -> Self {
        Self::new(Vector3::new(x0, y0, z0), Vector3::new(a, b, c))
    }

    pub fn r0(&self) -> Vector3 {
        self.r0
    }

    pub fn n(&self) -> Vector3 {
        self.n
    }

    pub fn a(&self) -> f64 {
        self.n.x()
    }

    pub fn b(&self) -> f64 {
        self.n.y()
    }

    pub fn c(&self) -> f64 {
        self.n.z()
    }

    /// `d` in `a x + b y + c z + d = 0`.
    pub fn offset(&self) -> f64 {
        -self.n.dot(&self.r0)
    }

    /// Distance from the plane, positive on the side the normal points to.
    pub fn signed_distance(&self, p: &Vector3) -> f64 {
        self.n.dot(&(*p - self.r0))
    }

    /// Orthogonal projection of `p` onto the plane.
    pub fn project(&self, p: &Vector3) -> Vector3 {
        *p - self.signed_distance(p) * self.n
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub centre: Vector3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(centre: Vector3, radius: f64) -> Self {
        Self { centre, radius }
    }
}

/// A circle embedded in 3D, lying in the plane through `centre` with normal `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub centre: Vector3,
    pub normal: Vector3,
    pub radius: f64,
}

/// Circle along which `plane` cuts `sphere`.
///
/// Returns `None` when the plane misses the sphere. A tangent plane gives a
/// circle of radius zero.
pub fn sphere_plane_intersection(sphere: &Sphere, plane: &InfinitePlane) -> Option<Circle> {
    let d = plane.signed_distance(&sphere.centre);
    if d.abs() > sphere.radius {
        return None;
    }
    Some(Circle {
        centre: sphere.centre - d * plane.n(),
        normal: plane.n(),
        radius: (sphere.radius * sphere.radius - d * d).sqrt(),
    })
}
