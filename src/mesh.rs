//! Tetrahedral mesh aggregation.
//!
//! The mesh system provides:
//! - Validation of tetrahedron connectivity against the vertex list
//! - An axis-aligned bounding box
//! - Total signed volume and the volume-weighted centroid
//! - A length scale for sizing viewer objects
//!
//! All derived quantities are computed once on construction. The mesh is
//! immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::tetrahedron;
use crate::vector::Vector3;
use crate::{Error, Result};


/// Axis-aligned bounding box.
///
/// An empty point set gives `min = +inf`, `max = -inf`, which
/// [`BoundingBox::is_valid`] reports as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vector3,
    pub max: Vector3,
}

impl BoundingBox {
    /// Bounding box of a set of points.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a [f64; 3]>,
    {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for p in points {
            for k in 0..3 {
                min[k] = min[k].min(p[k]);
                max[k] = max[k].max(p[k]);
            }
        }
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// True when `min <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        (0..3).all(|k| self.min[k] <= self.max[k])
    }

    pub fn diagonal(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn centre(&self) -> Vector3 {
        (self.min + self.max) / 2.0
    }
}

/// A tetrahedral mesh and its aggregate geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<[f64; 3]>,
    tetrahedra: Vec<[u32; 4]>,
    submeshes: Vec<u32>,
    bounding_box: BoundingBox,
    centroid: Vector3,
    volume: f64,
}

impl Mesh {
    /// Builds a mesh and computes its bounding box, volume and centroid.
    ///
    /// `submeshes` is stored as given. A mesh with zero total volume is
    /// accepted, but its centroid is NaN.
    pub fn new(
        vertices: Vec<[f64; 3]>,
        tetrahedra: Vec<[u32; 4]>,
        submeshes: Vec<u32>,
    ) -> Result<Self> {
        let len = vertices.len();
        for (element, tet) in tetrahedra.iter().enumerate() {
            if let Some(&index) = tet.iter().find(|&&i| i as usize >= len) {
                return Err(Error::Index {
                    element,
                    index,
                    len,
                });
            }
        }

        let bounding_box = BoundingBox::from_points(&vertices);

        let mut volume = 0.0;
        let mut centroid_sum = Vector3::zeros();
        for tet in &tetrahedra {
            let [x0, x1, x2, x3] = tet.map(|i| Vector3::from(vertices[i as usize]));
            let tet_volume = tetrahedron::volume(&x0, &x1, &x2, &x3);
            volume += tet_volume;
            centroid_sum += tet_volume * tetrahedron::centroid(&x0, &x1, &x2, &x3);
        }

        if volume == 0.0 {
            log::warn!(
                "mesh with {} tetrahedra has zero volume, centroid is undefined",
                tetrahedra.len()
            );
        }
        let centroid = centroid_sum / volume;

        log::info!(
            "mesh: {} vertices, {} tetrahedra, {} submeshes, volume {:.6e}",
            len,
            tetrahedra.len(),
            submeshes.len(),
            volume
        );
        log::debug!(
            "mesh bounds: {} to {}, centroid {}",
            bounding_box.min,
            bounding_box.max,
            centroid
        );

        Ok(Self {
            vertices,
            tetrahedra,
            submeshes,
            bounding_box,
            centroid,
            volume,
        })
    }

    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    pub fn tetrahedra(&self) -> &[[u32; 4]] {
        &self.tetrahedra
    }

    pub fn submeshes(&self) -> &[u32] {
        &self.submeshes
    }

    /// Volume-weighted centroid. NaN when [`Mesh::volume`] is zero.
    pub fn centroid(&self) -> Vector3 {
        self.centroid
    }

    pub fn box_min(&self) -> Vector3 {
        self.bounding_box.min
    }

    pub fn box_max(&self) -> Vector3 {
        self.bounding_box.max
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Total signed volume.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_tetrahedra(&self) -> usize {
        self.tetrahedra.len()
    }

    /// Length of the bounding box diagonal, or 0 for an empty mesh.
    pub fn length_scale(&self) -> f64 {
        if self.bounding_box.is_valid() {
            self.bounding_box.diagonal().norm_squared().sqrt()
        } else {
            0.0
        }
    }
}
