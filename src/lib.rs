//! Geometry kernel for micromagnetic visualisation.
//!
//! This crate holds the numerics behind a tetrahedral-mesh viewer: small
//! fixed-size vectors and matrices, aggregation of a tetrahedral mesh into
//! the quantities a camera needs, and the "sample plane" model that places
//! an oriented rectangle around a target from spherical parameters.
//!
//! Nothing here renders. The viewer shell feeds in raw vertex/tetrahedron
//! arrays and slider values, and takes back points and directions.
//!
//! # Key Components
//!
//! - [`Vector3`], [`Vector4`]: value vectors with a regularised norm
//! - [`Matrix3x3`], [`Matrix4x4`]: value matrices and angle-axis rotations
//! - [`Mesh`]: bounding box, volume-weighted centroid and total volume
//! - [`SamplePlane`]: normal, tangents and corner points of a sample plane
//! - [`geom`]: infinite planes, spheres and their intersection

pub mod geom;
pub mod matrix;
pub mod mesh;
pub mod sample_plane;
pub mod settings;
pub mod tetrahedron;
pub mod vector;

pub use geom::{Circle, InfinitePlane, Sphere};
pub use matrix::{Matrix3x3, Matrix4x4};
pub use mesh::{BoundingBox, Mesh};
pub use sample_plane::{PlaneGeometry, SamplePlane};
pub use vector::{Vector3, Vector4};

/// Result type for fallible kernel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when constructing kernel objects from bad input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Nested input does not have the required number of rows or entries.
    #[error("shape error: expected {expected}, found {found}")]
    Shape { expected: String, found: String },

    /// Rotation requested about an axis too short to normalise.
    #[error("degenerate rotation axis with norm {norm:e}")]
    DegenerateAxis { norm: f64 },

    /// A tetrahedron refers to a vertex that does not exist.
    #[error("tetrahedron {element} refers to vertex {index}, but the mesh only has {len} vertices")]
    Index {
        element: usize,
        index: u32,
        len: usize,
    },
}
