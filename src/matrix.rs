//! Square 3x3 and 4x4 matrices.
//!
//! The matrix system provides:
//! - Value types over `nalgebra` storage with row-major `(i, j)` indexing
//! - Arithmetic, including matrix-vector and vector-matrix products
//! - Determinant, adjugate, trace and Frobenius inner product
//! - Angle-axis rotation matrices
//!
//! A vector on the left of a matrix is a row vector, so `v * m` is `mᵀ v`.

use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::settings::AXIS_NORM_THRESHOLD;
use crate::vector::{Vector3, Vector4};
use crate::{Error, Result};


/// A 3x3 matrix of `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix3x3(na::Matrix3<f64>);

/// A 4x4 matrix of `f64`, used for homogeneous transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix4x4(na::Matrix4<f64>);

impl Matrix3x3 {
    /// Rotation by `angle` radians about `axis`.
    ///
    /// The axis does not need to be normalised, but its length must be at
    /// least [`AXIS_NORM_THRESHOLD`] and every component must be finite.
    pub fn rotation(angle: f64, axis: &Vector3) -> Result<Self> {
        if !axis.as_na().iter().all(|c| c.is_finite()) {
            return Err(Error::DegenerateAxis {
                norm: axis.norm_squared().sqrt(),
            });
        }

        // divide by the largest component first to keep the squared length in range
        let scale = axis.as_na().amax();
        if scale == 0.0 {
            return Err(Error::DegenerateAxis { norm: 0.0 });
        }
        let scaled = *axis / scale;
        let scaled_norm = scaled.norm_squared().sqrt();
        let norm = scale * scaled_norm;
        if norm < AXIS_NORM_THRESHOLD {
            return Err(Error::DegenerateAxis { norm });
        }
        Ok(Self::rotation_unit(angle, &(scaled / scaled_norm)))
    }

    /// Rodrigues rotation about an axis that is already unit length.
    pub(crate) fn rotation_unit(angle: f64, k: &Vector3) -> Self {
        let (s, c) = angle.sin_cos();
        let k = k.as_na();
        Self(
            na::Matrix3::identity() * c
                + k.cross_matrix() * s
                + (k * k.transpose()) * (1.0 - c),
        )
    }
}

impl Matrix4x4 {
    /// Homogeneous rotation by `angle` radians about `axis`.
    pub fn rotation(angle: f64, axis: &Vector3) -> Result<Self> {
        let block = Matrix3x3::rotation(angle, axis)?;
        let mut m = na::Matrix4::identity();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&block.0);
        Ok(Self(m))
    }

    /// The upper-left 3x3 block.
    pub fn upper_left(&self) -> Matrix3x3 {
        Matrix3x3(self.0.fixed_view::<3, 3>(0, 0).into_owned())
    }
}

macro_rules! impl_matrix {
    ($name:ident, $inner:ty, $vector:ident, $n:literal) => {
        impl $name {
            /// Builds a matrix from its rows.
            pub fn new(rows: [[f64; $n]; $n]) -> Self {
                Self(<$inner>::from_fn(|i, j| rows[i][j]))
            }

            pub fn zeros() -> Self {
                Self(<$inner>::zeros())
            }

            pub fn identity() -> Self {
                Self(<$inner>::identity())
            }

            /// Builds a matrix from nested rows, checking that there are
            #[doc = concat!("exactly ", stringify!($n), " rows of ", stringify!($n), " entries.")]
            pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
                if rows.len() != $n {
                    return Err(Error::Shape {
                        expected: format!("{} rows", $n),
                        found: format!("{} rows", rows.len()),
                    });
                }
                if let Some((i, row)) = rows
                    .iter()
                    .enumerate()
                    .find(|(_, row)| row.as_ref().len() != $n)
                {
                    return Err(Error::Shape {
                        expected: format!("{} entries in row {}", $n, i),
                        found: format!("{} entries", row.as_ref().len()),
                    });
                }
                Ok(Self(<$inner>::from_fn(|i, j| rows[i].as_ref()[j])))
            }

            pub fn det(&self) -> f64 {
                self.0.determinant()
            }

            /// Adjugate, the transpose of the cofactor matrix.
            ///
            /// Defined for singular matrices too; `m * m.adj() == m.det() * I`.
            pub fn adj(&self) -> Self {
                Self(<$inner>::from_fn(|i, j| {
                    let minor = self.0.remove_row(j).remove_column(i).determinant();
                    if (i + j) % 2 == 0 {
                        minor
                    } else {
                        -minor
                    }
                }))
            }

            pub fn transpose(&self) -> Self {
                Self(self.0.transpose())
            }

            pub fn trace(&self) -> f64 {
                self.0.trace()
            }

            /// The diagonal entries as a vector.
            pub fn diag(&self) -> $vector {
                $vector::from(self.0.diagonal())
            }

            /// Frobenius inner product, the sum of elementwise products.
            pub fn dot(&self, other: &Self) -> f64 {
                self.0.dot(&other.0)
            }

            /// Frobenius norm. Not regularised.
            pub fn norm(&self) -> f64 {
                self.0.norm()
            }

            pub fn as_na(&self) -> &$inner {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zeros()
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;

            fn mul(self, lambda: f64) -> Self {
                Self(self.0 * lambda)
            }
        }

        impl Mul<$name> for f64 {
            type Output = $name;

            fn mul(self, m: $name) -> $name {
                $name(m.0 * self)
            }
        }

        impl Div<f64> for $name {
            type Output = Self;

            fn div(self, lambda: f64) -> Self {
                Self(self.0 / lambda)
            }
        }

        impl Mul for $name {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self {
                Self(self.0 * rhs.0)
            }
        }

        impl Mul<$vector> for $name {
            type Output = $vector;

            fn mul(self, v: $vector) -> $vector {
                $vector::from(self.0 * v.as_na())
            }
        }

        impl Mul<$name> for $vector {
            type Output = $vector;

            fn mul(self, m: $name) -> $vector {
                $vector::from(m.0.tr_mul(self.as_na()))
            }
        }

        impl Index<(usize, usize)> for $name {
            type Output = f64;

            fn index(&self, idx: (usize, usize)) -> &f64 {
                &self.0[idx]
            }
        }

        impl IndexMut<(usize, usize)> for $name {
            fn index_mut(&mut self, idx: (usize, usize)) -> &mut f64 {
                &mut self.0[idx]
            }
        }

        impl From<$inner> for $name {
            fn from(m: $inner) -> Self {
                Self(m)
            }
        }

        impl From<$name> for $inner {
            fn from(m: $name) -> Self {
                m.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for i in 0..$n {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "[")?;
                    for j in 0..$n {
                        if j > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", self.0[(i, j)])?;
                    }
                    write!(f, "]")?;
                }
                Ok(())
            }
        }
    };
}

impl_matrix!(Matrix3x3, na::Matrix3<f64>, Vector3, 3);
impl_matrix!(Matrix4x4, na::Matrix4<f64>, Vector4, 4);
