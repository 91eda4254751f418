//! Three and four component Cartesian vectors.
//!
//! Both types are thin value wrappers over `nalgebra` column vectors. They
//! add the one thing the viewer relies on that `nalgebra` does not do: a
//! regularised norm, `sqrt(v·v + eps²)`, so that normalising a zero vector
//! gives a zero vector instead of NaN.
//!
//! The regularisation epsilon is not global state. [`DEFAULT_EPS`] is used
//! by [`Vector3::norm`] and friends; the `*_eps` variants take it as an
//! argument.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub, SubAssign};

use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::settings::DEFAULT_EPS;
use crate::{Error, Result};


/// A three dimensional Cartesian vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector3(na::Vector3<f64>);

/// A four dimensional Cartesian vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector4(na::Vector4<f64>);

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(na::Vector3::new(x, y, z))
    }

    pub fn zeros() -> Self {
        Self(na::Vector3::zeros())
    }

    /// Builds a vector from a slice holding exactly three components.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(Error::Shape {
                expected: "3 components".to_string(),
                found: format!("{} components", values.len()),
            }),
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self(self.0.cross(&other.0))
    }

    /// Regularised norm using [`DEFAULT_EPS`].
    pub fn norm(&self) -> f64 {
        self.norm_eps(DEFAULT_EPS)
    }

    /// Regularised norm, `sqrt(v·v + eps²)`.
    pub fn norm_eps(&self, eps: f64) -> f64 {
        (self.norm_squared() + eps * eps).sqrt()
    }

    pub fn norm_squared(&self) -> f64 {
        self.0.norm_squared()
    }

    /// Unit vector in the direction of `self`, using the regularised norm.
    pub fn normalised(&self) -> Self {
        self.normalised_eps(DEFAULT_EPS)
    }

    pub fn normalised_eps(&self, eps: f64) -> Self {
        *self / self.norm_eps(eps)
    }

    /// The underlying `nalgebra` vector.
    pub fn as_na(&self) -> &na::Vector3<f64> {
        &self.0
    }
}

impl Vector4 {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self(na::Vector4::new(x, y, z, w))
    }

    pub fn zeros() -> Self {
        Self(na::Vector4::zeros())
    }

    /// Builds a vector from a slice holding exactly four components.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [x, y, z, w] => Ok(Self::new(*x, *y, *z, *w)),
            _ => Err(Error::Shape {
                expected: "4 components".to_string(),
                found: format!("{} components", values.len()),
            }),
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn w(&self) -> f64 {
        self.0.w
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }

    /// Regularised norm using [`DEFAULT_EPS`].
    pub fn norm(&self) -> f64 {
        self.norm_eps(DEFAULT_EPS)
    }

    pub fn norm_eps(&self, eps: f64) -> f64 {
        (self.norm_squared() + eps * eps).sqrt()
    }

    pub fn norm_squared(&self) -> f64 {
        self.0.norm_squared()
    }

    pub fn normalised(&self) -> Self {
        self.normalised_eps(DEFAULT_EPS)
    }

    pub fn normalised_eps(&self, eps: f64) -> Self {
        *self / self.norm_eps(eps)
    }

    pub fn as_na(&self) -> &na::Vector4<f64> {
        &self.0
    }
}

// Shared operator and conversion impls. Both vector types wrap an nalgebra
// vector, so every operator forwards to the inner value.
macro_rules! impl_vector_ops {
    ($name:ident, $inner:ty, $n:literal) => {
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

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
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

            fn mul(self, v: $name) -> $name {
                $name(v.0 * self)
            }
        }

        impl Div<f64> for $name {
            type Output = Self;

            fn div(self, lambda: f64) -> Self {
                Self(self.0 / lambda)
            }
        }

        impl Index<usize> for $name {
            type Output = f64;

            fn index(&self, idx: usize) -> &f64 {
                &self.0[idx]
            }
        }

        impl From<$inner> for $name {
            fn from(v: $inner) -> Self {
                Self(v)
            }
        }

        impl From<$name> for $inner {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl From<[f64; $n]> for $name {
            fn from(v: [f64; $n]) -> Self {
                Self(<$inner>::from(v))
            }
        }

        impl From<$name> for [f64; $n] {
            fn from(v: $name) -> Self {
                v.0.into()
            }
        }
    };
}

impl_vector_ops!(Vector3, na::Vector3<f64>, 3);
impl_vector_ops!(Vector4, na::Vector4<f64>, 4);

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.x(), self.y(), self.z())
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}, {}>", self.x(), self.y(), self.z(), self.w())
    }
}
