//! Box constraints of the search space.
//!
//! Bounds are supplied either as one scalar broadcast to every dimension or
//! as one value per dimension. [`Bounds::new`] normalizes both forms once;
//! everything downstream works on fixed-length arrays.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SSOError};

/// One side of the search box as given by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundSpec {
    /// Same value in every dimension.
    Scalar(f64),
    /// One value per dimension.
    PerDim(Vec<f64>),
}

impl BoundSpec {
    fn broadcast(&self, dim: usize, which: &'static str) -> Result<Array1<f64>> {
        match self {
            BoundSpec::Scalar(v) => Ok(Array1::from_elem(dim, *v)),
            BoundSpec::PerDim(values) => {
                if values.len() != dim {
                    return Err(SSOError::BoundsDimensionMismatch {
                        which,
                        expected: dim,
                        got: values.len(),
                    });
                }
                Ok(Array1::from(values.clone()))
            }
        }
    }
}

impl From<f64> for BoundSpec {
    fn from(v: f64) -> Self {
        BoundSpec::Scalar(v)
    }
}

impl From<Vec<f64>> for BoundSpec {
    fn from(v: Vec<f64>) -> Self {
        BoundSpec::PerDim(v)
    }
}

impl From<&[f64]> for BoundSpec {
    fn from(v: &[f64]) -> Self {
        BoundSpec::PerDim(v.to_vec())
    }
}

impl From<Array1<f64>> for BoundSpec {
    fn from(v: Array1<f64>) -> Self {
        BoundSpec::PerDim(v.to_vec())
    }
}

/// Normalized per-dimension lower/upper limits.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Array1<f64>,
    upper: Array1<f64>,
}

impl Bounds {
    /// Normalizes `lower` and `upper` to `dim` components each.
    ///
    /// # Errors
    ///
    /// Returns `SSOError::ZeroDimension` if `dim == 0`,
    /// `SSOError::BoundsDimensionMismatch` if a per-dimension spec has the wrong length,
    /// and `SSOError::InvalidBounds` if a pair is inverted or not finite.
    pub fn new(
        lower: impl Into<BoundSpec>,
        upper: impl Into<BoundSpec>,
        dim: usize,
    ) -> Result<Self> {
        if dim == 0 {
            return Err(SSOError::ZeroDimension);
        }
        let lower = lower.into().broadcast(dim, "lower")?;
        let upper = upper.into().broadcast(dim, "upper")?;
        Self::from_arrays(lower, upper)
    }

    /// Builds bounds from `(lower, upper)` pairs, one per dimension.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        if pairs.is_empty() {
            return Err(SSOError::ZeroDimension);
        }
        let lower = pairs.iter().map(|&(lo, _)| lo).collect::<Array1<f64>>();
        let upper = pairs.iter().map(|&(_, hi)| hi).collect::<Array1<f64>>();
        Self::from_arrays(lower, upper)
    }

    fn from_arrays(lower: Array1<f64>, upper: Array1<f64>) -> Result<Self> {
        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(SSOError::InvalidBounds {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    /// Lower limits.
    pub fn lower(&self) -> &Array1<f64> {
        &self.lower
    }

    /// Upper limits.
    pub fn upper(&self) -> &Array1<f64> {
        &self.upper
    }

    /// Width of dimension `j`.
    pub fn span(&self, j: usize) -> f64 {
        self.upper[j] - self.lower[j]
    }

    /// Clips `v` into dimension `j`.
    pub fn clamp_component(&self, j: usize, v: f64) -> f64 {
        v.clamp(self.lower[j], self.upper[j])
    }

    /// Clips every component of `x` in place.
    pub fn clamp(&self, x: &mut Array1<f64>) {
        for (j, xj) in x.iter_mut().enumerate() {
            *xj = self.clamp_component(j, *xj);
        }
    }

    /// `true` if `x` has `dim` components, all inside the box.
    pub fn contains(&self, x: &Array1<f64>) -> bool {
        x.len() == self.dim()
            && x
                .iter()
                .enumerate()
                .all(|(j, &xj)| xj >= self.lower[j] && xj <= self.upper[j])
    }

    /// Draws a uniform point inside the box, one draw per dimension in order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Array1<f64> {
        Array1::from_shape_fn(self.dim(), |j| {
            let u: f64 = rng.random::<f64>();
            self.lower[j] + u * self.span(j)
        })
    }
}
