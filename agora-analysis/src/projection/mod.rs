//! Dimensionality reduction — 3 strategies with automatic selection.
//!
//! Auto-selects based on matrix shape and sparsity:
//! - rows or cols < k → raw truncation/padding (degenerate low-data case)
//! - sparsity > 0.5 → SVD left singular vectors (covariance PCA is
//!   unstable on very sparse rating matrices)
//! - otherwise → covariance-based principal components
//!
//! Decomposition failures degrade to truncation; this stage never fails.

pub mod pca;
pub mod svd;

use crate::matrix::VoteMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Default number of projection dimensions.
pub const DEFAULT_DIMENSIONS: usize = 2;

/// Sparsity above which the SVD path is taken.
pub const SPARSITY_CUTOFF: f64 = 0.5;

/// Strategy that produced a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectionMethod {
    /// Covariance-based principal components.
    Covariance,
    /// Left singular vectors of the raw matrix.
    SingularValue,
    /// Raw rows truncated/padded to the target dimension.
    Truncation,
}

impl ProjectionMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Covariance => "covariance",
            Self::SingularValue => "singular_value",
            Self::Truncation => "truncation",
        }
    }
}

impl fmt::Display for ProjectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Low-dimensional participant coordinates, aligned with matrix rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    coords: Vec<Vec<f64>>,
    method: ProjectionMethod,
}

impl Projection {
    /// Number of participants (rows).
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// One participant's coordinates.
    pub fn row(&self, participant: usize) -> &[f64] {
        &self.coords[participant]
    }

    /// All coordinates, one row per participant.
    pub fn coords(&self) -> &[Vec<f64>] {
        &self.coords
    }

    /// Strategy that produced these coordinates.
    pub fn method(&self) -> ProjectionMethod {
        self.method
    }
}

/// Project the vote matrix to `dims` dimensions.
///
/// Always returns one row per matrix participant; quality degrades rather
/// than failing.
pub fn project(matrix: &VoteMatrix, dims: usize) -> Projection {
    let rows = matrix.participant_count();
    let cols = matrix.topic_count();

    if rows < dims || cols < dims {
        debug!(rows, cols, dims, "matrix smaller than target dimension, truncating");
        return truncate(matrix, dims);
    }

    let sparsity = matrix.sparsity();
    if sparsity > SPARSITY_CUTOFF {
        match svd::project(matrix, dims) {
            Ok(coords) => {
                debug!(sparsity, "projected via singular value decomposition");
                return Projection {
                    coords,
                    method: ProjectionMethod::SingularValue,
                };
            }
            Err(err) => {
                debug!(sparsity, %err, "SVD projection failed, truncating");
                return truncate(matrix, dims);
            }
        }
    }

    match pca::project(matrix, dims) {
        Ok(coords) => {
            debug!(sparsity, "projected via covariance principal components");
            Projection {
                coords,
                method: ProjectionMethod::Covariance,
            }
        }
        Err(err) => {
            debug!(sparsity, %err, "PCA projection failed, truncating");
            truncate(matrix, dims)
        }
    }
}

/// Degenerate fallback: raw vote rows truncated or zero-padded to `dims`.
fn truncate(matrix: &VoteMatrix, dims: usize) -> Projection {
    let coords = (0..matrix.participant_count())
        .map(|p| {
            let row = matrix.row(p);
            (0..dims).map(|d| row.get(d).copied().unwrap_or(0.0)).collect()
        })
        .collect();
    Projection {
        coords,
        method: ProjectionMethod::Truncation,
    }
}
