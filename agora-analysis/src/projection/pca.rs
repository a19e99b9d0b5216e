//! Covariance-based principal component projection.

use agora_core::errors::ProjectionError;
use nalgebra::{DMatrix, SymmetricEigen};

use crate::matrix::VoteMatrix;

/// Eigendecomposition convergence tolerance.
const EIGEN_EPS: f64 = 1e-10;
/// Maximum eigendecomposition iterations.
const EIGEN_MAX_ITER: usize = 250;

/// Project onto the first `dims` principal components of the centered
/// vote matrix.
///
/// The caller guarantees `dims <= min(rows, cols)`.
pub fn project(matrix: &VoteMatrix, dims: usize) -> Result<Vec<Vec<f64>>, ProjectionError> {
    let rows = matrix.participant_count();
    let cols = matrix.topic_count();

    // Column means, then center.
    let mut means = vec![0.0; cols];
    for p in 0..rows {
        for (t, mean) in means.iter_mut().enumerate() {
            *mean += matrix.value(p, t);
        }
    }
    for mean in &mut means {
        *mean /= rows as f64;
    }
    let centered = DMatrix::from_fn(rows, cols, |p, t| matrix.value(p, t) - means[t]);

    // Covariance of topics: (X^T X) / (n - 1).
    let denom = (rows as f64 - 1.0).max(1.0);
    let covariance = (centered.transpose() * &centered) * (1.0 / denom);

    let eigen = SymmetricEigen::try_new(covariance, EIGEN_EPS, EIGEN_MAX_ITER)
        .ok_or(ProjectionError::NonConvergence)?;

    // Component order: descending eigenvalue.
    let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut coords = vec![vec![0.0; dims]; rows];
    for (p, row) in coords.iter_mut().enumerate() {
        for (d, coord) in row.iter_mut().enumerate() {
            let component = order[d];
            let mut sum = 0.0;
            for t in 0..cols {
                sum += centered[(p, t)] * eigen.eigenvectors[(t, component)];
            }
            *coord = sum;
        }
    }

    if coords
        .iter()
        .flat_map(|row| row.iter())
        .any(|v| !v.is_finite())
    {
        return Err(ProjectionError::NonFinite);
    }

    Ok(coords)
}
