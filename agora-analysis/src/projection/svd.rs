//! Singular-value-decomposition projection for sparse vote matrices.
//!
//! Takes the first `dims` left singular vectors of the raw (uncentered)
//! matrix as participant coordinates. On sparse rating data this avoids
//! the instability of a covariance projection.

use agora_core::errors::ProjectionError;
use nalgebra::{DMatrix, SVD};

use crate::matrix::VoteMatrix;

/// Decomposition convergence tolerance.
const SVD_EPS: f64 = 1e-10;
/// Maximum decomposition iterations.
const SVD_MAX_ITER: usize = 250;

/// Project via the left singular vectors of the vote matrix.
///
/// The caller guarantees `dims <= min(rows, cols)`.
pub fn project(matrix: &VoteMatrix, dims: usize) -> Result<Vec<Vec<f64>>, ProjectionError> {
    let rows = matrix.participant_count();
    let cols = matrix.topic_count();

    let data = DMatrix::from_fn(rows, cols, |p, t| matrix.value(p, t));
    let svd = SVD::try_new(data, true, false, SVD_EPS, SVD_MAX_ITER)
        .ok_or(ProjectionError::NonConvergence)?;
    let u = svd.u.as_ref().ok_or(ProjectionError::NonConvergence)?;

    // Column order: descending singular value.
    let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
    order.sort_by(|&a, &b| {
        svd.singular_values[b]
            .partial_cmp(&svd.singular_values[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if order.len() < dims {
        return Err(ProjectionError::Degenerate {
            rows,
            cols,
            dims,
        });
    }

    let mut coords = vec![vec![0.0; dims]; rows];
    for (p, row) in coords.iter_mut().enumerate() {
        for (d, coord) in row.iter_mut().enumerate() {
            *coord = u[(p, order[d])];
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
