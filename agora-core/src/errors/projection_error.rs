//! Projection errors.

/// Errors that can occur while projecting the vote matrix.
///
/// These never cross the projection stage boundary: the router converts
/// every failure into the raw-truncation fallback.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("decomposition did not converge")]
    NonConvergence,

    #[error("non-finite values in projected coordinates")]
    NonFinite,

    #[error("matrix too small for projection: {rows}x{cols}, need {dims} dimensions")]
    Degenerate { rows: usize, cols: usize, dims: usize },
}
