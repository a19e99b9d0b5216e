//! Clustering errors.

/// Errors that can occur while fitting one candidate clustering.
///
/// The model-order scan skips a failing candidate and continues; total
/// failure degrades to a single cluster.
#[derive(Debug, thiserror::Error)]
pub enum ClusteringError {
    #[error("invalid cluster count {requested} for {points} points")]
    InvalidClusterCount { requested: usize, points: usize },

    #[error("clustering input is empty")]
    EmptyInput,

    #[error("non-finite coordinates in clustering input")]
    NonFinite,
}
