//! Error handling for Agora: one `thiserror` enum per subsystem.
//!
//! Insufficient data is never an error; it resolves to empty results at
//! the stage that detects it.

pub mod analysis_error;
pub mod clustering_error;
pub mod projection_error;

pub use analysis_error::AnalysisError;
pub use clustering_error::ClusteringError;
pub use projection_error::ProjectionError;
