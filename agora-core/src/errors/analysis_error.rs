//! Orchestrator-boundary analysis errors.

/// Unexpected pipeline failures, caught once at the orchestrator boundary
/// and converted to the empty result shape.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("stage output misaligned: {stage} produced {actual} rows for {expected} participants")]
    Misalignment {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
}
