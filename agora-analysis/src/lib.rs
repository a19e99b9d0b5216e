//! Opinion clustering and consensus detection for the Agora discussion
//! platform.
//!
//! Given a sparse participant × topic grid of agree/disagree votes, the
//! engine projects participants into a low-dimensional space, partitions
//! them into opinion groups, scores how distinctive each group's vote
//! pattern is per topic, and derives a cross-group consensus score per
//! topic. Pure, synchronous, and side-effect-free per invocation.

pub mod clustering;
pub mod consensus;
pub mod matrix;
pub mod projection;
pub mod representativeness;
pub mod selection;
pub mod service;
pub mod stats;

pub use matrix::VoteMatrix;
pub use projection::{Projection, ProjectionMethod};
pub use clustering::ClusterAssignment;
pub use representativeness::RepresentativenessRecord;
pub use selection::{RepresentativeTopic, VoteDirection};
pub use service::{
    ConsensusAnalysisResult, ConsensusEntry, EvaluationService, GroupComments,
    RepresentativeComment, VoteAnalysis,
};
