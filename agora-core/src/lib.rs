//! Core types, errors, config, and tracing setup for the Agora consensus engine.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;

pub use config::EngineConfig;
pub use domain::{Evaluation, ModerationStatus, Post, Rating, Vote, VoteValue};
pub use errors::{AnalysisError, ClusteringError, ProjectionError};
