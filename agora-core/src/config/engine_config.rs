//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the consensus engine.
///
/// All fields are optional; `effective_*()` accessors resolve defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Target projection dimensions. Default: 2.
    pub projection_dimensions: Option<usize>,
    /// Maximum candidate cluster count. Default: 10.
    pub max_clusters: Option<usize>,
    /// Significance threshold on the z scale for representative comments.
    /// Default: 1.28 (roughly p = 0.10 one-sided).
    pub significance_z: Option<f64>,
    /// Maximum representative comments per group. Default: 5.
    pub max_representatives: Option<usize>,
    /// Minimum qualifying evaluations before analysis runs. Default: 5.
    pub min_evaluations: Option<usize>,
    /// Maximum consensus topics returned. Default: 10.
    pub max_consensus_topics: Option<usize>,
}

impl EngineConfig {
    /// Parse from a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Returns the effective projection dimensionality, defaulting to 2.
    pub fn effective_projection_dimensions(&self) -> usize {
        self.projection_dimensions.unwrap_or(2)
    }

    /// Returns the effective maximum cluster count, defaulting to 10.
    pub fn effective_max_clusters(&self) -> usize {
        self.max_clusters.unwrap_or(10)
    }

    /// Returns the effective significance threshold, defaulting to 1.28.
    pub fn effective_significance_z(&self) -> f64 {
        self.significance_z.unwrap_or(1.28)
    }

    /// Returns the effective per-group comment cap, defaulting to 5.
    pub fn effective_max_representatives(&self) -> usize {
        self.max_representatives.unwrap_or(5)
    }

    /// Returns the effective minimum evaluation count, defaulting to 5.
    pub fn effective_min_evaluations(&self) -> usize {
        self.min_evaluations.unwrap_or(5)
    }

    /// Returns the effective consensus topic cap, defaulting to 10.
    pub fn effective_max_consensus_topics(&self) -> usize {
        self.max_consensus_topics.unwrap_or(10)
    }
}
