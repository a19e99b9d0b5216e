//! Opinion-group clustering with automatic model-order selection.
//!
//! Candidate k runs from 2 to min(max_clusters, 2 + n/12, n); each
//! candidate is fitted with deterministic k-means and scored by the
//! between/within variance ratio. Ascending scan with strictly-greater
//! comparison, so the lowest k wins ties. Failures degrade to a single
//! cluster.

pub mod kmeans;
pub mod quality;

use crate::projection::Projection;
use tracing::debug;

pub use kmeans::KmeansFit;

/// Default ceiling on the candidate cluster count.
pub const DEFAULT_MAX_CLUSTERS: usize = 10;
/// Below this many participants everyone shares one group.
pub const MIN_CLUSTERABLE: usize = 3;
/// Each extra cluster beyond 2 requires this many more participants.
pub const PARTICIPANTS_PER_EXTRA_CLUSTER: usize = 12;

/// Dense cluster labels, one per participant, aligned with matrix rows.
///
/// Labels carry no ordering semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterAssignment {
    labels: Vec<usize>,
    cluster_count: usize,
}

impl ClusterAssignment {
    /// Number of participants.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label for one participant row.
    pub fn label(&self, participant: usize) -> usize {
        self.labels[participant]
    }

    /// All labels in row order.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of distinct clusters.
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Participant row indices belonging to `cluster`.
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == cluster)
            .map(|(i, _)| i)
            .collect()
    }

    fn single_cluster(n: usize) -> Self {
        Self {
            labels: vec![0; n],
            cluster_count: if n == 0 { 0 } else { 1 },
        }
    }
}

/// Partition projected participants into opinion groups.
pub fn cluster_participants(projection: &Projection, max_clusters: usize) -> ClusterAssignment {
    let n = projection.len();
    if n < MIN_CLUSTERABLE {
        return ClusterAssignment::single_cluster(n);
    }

    let ceiling = max_clusters
        .min(2 + n / PARTICIPANTS_PER_EXTRA_CLUSTER)
        .min(n);
    if ceiling < 2 {
        return ClusterAssignment::single_cluster(n);
    }

    let points = projection.coords();
    let mut best: Option<(usize, f64, KmeansFit)> = None;
    for k in 2..=ceiling {
        let fit = match kmeans::fit(points, k) {
            Ok(fit) => fit,
            Err(err) => {
                debug!(k, %err, "candidate clustering failed, skipping");
                continue;
            }
        };
        let score = quality::variance_ratio(points, &fit);
        // Strictly greater: the lowest k wins ties.
        if best.as_ref().map_or(true, |(_, best_score, _)| score > *best_score) {
            best = Some((k, score, fit));
        }
    }

    match best {
        Some((k, score, fit)) => {
            debug!(k, score, "selected cluster count");
            densify(fit.labels)
        }
        None => {
            debug!("all candidate clusterings failed, using a single cluster");
            ClusterAssignment::single_cluster(n)
        }
    }
}

/// Remap labels to dense 0..m in first-seen order.
fn densify(labels: Vec<usize>) -> ClusterAssignment {
    let mut remap: Vec<Option<usize>> = vec![None; labels.len().max(1)];
    let mut next = 0usize;
    let labels = labels
        .into_iter()
        .map(|label| {
            *remap[label].get_or_insert_with(|| {
                let dense = next;
                next += 1;
                dense
            })
        })
        .collect();
    ClusterAssignment {
        labels,
        cluster_count: next,
    }
}
