//! Representativeness analysis — how distinctive each group's vote
//! pattern is, per topic.
//!
//! For every (cluster, topic) pair the in-group agree/disagree proportions
//! are compared against everyone else with a two-proportion test; the
//! score rewards both a large ratio gap and statistical confidence:
//! `(in_ratio - out_ratio) * (1 - p)`. Both directions are stored; the
//! selector picks the stronger one downstream.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::clustering::ClusterAssignment;
use crate::matrix::VoteMatrix;
use crate::stats;

/// Representativeness metrics for one (cluster, topic) pair.
///
/// Ratios use the full group size as denominator: unvoted cells count,
/// since "did not vote" carries signal of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepresentativenessRecord {
    /// In-group fraction of +1 votes.
    pub agree_ratio: f64,
    /// In-group fraction of -1 votes.
    pub disagree_ratio: f64,
    /// Significance-adjusted agree-direction score.
    pub repness_agree: f64,
    /// Significance-adjusted disagree-direction score.
    pub repness_disagree: f64,
    /// Two-sided p-value for the agree-direction comparison.
    pub p_agree: f64,
    /// Two-sided p-value for the disagree-direction comparison.
    pub p_disagree: f64,
}

/// Per-(cluster, topic) representativeness records.
pub type RepresentativenessMap = FxHashMap<(usize, String), RepresentativenessRecord>;

/// Analyze every (cluster, topic) pair.
pub fn analyze(matrix: &VoteMatrix, assignment: &ClusterAssignment) -> RepresentativenessMap {
    let clusters: Vec<Vec<usize>> = (0..assignment.cluster_count())
        .map(|c| assignment.members(c))
        .collect();
    let total = matrix.participant_count();

    let entries: Vec<((usize, String), RepresentativenessRecord)> = (0..matrix.topic_count())
        .into_par_iter()
        .flat_map_iter(|topic| {
            let topic_id = matrix.topics()[topic].clone();
            clusters
                .iter()
                .enumerate()
                .map(move |(cluster, members)| {
                    let record = analyze_cell(matrix, members, total, topic);
                    ((cluster, topic_id.clone()), record)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    entries.into_iter().collect()
}

/// Compare one cluster's votes on one topic against everyone else's.
fn analyze_cell(
    matrix: &VoteMatrix,
    members: &[usize],
    total_participants: usize,
    topic: usize,
) -> RepresentativenessRecord {
    let mut in_agrees = 0usize;
    let mut in_disagrees = 0usize;
    for &p in members {
        let value = matrix.value(p, topic);
        if value > 0.0 {
            in_agrees += 1;
        } else if value < 0.0 {
            in_disagrees += 1;
        }
    }

    let mut all_agrees = 0usize;
    let mut all_disagrees = 0usize;
    for p in 0..total_participants {
        let value = matrix.value(p, topic);
        if value > 0.0 {
            all_agrees += 1;
        } else if value < 0.0 {
            all_disagrees += 1;
        }
    }

    let n_in = members.len();
    let n_out = total_participants - n_in;
    let out_agrees = all_agrees - in_agrees;
    let out_disagrees = all_disagrees - in_disagrees;

    let ratio = |count: usize, n: usize| if n == 0 { 0.0 } else { count as f64 / n as f64 };
    let agree_ratio = ratio(in_agrees, n_in);
    let disagree_ratio = ratio(in_disagrees, n_in);
    let out_agree_ratio = ratio(out_agrees, n_out);
    let out_disagree_ratio = ratio(out_disagrees, n_out);

    let agree_test = stats::compare_proportions(in_agrees, n_in, out_agrees, n_out);
    let disagree_test = stats::compare_proportions(in_disagrees, n_in, out_disagrees, n_out);

    RepresentativenessRecord {
        agree_ratio,
        disagree_ratio,
        repness_agree: (agree_ratio - out_agree_ratio) * (1.0 - agree_test.p_value),
        repness_disagree: (disagree_ratio - out_disagree_ratio) * (1.0 - disagree_test.p_value),
        p_agree: agree_test.p_value,
        p_disagree: disagree_test.p_value,
    }
}
