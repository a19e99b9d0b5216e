//! Group-aware consensus — cross-group agreement scoring per topic.
//!
//! Each cluster contributes a Laplace-smoothed agreement probability over
//! its observed votes; the topic score is the product across clusters.
//! One disagreeing group drags the product down, so the score favors
//! topics agreed on independently by every opinion group rather than
//! merely globally popular ones.

use rustc_hash::FxHashMap;

use crate::clustering::ClusterAssignment;
use crate::matrix::VoteMatrix;

/// Uniform-prior smoothing: (agrees + 1) / (votes + 2).
///
/// Keeps every per-group probability strictly inside (0, 1), so products
/// never collapse to exactly 0 or reach exactly 1.
const SMOOTHING_SUCCESSES: f64 = 1.0;
const SMOOTHING_TOTAL: f64 = 2.0;

/// Smoothed agreement probability for one cluster on one topic, or `None`
/// when the cluster cast no votes on it.
fn cluster_agreement(matrix: &VoteMatrix, members: &[usize], topic: usize) -> Option<f64> {
    let mut agrees = 0usize;
    let mut voted = 0usize;
    for &p in members {
        let value = matrix.value(p, topic);
        if value > 0.0 {
            agrees += 1;
            voted += 1;
        } else if value < 0.0 {
            voted += 1;
        }
    }
    if voted == 0 {
        return None;
    }
    Some((agrees as f64 + SMOOTHING_SUCCESSES) / (voted as f64 + SMOOTHING_TOTAL))
}

/// Consensus score per topic id.
///
/// Clusters without votes on a topic are excluded from that topic's
/// product; a topic no cluster voted on is omitted entirely.
pub fn group_aware_consensus(
    matrix: &VoteMatrix,
    assignment: &ClusterAssignment,
) -> FxHashMap<String, f64> {
    let clusters: Vec<Vec<usize>> = (0..assignment.cluster_count())
        .map(|c| assignment.members(c))
        .collect();

    let mut scores = FxHashMap::default();
    for topic in 0..matrix.topic_count() {
        let mut product = 1.0;
        let mut contributing = 0usize;
        for members in &clusters {
            if let Some(probability) = cluster_agreement(matrix, members, topic) {
                product *= probability;
                contributing += 1;
            }
        }
        if contributing > 0 {
            scores.insert(matrix.topics()[topic].clone(), product);
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering;
    use crate::projection;
    use agora_core::domain::{Vote, VoteValue};

    fn analyze(votes: Vec<Vote>) -> (VoteMatrix, ClusterAssignment) {
        let matrix = VoteMatrix::from_votes(&votes).unwrap();
        let proj = projection::project(&matrix, 2);
        let assignment = clustering::cluster_participants(&proj, 10);
        (matrix, assignment)
    }

    #[test]
    fn test_unanimous_topic_scores_highest() {
        // Blocs split on t2/t3 but everyone agrees on t1.
        let mut votes = Vec::new();
        for i in 0..6 {
            votes.push(Vote::new(format!("a{i}"), "t1", VoteValue::Agree));
            votes.push(Vote::new(format!("b{i}"), "t1", VoteValue::Agree));
            for t in ["t2", "t3"] {
                votes.push(Vote::new(format!("a{i}"), t, VoteValue::Agree));
                votes.push(Vote::new(format!("b{i}"), t, VoteValue::Disagree));
            }
        }
        let (matrix, assignment) = analyze(votes);
        let scores = group_aware_consensus(&matrix, &assignment);
        let unanimous = scores["t1"];
        assert!(unanimous > scores["t2"]);
        assert!(unanimous > scores["t3"]);
    }

    #[test]
    fn test_scores_stay_in_open_unit_interval() {
        let mut votes = Vec::new();
        for i in 0..6 {
            for t in ["t1", "t2"] {
                votes.push(Vote::new(format!("a{i}"), t, VoteValue::Agree));
                votes.push(Vote::new(format!("b{i}"), t, VoteValue::Disagree));
            }
        }
        let (matrix, assignment) = analyze(votes);
        let scores = group_aware_consensus(&matrix, &assignment);
        for score in scores.values() {
            assert!(*score > 0.0);
            assert!(*score < 1.0);
        }
    }

    #[test]
    fn test_smoothed_product_value() {
        // Two clusters of 3, all agreeing on t1: (4/5) * (4/5) = 0.64.
        let mut votes = Vec::new();
        for i in 0..3 {
            votes.push(Vote::new(format!("a{i}"), "t1", VoteValue::Agree));
            votes.push(Vote::new(format!("b{i}"), "t1", VoteValue::Agree));
            // Split on t2 so two clusters form.
            votes.push(Vote::new(format!("a{i}"), "t2", VoteValue::Agree));
            votes.push(Vote::new(format!("b{i}"), "t2", VoteValue::Disagree));
        }
        let (matrix, assignment) = analyze(votes);
        assert_eq!(assignment.cluster_count(), 2);
        let scores = group_aware_consensus(&matrix, &assignment);
        assert!((scores["t1"] - 0.64).abs() < 1e-9);
    }

    #[test]
    fn test_abstaining_cluster_is_excluded() {
        // Bloc b never votes on t3; t3's score is bloc a's smoothed
        // probability alone.
        let mut votes = Vec::new();
        for i in 0..6 {
            for t in ["t1", "t2"] {
                votes.push(Vote::new(format!("a{i}"), t, VoteValue::Agree));
                votes.push(Vote::new(format!("b{i}"), t, VoteValue::Disagree));
            }
            votes.push(Vote::new(format!("a{i}"), "t3", VoteValue::Agree));
        }
        let (matrix, assignment) = analyze(votes);
        assert_eq!(assignment.cluster_count(), 2);
        let scores = group_aware_consensus(&matrix, &assignment);
        // 6 agree votes, smoothed: 7/8.
        assert!((scores["t3"] - 7.0 / 8.0).abs() < 1e-9);
    }
}
