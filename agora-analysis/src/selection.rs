//! Representative comment selection — rank and truncate each group's
//! topics by representativeness.
//!
//! Per (cluster, topic) the stronger direction wins; its p-value converts
//! to an approximate z-score through the inverse normal CDF, and only
//! significant, positively-scored topics survive.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt;

use crate::representativeness::{RepresentativenessMap, RepresentativenessRecord};

/// Default significance threshold on the z scale (roughly p = 0.10
/// one-sided).
pub const DEFAULT_SIGNIFICANCE_Z: f64 = 1.28;
/// Default cap on representative topics per group.
pub const DEFAULT_MAX_PER_GROUP: usize = 5;

/// Direction of a representative topic's signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteDirection {
    Agree,
    Disagree,
}

impl VoteDirection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Agree => "agree",
            Self::Disagree => "disagree",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One topic that distinctly represents a group.
#[derive(Debug, Clone, PartialEq)]
pub struct RepresentativeTopic {
    pub topic_id: String,
    /// Significance-adjusted representativeness score.
    pub score: f64,
    /// Approximate z-score derived from the p-value.
    pub z_score: f64,
    pub p_value: f64,
    pub direction: VoteDirection,
    pub agree_ratio: f64,
    pub disagree_ratio: f64,
}

/// Select up to `max_per_group` representative topics per cluster.
///
/// Every cluster id in `0..cluster_count` appears in the output; groups
/// with nothing qualifying get an empty list.
pub fn select_representatives(
    records: &RepresentativenessMap,
    cluster_count: usize,
    significance_z: f64,
    max_per_group: usize,
) -> FxHashMap<usize, Vec<RepresentativeTopic>> {
    let mut by_cluster: FxHashMap<usize, Vec<RepresentativeTopic>> = (0..cluster_count)
        .map(|c| (c, Vec::new()))
        .collect();

    for ((cluster, topic_id), record) in records {
        if let Some(candidate) = qualify(topic_id, record, significance_z) {
            if let Some(list) = by_cluster.get_mut(cluster) {
                list.push(candidate);
            }
        }
    }

    for list in by_cluster.values_mut() {
        list.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.topic_id.cmp(&b.topic_id))
        });
        list.truncate(max_per_group);
    }

    by_cluster
}

/// Pick the stronger direction and apply the significance gate.
fn qualify(
    topic_id: &str,
    record: &RepresentativenessRecord,
    significance_z: f64,
) -> Option<RepresentativeTopic> {
    let (score, p_value, direction) = if record.repness_agree >= record.repness_disagree {
        (record.repness_agree, record.p_agree, VoteDirection::Agree)
    } else {
        (
            record.repness_disagree,
            record.p_disagree,
            VoteDirection::Disagree,
        )
    };

    let z_score = z_from_p(p_value)?;
    if z_score < significance_z || score <= 0.0 {
        return None;
    }

    Some(RepresentativeTopic {
        topic_id: topic_id.to_string(),
        score,
        z_score,
        p_value,
        direction,
        agree_ratio: record.agree_ratio,
        disagree_ratio: record.disagree_ratio,
    })
}

/// Approximate z-score for a p-value: Φ⁻¹(1 - p).
///
/// Calibrated so the default threshold 1.28 corresponds to p ≈ 0.10.
fn z_from_p(p_value: f64) -> Option<f64> {
    let clamped = p_value.clamp(1e-12, 1.0 - 1e-12);
    match Normal::new(0.0, 1.0) {
        Ok(normal) => {
            let z = normal.inverse_cdf(1.0 - clamped);
            z.is_finite().then_some(z)
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        repness_agree: f64,
        p_agree: f64,
        repness_disagree: f64,
        p_disagree: f64,
    ) -> RepresentativenessRecord {
        RepresentativenessRecord {
            agree_ratio: 0.8,
            disagree_ratio: 0.1,
            repness_agree,
            repness_disagree,
            p_agree,
            p_disagree,
        }
    }

    #[test]
    fn test_significant_topic_survives() {
        let mut records = RepresentativenessMap::default();
        records.insert((0, "t1".to_string()), record(0.7, 0.01, -0.7, 0.01));
        let selected = select_representatives(&records, 1, DEFAULT_SIGNIFICANCE_Z, 5);
        let list = &selected[&0];
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].topic_id, "t1");
        assert_eq!(list[0].direction, VoteDirection::Agree);
        assert!(list[0].z_score > 2.0);
    }

    #[test]
    fn test_insignificant_topic_filtered() {
        let mut records = RepresentativenessMap::default();
        // p = 0.5 → z ≈ 0: below any reasonable threshold.
        records.insert((0, "t1".to_string()), record(0.4, 0.5, -0.4, 0.5));
        let selected = select_representatives(&records, 1, DEFAULT_SIGNIFICANCE_Z, 5);
        assert!(selected[&0].is_empty());
    }

    #[test]
    fn test_negative_score_filtered() {
        let mut records = RepresentativenessMap::default();
        records.insert((0, "t1".to_string()), record(-0.2, 0.01, -0.5, 0.01));
        let selected = select_representatives(&records, 1, DEFAULT_SIGNIFICANCE_Z, 5);
        assert!(selected[&0].is_empty());
    }

    #[test]
    fn test_stronger_direction_wins() {
        let mut records = RepresentativenessMap::default();
        records.insert((0, "t1".to_string()), record(0.1, 0.8, 0.8, 0.01));
        let selected = select_representatives(&records, 1, DEFAULT_SIGNIFICANCE_Z, 5);
        let list = &selected[&0];
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].direction, VoteDirection::Disagree);
    }

    #[test]
    fn test_sorted_and_truncated() {
        let mut records = RepresentativenessMap::default();
        for (i, score) in [0.3, 0.9, 0.5, 0.7, 0.4, 0.8].iter().enumerate() {
            records.insert((0, format!("t{i}")), record(*score, 0.01, -1.0, 0.9));
        }
        let selected = select_representatives(&records, 1, DEFAULT_SIGNIFICANCE_Z, 3);
        let list = &selected[&0];
        assert_eq!(list.len(), 3);
        assert!(list[0].score >= list[1].score);
        assert!(list[1].score >= list[2].score);
        assert_eq!(list[0].topic_id, "t1");
    }

    #[test]
    fn test_every_cluster_gets_an_entry() {
        let records = RepresentativenessMap::default();
        let selected = select_representatives(&records, 3, DEFAULT_SIGNIFICANCE_Z, 5);
        assert_eq!(selected.len(), 3);
        assert!(selected.values().all(|list| list.is_empty()));
    }

    #[test]
    fn test_threshold_boundary() {
        let mut records = RepresentativenessMap::default();
        // p = 0.10 → z ≈ 1.2816, just above the 1.28 default.
        records.insert((0, "t1".to_string()), record(0.5, 0.10, -0.5, 0.9));
        // p = 0.20 → z ≈ 0.84, below it.
        records.insert((0, "t2".to_string()), record(0.5, 0.20, -0.5, 0.9));
        let selected = select_representatives(&records, 1, DEFAULT_SIGNIFICANCE_Z, 5);
        let list = &selected[&0];
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].topic_id, "t1");
    }
}
