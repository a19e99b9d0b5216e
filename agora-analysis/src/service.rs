//! EvaluationService — bridges domain records to the analysis pipeline.
//!
//! Filters to approved posts and their evaluations, enforces the
//! minimum-data policy, drives matrix → projection → clustering →
//! {representativeness, consensus} → selection, and joins numeric output
//! back onto posts. Stateless and freely constructible; every call is
//! independent.

use agora_core::config::EngineConfig;
use agora_core::domain::{Evaluation, Post, Rating, Vote};
use agora_core::errors::AnalysisError;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::clustering::{self, ClusterAssignment};
use crate::consensus;
use crate::matrix::VoteMatrix;
use crate::projection::{self, Projection};
use crate::representativeness::{self, RepresentativenessMap};
use crate::selection::{self, RepresentativeTopic, VoteDirection};

/// Minimum approved posts before analysis runs.
pub const MIN_APPROVED_POSTS: usize = 2;
/// Minimum distinct evaluators before analysis runs.
pub const MIN_PARTICIPANTS: usize = 2;
/// Minimum distinct evaluated topics before analysis runs.
pub const MIN_TOPICS: usize = 2;

/// Full pipeline output for one analysis run.
///
/// Exposes the intermediate artifacts (projection, cluster labels) for
/// callers that want to visualize grouping.
#[derive(Debug, Clone)]
pub struct VoteAnalysis {
    matrix: VoteMatrix,
    projection: Projection,
    assignment: ClusterAssignment,
    records: RepresentativenessMap,
    consensus: FxHashMap<String, f64>,
    representatives: FxHashMap<usize, Vec<RepresentativeTopic>>,
}

impl VoteAnalysis {
    pub fn matrix(&self) -> &VoteMatrix {
        &self.matrix
    }

    /// Low-dimensional participant coordinates, aligned with matrix rows.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Cluster label per participant, aligned with matrix rows.
    pub fn cluster_labels(&self) -> &[usize] {
        self.assignment.labels()
    }

    pub fn assignment(&self) -> &ClusterAssignment {
        &self.assignment
    }

    pub fn records(&self) -> &RepresentativenessMap {
        &self.records
    }

    /// Consensus score per topic id.
    pub fn consensus(&self) -> &FxHashMap<String, f64> {
        &self.consensus
    }

    /// Qualifying representative topics per cluster.
    pub fn representatives(&self) -> &FxHashMap<usize, Vec<RepresentativeTopic>> {
        &self.representatives
    }
}

/// One topic in the cross-group consensus ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusEntry {
    pub post_id: String,
    pub post: Post,
    pub consensus_score: f64,
    /// Agree share of the observed evaluations, shown to readers. This
    /// is not the smoothed probability.
    pub overall_agree_percentage: f64,
}

/// One group's representative comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepresentativeComment {
    pub post_id: String,
    pub post: Post,
    pub representativeness_score: f64,
    pub z_score: f64,
    pub p_value: f64,
    pub vote_type: VoteDirection,
    pub agree_ratio: f64,
    pub disagree_ratio: f64,
}

/// Representative comments for one opinion group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupComments {
    pub group_id: usize,
    pub comments: Vec<RepresentativeComment>,
}

/// Terminal result of one consensus analysis run.
///
/// Below-minimum data yields the empty shape; callers treat that as "not
/// enough data yet", never as an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsensusAnalysisResult {
    pub group_aware_consensus: Vec<ConsensusEntry>,
    pub group_representative_comments: Vec<GroupComments>,
}

impl ConsensusAnalysisResult {
    /// The defined non-error outcome for insufficient or failed analysis.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.group_aware_consensus.is_empty() && self.group_representative_comments.is_empty()
    }
}

/// The consensus analysis orchestrator.
#[derive(Debug, Clone, Default)]
pub struct EvaluationService {
    config: EngineConfig,
}

impl EvaluationService {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the raw vote pipeline.
    ///
    /// Returns `None` below the 2 × 2 matrix minimum, or when an internal
    /// invariant violation is caught (logged, never propagated).
    pub fn analyze_votes(&self, votes: &[Vote]) -> Option<VoteAnalysis> {
        match self.run_pipeline(votes) {
            Ok(analysis) => analysis,
            Err(err) => {
                error!(%err, "vote analysis failed");
                None
            }
        }
    }

    /// Run the full consensus analysis over domain records.
    ///
    /// Insufficient data, degraded numerics, and unexpected internal
    /// errors all resolve to the same empty result shape, so callers
    /// have exactly one outcome to handle.
    pub fn run_consensus_analysis(
        &self,
        evaluations: &[Evaluation],
        posts: &[Post],
    ) -> ConsensusAnalysisResult {
        let approved: FxHashMap<&str, &Post> = posts
            .iter()
            .filter(|post| post.is_approved())
            .map(|post| (post.id.as_str(), post))
            .collect();
        let qualifying: Vec<&Evaluation> = evaluations
            .iter()
            .filter(|eval| approved.contains_key(eval.post_id.as_str()))
            .collect();

        let participants: FxHashSet<&str> = qualifying
            .iter()
            .map(|eval| eval.evaluator_id.as_str())
            .collect();
        let topics: FxHashSet<&str> = qualifying
            .iter()
            .map(|eval| eval.post_id.as_str())
            .collect();

        if qualifying.len() < self.config.effective_min_evaluations()
            || approved.len() < MIN_APPROVED_POSTS
            || participants.len() < MIN_PARTICIPANTS
            || topics.len() < MIN_TOPICS
        {
            debug!(
                evaluations = qualifying.len(),
                approved_posts = approved.len(),
                participants = participants.len(),
                topics = topics.len(),
                "below minimum data volume, returning empty result"
            );
            return ConsensusAnalysisResult::empty();
        }

        let votes: Vec<Vote> = qualifying.iter().map(|eval| eval.to_vote()).collect();
        let analysis = match self.run_pipeline(&votes) {
            Ok(Some(analysis)) => analysis,
            Ok(None) => return ConsensusAnalysisResult::empty(),
            Err(err) => {
                error!(%err, "consensus analysis failed");
                return ConsensusAnalysisResult::empty();
            }
        };

        // Observed agree share per topic, for display.
        let mut tallies: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
        for eval in &qualifying {
            let tally = tallies.entry(eval.post_id.as_str()).or_insert((0, 0));
            tally.1 += 1;
            if eval.rating == Rating::Agree {
                tally.0 += 1;
            }
        }

        let mut ranked: Vec<(&String, f64)> = analysis
            .consensus
            .iter()
            .map(|(topic_id, &score)| (topic_id, score))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        let group_aware_consensus: Vec<ConsensusEntry> = ranked
            .into_iter()
            .filter_map(|(topic_id, score)| {
                let post = approved.get(topic_id.as_str())?;
                let (agrees, total) = tallies.get(topic_id.as_str()).copied().unwrap_or((0, 0));
                let overall_agree_percentage = if total == 0 {
                    0.0
                } else {
                    agrees as f64 / total as f64 * 100.0
                };
                Some(ConsensusEntry {
                    post_id: topic_id.clone(),
                    post: (*post).clone(),
                    consensus_score: score,
                    overall_agree_percentage,
                })
            })
            .take(self.config.effective_max_consensus_topics())
            .collect();

        let mut group_representative_comments: Vec<GroupComments> = analysis
            .representatives
            .iter()
            .map(|(&group_id, topics)| GroupComments {
                group_id,
                comments: topics
                    .iter()
                    .filter_map(|topic| {
                        let post = approved.get(topic.topic_id.as_str())?;
                        Some(RepresentativeComment {
                            post_id: topic.topic_id.clone(),
                            post: (*post).clone(),
                            representativeness_score: topic.score,
                            z_score: topic.z_score,
                            p_value: topic.p_value,
                            vote_type: topic.direction,
                            agree_ratio: topic.agree_ratio,
                            disagree_ratio: topic.disagree_ratio,
                        })
                    })
                    .collect(),
            })
            .collect();
        group_representative_comments.sort_by_key(|group| group.group_id);

        info!(
            consensus_topics = group_aware_consensus.len(),
            groups = group_representative_comments.len(),
            "consensus analysis complete"
        );

        ConsensusAnalysisResult {
            group_aware_consensus,
            group_representative_comments,
        }
    }

    fn run_pipeline(&self, votes: &[Vote]) -> Result<Option<VoteAnalysis>, AnalysisError> {
        let matrix = match VoteMatrix::from_votes(votes) {
            Some(matrix) => matrix,
            None => {
                debug!(votes = votes.len(), "too few participants or topics for a matrix");
                return Ok(None);
            }
        };
        debug!(
            participants = matrix.participant_count(),
            topics = matrix.topic_count(),
            sparsity = matrix.sparsity(),
            "vote matrix assembled"
        );

        let projection = projection::project(
            &matrix,
            self.config.effective_projection_dimensions(),
        );
        if projection.len() != matrix.participant_count() {
            return Err(AnalysisError::Misalignment {
                stage: "projection",
                expected: matrix.participant_count(),
                actual: projection.len(),
            });
        }

        let assignment =
            clustering::cluster_participants(&projection, self.config.effective_max_clusters());
        if assignment.len() != matrix.participant_count() {
            return Err(AnalysisError::Misalignment {
                stage: "clustering",
                expected: matrix.participant_count(),
                actual: assignment.len(),
            });
        }

        let records = representativeness::analyze(&matrix, &assignment);
        let consensus = consensus::group_aware_consensus(&matrix, &assignment);
        let representatives = selection::select_representatives(
            &records,
            assignment.cluster_count(),
            self.config.effective_significance_z(),
            self.config.effective_max_representatives(),
        );

        Ok(Some(VoteAnalysis {
            matrix,
            projection,
            assignment,
            records,
            consensus,
            representatives,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::domain::{ModerationStatus, VoteValue};
    use chrono::Utc;

    fn post(id: &str, status: ModerationStatus) -> Post {
        Post {
            id: id.to_string(),
            author_id: format!("author-{id}"),
            body: format!("post body {id}"),
            status,
            created_at: Utc::now(),
        }
    }

    fn eval(post_id: &str, evaluator_id: &str, rating: Rating) -> Evaluation {
        Evaluation {
            post_id: post_id.to_string(),
            evaluator_id: evaluator_id.to_string(),
            rating,
        }
    }

    /// Two opposed blocs of 6 evaluating three approved posts.
    fn bimodal_fixture() -> (Vec<Evaluation>, Vec<Post>) {
        let posts = vec![
            post("p1", ModerationStatus::Approved),
            post("p2", ModerationStatus::Approved),
            post("p3", ModerationStatus::Approved),
        ];
        let mut evaluations = Vec::new();
        for i in 0..6 {
            for id in ["p1", "p2", "p3"] {
                evaluations.push(eval(id, &format!("a{i}"), Rating::Agree));
                evaluations.push(eval(id, &format!("b{i}"), Rating::Disagree));
            }
        }
        (evaluations, posts)
    }

    #[test]
    fn test_four_evaluations_is_below_threshold() {
        let posts = vec![
            post("p1", ModerationStatus::Approved),
            post("p2", ModerationStatus::Approved),
            post("p3", ModerationStatus::Approved),
        ];
        let evaluations = vec![
            eval("p1", "u1", Rating::Agree),
            eval("p2", "u1", Rating::Disagree),
            eval("p1", "u2", Rating::Agree),
            eval("p3", "u2", Rating::Agree),
        ];
        let service = EvaluationService::default();
        let result = service.run_consensus_analysis(&evaluations, &posts);
        assert!(result.is_empty());
    }

    #[test]
    fn test_unapproved_evaluations_do_not_count() {
        // Six evaluations, but only four reference approved posts.
        let posts = vec![
            post("p1", ModerationStatus::Approved),
            post("p2", ModerationStatus::Approved),
            post("p3", ModerationStatus::Pending),
        ];
        let evaluations = vec![
            eval("p1", "u1", Rating::Agree),
            eval("p2", "u1", Rating::Disagree),
            eval("p1", "u2", Rating::Agree),
            eval("p2", "u2", Rating::Agree),
            eval("p3", "u1", Rating::Agree),
            eval("p3", "u2", Rating::Disagree),
        ];
        let service = EvaluationService::default();
        let result = service.run_consensus_analysis(&evaluations, &posts);
        assert!(result.is_empty());
    }

    #[test]
    fn test_bimodal_population_full_result() {
        let (evaluations, posts) = bimodal_fixture();
        let service = EvaluationService::default();
        let result = service.run_consensus_analysis(&evaluations, &posts);

        assert!(!result.group_aware_consensus.is_empty());
        assert!(result.group_aware_consensus.len() <= 3);
        for entry in &result.group_aware_consensus {
            assert!(entry.consensus_score > 0.0 && entry.consensus_score <= 1.0);
            // Every topic got 6 agrees of 12 evaluations.
            assert!((entry.overall_agree_percentage - 50.0).abs() < 1e-9);
            assert_eq!(entry.post.id, entry.post_id);
        }

        // Two opposed blocs: at least two groups, each with resolved posts.
        assert!(result.group_representative_comments.len() >= 2);
        for group in &result.group_representative_comments {
            for comment in &group.comments {
                assert_eq!(comment.post.id, comment.post_id);
                assert!(comment.representativeness_score > 0.0);
            }
        }
    }

    #[test]
    fn test_identical_runs_are_identical() {
        let (evaluations, posts) = bimodal_fixture();
        let service = EvaluationService::default();
        let first = service.run_consensus_analysis(&evaluations, &posts);
        let second = service.run_consensus_analysis(&evaluations, &posts);
        assert_eq!(first, second);
    }

    #[test]
    fn test_minimum_viable_analysis_via_vote_layer() {
        let votes = vec![
            Vote::new("u1", "t1", VoteValue::Agree),
            Vote::new("u1", "t2", VoteValue::Disagree),
            Vote::new("u2", "t1", VoteValue::Agree),
            Vote::new("u2", "t2", VoteValue::Agree),
        ];
        let service = EvaluationService::default();
        let analysis = service.analyze_votes(&votes).expect("2x2 meets the minimum");
        assert!(analysis.consensus().len() <= 2);
        assert_eq!(analysis.cluster_labels().len(), 2);
        assert_eq!(analysis.projection().len(), 2);
        // Everyone agreed on t1; it outranks the split t2.
        assert!(analysis.consensus()["t1"] > analysis.consensus()["t2"]);
    }

    #[test]
    fn test_single_participant_yields_none() {
        let votes = vec![
            Vote::new("u1", "t1", VoteValue::Agree),
            Vote::new("u1", "t2", VoteValue::Disagree),
        ];
        let service = EvaluationService::default();
        assert!(service.analyze_votes(&votes).is_none());
    }

    #[test]
    fn test_result_serializes() {
        let (evaluations, posts) = bimodal_fixture();
        let service = EvaluationService::default();
        let result = service.run_consensus_analysis(&evaluations, &posts);
        let json = serde_json::to_string(&result).unwrap();
        let back: ConsensusAnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_config_caps_apply() {
        let (evaluations, posts) = bimodal_fixture();
        let config = EngineConfig {
            max_consensus_topics: Some(1),
            ..EngineConfig::default()
        };
        let service = EvaluationService::new(config);
        let result = service.run_consensus_analysis(&evaluations, &posts);
        assert_eq!(result.group_aware_consensus.len(), 1);
    }
}
