//! Vote matrix assembly — dense participant × topic grid.
//!
//! Ids keep first-seen order from the vote stream; cluster labels and
//! projection rows are positionally aligned to that order for the whole
//! analysis run.

use agora_core::domain::Vote;
use rustc_hash::FxHashMap;

/// Minimum distinct participants for an analyzable matrix.
pub const MIN_PARTICIPANTS: usize = 2;
/// Minimum distinct topics for an analyzable matrix.
pub const MIN_TOPICS: usize = 2;

/// Dense participant × topic grid of {-1.0, 0.0, +1.0}.
///
/// Zero means "no observed vote".
#[derive(Debug, Clone, PartialEq)]
pub struct VoteMatrix {
    participants: Vec<String>,
    topics: Vec<String>,
    /// Row-major: `values[participant][topic]`.
    values: Vec<Vec<f64>>,
}

impl VoteMatrix {
    /// Build a matrix from observed votes.
    ///
    /// Returns `None` below the 2 × 2 minimum, the designated
    /// "insufficient data" signal. For duplicate (participant, topic)
    /// pairs the last vote wins; deduplication is the caller's
    /// responsibility.
    pub fn from_votes(votes: &[Vote]) -> Option<Self> {
        let mut participant_index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut topic_index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut participants = Vec::new();
        let mut topics = Vec::new();

        for vote in votes {
            participant_index
                .entry(vote.participant_id.as_str())
                .or_insert_with(|| {
                    participants.push(vote.participant_id.clone());
                    participants.len() - 1
                });
            topic_index.entry(vote.topic_id.as_str()).or_insert_with(|| {
                topics.push(vote.topic_id.clone());
                topics.len() - 1
            });
        }

        if participants.len() < MIN_PARTICIPANTS || topics.len() < MIN_TOPICS {
            return None;
        }

        let mut values = vec![vec![0.0; topics.len()]; participants.len()];
        for vote in votes {
            let row = participant_index[vote.participant_id.as_str()];
            let col = topic_index[vote.topic_id.as_str()];
            values[row][col] = vote.value.as_f64();
        }

        Some(Self {
            participants,
            topics,
            values,
        })
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Participant ids in row order.
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Topic ids in column order.
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Cell value for `(participant row, topic column)`.
    pub fn value(&self, participant: usize, topic: usize) -> f64 {
        self.values[participant][topic]
    }

    /// One participant's full vote row.
    pub fn row(&self, participant: usize) -> &[f64] {
        &self.values[participant]
    }

    /// Fraction of zero cells.
    pub fn sparsity(&self) -> f64 {
        let total = self.participants.len() * self.topics.len();
        if total == 0 {
            return 0.0;
        }
        let zeros = self
            .values
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&v| v == 0.0)
            .count();
        zeros as f64 / total as f64
    }
}
