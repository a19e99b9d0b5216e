//! Votes — the engine-facing (participant, topic, value) triple.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A vote value on the agree/disagree axis.
///
/// `Pass` is the fill value for matrix cells with no observed vote; it is
/// never persisted as an explicit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteValue {
    Agree,
    Pass,
    Disagree,
}

impl VoteValue {
    /// Numeric encoding used by the vote matrix: +1 / 0 / -1.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Agree => 1.0,
            Self::Pass => 0.0,
            Self::Disagree => -1.0,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Agree => "agree",
            Self::Pass => "pass",
            Self::Disagree => "disagree",
        }
    }
}

impl fmt::Display for VoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One observed vote. At most one vote per (participant, topic) pair is
/// considered; deduplication is the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub participant_id: String,
    pub topic_id: String,
    pub value: VoteValue,
}

impl Vote {
    pub fn new(participant_id: impl Into<String>, topic_id: impl Into<String>, value: VoteValue) -> Self {
        Self {
            participant_id: participant_id.into(),
            topic_id: topic_id.into(),
            value,
        }
    }
}
