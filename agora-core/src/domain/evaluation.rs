//! Evaluations — one participant's up/down rating of a post.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::vote::{Vote, VoteValue};

/// An up/down rating. Wire symbols are `'+'` and `'-'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Agree,
    Disagree,
}

impl Rating {
    /// Parse the single-character wire symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Agree),
            '-' => Some(Self::Disagree),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Agree => '+',
            Self::Disagree => '-',
        }
    }

    /// The matrix cell value this rating contributes.
    pub fn vote_value(&self) -> VoteValue {
        match self {
            Self::Agree => VoteValue::Agree,
            Self::Disagree => VoteValue::Disagree,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One evaluation record: `evaluator_id` rated `post_id`.
///
/// There is no explicit "pass" rating; unobserved cells only arise as
/// matrix gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub post_id: String,
    pub evaluator_id: String,
    pub rating: Rating,
}

impl Evaluation {
    /// Convert to an engine vote. The post is the topic.
    pub fn to_vote(&self) -> Vote {
        Vote {
            participant_id: self.evaluator_id.clone(),
            topic_id: self.post_id.clone(),
            value: self.rating.vote_value(),
        }
    }
}
