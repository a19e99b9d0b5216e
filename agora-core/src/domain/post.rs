//! Discussion posts. One approved post is one votable topic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Moderation state of a post. Only approved posts enter analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModerationStatus {
    /// Awaiting moderator review.
    Pending,
    /// Visible and votable.
    Approved,
    /// Rejected by a moderator.
    Rejected,
}

impl ModerationStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A discussion post on a stop or route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Stable post id (event id in the underlying protocol).
    pub id: String,
    /// Author's participant id.
    pub author_id: String,
    /// Post body as shown to readers.
    pub body: String,
    /// Moderation state.
    pub status: ModerationStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Whether this post participates in consensus analysis.
    pub fn is_approved(&self) -> bool {
        self.status == ModerationStatus::Approved
    }
}
