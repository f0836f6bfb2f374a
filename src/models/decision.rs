use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DecisionKind {
    Accepted,
    Rejected,
}

/// One committed swipe, emitted once per gesture or command
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Decision {
    pub track_id: String,
    pub kind: DecisionKind,
    pub recorded_at: DateTime<Utc>,
}

impl Decision {
    pub fn new(track_id: impl Into<String>, kind: DecisionKind) -> Self {
        Self {
            track_id: track_id.into(),
            kind,
            recorded_at: Utc::now(),
        }
    }

    pub fn is_accept(&self) -> bool {
        self.kind == DecisionKind::Accepted
    }
}
