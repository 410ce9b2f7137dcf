use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TopDown,
    LeftRight,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "TD" | "TB" => Some(Self::TopDown),
            "LR" => Some(Self::LeftRight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Default for MeetingStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

/// One meeting as the record supplier serializes it. Connection lists hold
/// meeting IDs; references outside the current collection are legal and are
/// resolved (or dropped) at graph-build time, never here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    pub id: String,
    pub name: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub status: MeetingStatus,
    /// Coach score on a 0-100 scale. Absent means "not scored yet".
    #[serde(default)]
    pub coach_score: Option<i32>,
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub previous_connected_meetings: Vec<String>,
    #[serde(default)]
    pub next_connected_meetings: Vec<String>,
}
