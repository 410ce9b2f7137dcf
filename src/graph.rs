use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::ir::{MeetingRecord, MeetingStatus};

/// Edges whose target starts within this window of "now" are flagged urgent.
const UPCOMING_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("meeting record at index {index} is missing an id")]
    MissingId { index: usize },
    #[error("duplicate meeting id `{id}`")]
    DuplicateId { id: String },
}

/// Elapsed time between a meeting and its successor, reported in the
/// coarsest whole unit. Negative counts mean the successor starts before
/// the source meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeGap {
    Days(i64),
    Hours(i64),
    SameDay,
}

impl fmt::Display for TimeGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days}d"),
            Self::Hours(hours) => write!(f, "{hours}h"),
            Self::SameDay => write!(f, "same day"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrokeWeight {
    Light,
    Medium,
    Heavy,
    Heaviest,
}

impl StrokeWeight {
    pub fn from_action_items(count: usize) -> Self {
        if count >= 5 {
            Self::Heaviest
        } else if count >= 3 {
            Self::Heavy
        } else if count >= 1 {
            Self::Medium
        } else {
            Self::Light
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
            Self::Heaviest => "heaviest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Improving,
    Declining,
    Neutral,
}

impl ColorClass {
    pub fn from_delta(delta: Option<i32>) -> Self {
        match delta {
            Some(delta) if delta > 0 => Self::Improving,
            Some(delta) if delta < 0 => Self::Declining,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MeetingNode {
    pub id: String,
    pub label: String,
    pub start_time: DateTime<Utc>,
    pub status: MeetingStatus,
    pub score: Option<i32>,
    pub people_count: usize,
}

#[derive(Debug, Clone)]
pub struct ConnectionEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub time_gap: TimeGap,
    pub score_delta: Option<i32>,
    pub action_item_count: usize,
    pub animated: bool,
    pub stroke_weight: StrokeWeight,
    pub color_class: ColorClass,
    pub source_status: MeetingStatus,
    pub target_status: MeetingStatus,
}

#[derive(Debug, Clone)]
pub struct MeetingGraph {
    pub nodes: Vec<MeetingNode>,
    pub edges: Vec<ConnectionEdge>,
}

/// Builds the meeting-relationship graph: one node per record in input
/// order, one edge per resolvable (meeting, successor-id) pair. Successor
/// references outside the current collection are dropped; a record without
/// an id (or sharing one) rejects the whole call.
///
/// `now` anchors the urgency window so repeated builds are reproducible.
pub fn build_graph(
    meetings: &[MeetingRecord],
    now: DateTime<Utc>,
) -> Result<MeetingGraph, GraphError> {
    let mut by_id: HashMap<&str, &MeetingRecord> = HashMap::with_capacity(meetings.len());
    for (index, meeting) in meetings.iter().enumerate() {
        if meeting.id.is_empty() {
            return Err(GraphError::MissingId { index });
        }
        if by_id.insert(meeting.id.as_str(), meeting).is_some() {
            return Err(GraphError::DuplicateId {
                id: meeting.id.clone(),
            });
        }
    }

    let nodes = meetings
        .iter()
        .map(|meeting| MeetingNode {
            id: meeting.id.clone(),
            label: meeting.name.clone(),
            start_time: meeting.start_time,
            status: meeting.status,
            score: meeting.coach_score,
            people_count: meeting.people.len(),
        })
        .collect();

    let mut edges = Vec::new();
    for meeting in meetings {
        for next_id in &meeting.next_connected_meetings {
            let Some(target) = by_id.get(next_id.as_str()) else {
                log::debug!(
                    "dropping edge {} -> {next_id}: successor not in current collection",
                    meeting.id
                );
                continue;
            };
            edges.push(derive_edge(meeting, target, now));
        }
    }

    Ok(MeetingGraph { nodes, edges })
}

fn derive_edge(
    source: &MeetingRecord,
    target: &MeetingRecord,
    now: DateTime<Utc>,
) -> ConnectionEdge {
    let score_delta = match (source.coach_score, target.coach_score) {
        (Some(from), Some(to)) => Some(to - from),
        _ => None,
    };
    let action_item_count = source.action_items.len();

    ConnectionEdge {
        id: format!("e-{}-{}", source.id, target.id),
        source: source.id.clone(),
        target: target.id.clone(),
        time_gap: time_gap(source.start_time, target.start_time),
        score_delta,
        action_item_count,
        animated: is_animated(source, target, now),
        stroke_weight: StrokeWeight::from_action_items(action_item_count),
        color_class: ColorClass::from_delta(score_delta),
        source_status: source.status,
        target_status: target.status,
    }
}

fn time_gap(source: DateTime<Utc>, target: DateTime<Utc>) -> TimeGap {
    let elapsed = target - source;
    let days = elapsed.num_days();
    if days != 0 {
        return TimeGap::Days(days);
    }
    let hours = elapsed.num_hours();
    if hours != 0 {
        return TimeGap::Hours(hours);
    }
    TimeGap::SameDay
}

// An in-progress endpoint always animates; only then does the
// upcoming-window check apply.
fn is_animated(source: &MeetingRecord, target: &MeetingRecord, now: DateTime<Utc>) -> bool {
    if source.status == MeetingStatus::InProgress || target.status == MeetingStatus::InProgress {
        return true;
    }
    let until_start = target.start_time - now;
    until_start > Duration::zero() && until_start <= Duration::hours(UPCOMING_WINDOW_HOURS)
}
