use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    TicketCompleted,
    TicketDeclined,
    TicketReassigned,
    ScrumFeedback,
    PeerFeedback,
}

impl FeedbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TicketCompleted => "ticket_completed",
            Self::TicketDeclined => "ticket_declined",
            Self::TicketReassigned => "ticket_reassigned",
            Self::ScrumFeedback => "scrum_feedback",
            Self::PeerFeedback => "peer_feedback",
        }
    }

    /// Suggested proficiency adjustment attached to events of this type.
    pub fn proficiency_delta(&self) -> i8 {
        match self {
            Self::TicketCompleted => 1,
            Self::TicketDeclined | Self::ScrumFeedback => -1,
            Self::TicketReassigned | Self::PeerFeedback => 0,
        }
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append-only record of a completion/decline/review signal for one skill.
/// Events are folded into `WorkerSkillProfile` aggregates independently of
/// assignment runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub worker_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_item_id: Option<String>,
    pub feedback_type: FeedbackType,
    pub skill: String,
    pub proficiency_delta: i8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl FeedbackEvent {
    pub fn new(
        worker_id: impl Into<String>,
        feedback_type: FeedbackType,
        skill: impl Into<String>,
    ) -> Self {
        Self {
            worker_id: worker_id.into(),
            work_item_id: None,
            feedback_type,
            skill: skill.into(),
            proficiency_delta: feedback_type.proficiency_delta(),
            notes: None,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_work_item(mut self, work_item_id: impl Into<String>) -> Self {
        self.work_item_id = Some(work_item_id.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
