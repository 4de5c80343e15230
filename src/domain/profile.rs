use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FeedbackType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestLevel {
    High,
    #[default]
    Medium,
    Low,
    None,
}

impl InterestLevel {
    pub fn base_score(&self) -> f64 {
        match self {
            Self::High => 100.0,
            Self::Medium => 60.0,
            Self::Low => 30.0,
            Self::None => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityTier {
    Owner,
    Admin,
    Lead,
    Senior,
    Standard,
    #[default]
    Member,
    Intern,
}

impl SeniorityTier {
    /// Tier base for the experience score, on the same 0-5 scale as proficiency.
    pub fn base(&self) -> f64 {
        match self {
            Self::Owner => 5.0,
            Self::Admin | Self::Lead | Self::Senior => 4.0,
            Self::Standard => 3.0,
            Self::Member => 2.0,
            Self::Intern => 1.0,
        }
    }
}

/// One worker's relationship to one skill, including the aggregate counters
/// maintained by the feedback loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerSkillProfile {
    pub worker_id: String,
    pub skill: String,
    /// Proficiency on the 0-5 scale.
    pub proficiency: u8,
    pub interest: InterestLevel,
    pub wants_to_learn: bool,
    #[serde(default)]
    pub completed_count: u32,
    #[serde(default)]
    pub declined_count: u32,
    #[serde(default)]
    pub positive_feedback: u32,
    #[serde(default)]
    pub negative_feedback: u32,
    pub last_assessed: DateTime<Utc>,
}

impl WorkerSkillProfile {
    /// Neutral fallback used when a worker has no recorded row for a skill:
    /// proficiency 0, medium interest, not flagged as wanting to learn.
    pub fn neutral(worker_id: impl Into<String>, skill: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            skill: skill.into(),
            proficiency: 0,
            interest: InterestLevel::default(),
            wants_to_learn: false,
            completed_count: 0,
            declined_count: 0,
            positive_feedback: 0,
            negative_feedback: 0,
            last_assessed: Utc::now(),
        }
    }

    pub fn with_proficiency(mut self, proficiency: u8) -> Self {
        self.proficiency = proficiency;
        self
    }

    pub fn with_interest(mut self, interest: InterestLevel) -> Self {
        self.interest = interest;
        self
    }

    pub fn with_wants_to_learn(mut self, wants_to_learn: bool) -> Self {
        self.wants_to_learn = wants_to_learn;
        self
    }

    /// Fold one feedback signal into the aggregate counters. Proficiency is
    /// never recomputed here; consumers fold deltas on their own schedule.
    pub fn apply_feedback(&mut self, feedback_type: FeedbackType, at: DateTime<Utc>) {
        match feedback_type {
            FeedbackType::TicketCompleted => self.completed_count += 1,
            FeedbackType::TicketDeclined => self.declined_count += 1,
            FeedbackType::ScrumFeedback => self.negative_feedback += 1,
            FeedbackType::PeerFeedback => self.positive_feedback += 1,
            FeedbackType::TicketReassigned => {}
        }
        self.last_assessed = at;
    }
}

/// Worker directory record consumed for experience scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub worker_id: String,
    pub seniority: SeniorityTier,
    pub joined_at: DateTime<Utc>,
}

const DAYS_PER_MONTH: f64 = 30.44;

impl Member {
    pub fn new(
        worker_id: impl Into<String>,
        seniority: SeniorityTier,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            worker_id: worker_id.into(),
            seniority,
            joined_at,
        }
    }

    pub fn months_in_org(&self, as_of: DateTime<Utc>) -> f64 {
        let days = (as_of - self.joined_at).num_days().max(0);
        days as f64 / DAYS_PER_MONTH
    }
}
