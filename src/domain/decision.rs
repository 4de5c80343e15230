use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentType {
    SkillMatch,
    InterestMatch,
    LearningOpportunity,
    WorkloadBalance,
    ExperienceBased,
    SingleDeveloper,
    ManualOverride,
}

impl AssignmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SkillMatch => "skill_match",
            Self::InterestMatch => "interest_match",
            Self::LearningOpportunity => "learning_opportunity",
            Self::WorkloadBalance => "workload_balance",
            Self::ExperienceBased => "experience_based",
            Self::SingleDeveloper => "single_developer",
            Self::ManualOverride => "manual_override",
        }
    }
}

impl fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of one assignment run: the winner, why, and the full ordered
/// candidate snapshot for later audit and override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentDecision {
    pub id: Uuid,
    pub work_item_id: String,
    pub org_id: String,
    pub worker_id: String,
    pub assignment_type: AssignmentType,
    pub score: f64,
    pub rationale: String,
    /// Candidates sorted descending by total score, ties in pool order.
    pub candidates: Vec<Candidate>,
    pub decided_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overridden_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_reason: Option<String>,
}

impl AssignmentDecision {
    pub fn new(
        work_item_id: impl Into<String>,
        org_id: impl Into<String>,
        worker_id: impl Into<String>,
        assignment_type: AssignmentType,
        score: f64,
        rationale: impl Into<String>,
        candidates: Vec<Candidate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            work_item_id: work_item_id.into(),
            org_id: org_id.into(),
            worker_id: worker_id.into(),
            assignment_type,
            score,
            rationale: rationale.into(),
            candidates,
            decided_at: Utc::now(),
            overridden_by: None,
            override_reason: None,
        }
    }

    /// Rewrite the decision as manually overridden. Original score and
    /// candidate snapshot stay untouched for audit.
    pub fn apply_override(&mut self, overridden_by: impl Into<String>, reason: impl Into<String>) {
        self.assignment_type = AssignmentType::ManualOverride;
        self.overridden_by = Some(overridden_by.into());
        self.override_reason = Some(reason.into());
    }
}
