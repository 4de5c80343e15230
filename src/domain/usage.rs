use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageKind {
    Assignments,
    Overrides,
    FeedbackEvents,
}

/// Per-organization usage counters, fetched and incremented through the
/// storage interface so the engine itself stays stateless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgUsage {
    pub org_id: String,
    pub assignments: u64,
    pub overrides: u64,
    pub feedback_events: u64,
}

impl OrgUsage {
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            ..Self::default()
        }
    }

    pub fn increment(&mut self, kind: UsageKind) {
        match kind {
            UsageKind::Assignments => self.assignments += 1,
            UsageKind::Overrides => self.overrides += 1,
            UsageKind::FeedbackEvents => self.feedback_events += 1,
        }
    }
}
