use serde::{Deserialize, Serialize};

use super::InterestLevel;

/// Per-skill detail of how a worker measured against one requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub worker_level: u8,
    pub required_level: u8,
    pub interest: InterestLevel,
    pub wants_to_learn: bool,
}

impl SkillMatch {
    /// Low proficiency, eager to learn, high interest: the pattern that earns
    /// the learning-opportunity bonus on medium/low priority work.
    pub fn is_learning_fit(&self) -> bool {
        self.worker_level <= 2 && self.wants_to_learn && self.interest == InterestLevel::High
    }
}

/// One scored worker within a single assignment run. Candidates are ephemeral:
/// they exist only inside the run that produced them and in the decision's
/// audit snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub worker_id: String,
    pub skill_score: f64,
    pub interest_score: f64,
    pub workload_score: f64,
    pub experience_score: f64,
    pub total_score: f64,
    pub reasons: Vec<String>,
    pub skill_matches: Vec<SkillMatch>,
}

impl Candidate {
    pub fn is_learning_fit(&self) -> bool {
        self.skill_matches.iter().any(SkillMatch::is_learning_fit)
    }

    /// Direct-assignment snapshot for a pool of one. No scoring runs; the
    /// single entry keeps the decision's candidate list invariant intact.
    pub fn sole(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            total_score: 100.0,
            reasons: vec!["Only developer in the eligible pool".to_string()],
            ..Self::default()
        }
    }
}
