use crate::domain::{Candidate, Priority};

/// Fixed weighting formula for one priority tier (skill, workload,
/// experience, interest). Coefficients always sum to 1.0. Recorded audit
/// history depends on these exact tables; they are constants, not config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightProfile {
    pub skill: f64,
    pub workload: f64,
    pub experience: f64,
    pub interest: f64,
}

pub const CRITICAL_WEIGHTS: WeightProfile = WeightProfile {
    skill: 0.70,
    workload: 0.20,
    experience: 0.10,
    interest: 0.00,
};

pub const HIGH_WEIGHTS: WeightProfile = WeightProfile {
    skill: 0.50,
    workload: 0.30,
    experience: 0.15,
    interest: 0.05,
};

/// Shared by Medium and Low priority.
pub const ROUTINE_WEIGHTS: WeightProfile = WeightProfile {
    skill: 0.40,
    workload: 0.25,
    experience: 0.10,
    interest: 0.25,
};

/// Flat bonus granted to learning-fit candidates on medium/low priority work.
pub const LEARNING_BONUS: f64 = 10.0;

pub const MAX_SCORE: f64 = 100.0;

impl WeightProfile {
    pub fn for_priority(priority: Priority) -> Self {
        match priority {
            Priority::Critical => CRITICAL_WEIGHTS,
            Priority::High => HIGH_WEIGHTS,
            Priority::Medium | Priority::Low => ROUTINE_WEIGHTS,
        }
    }

    pub fn sum(&self) -> f64 {
        self.skill + self.workload + self.experience + self.interest
    }

    /// Weighted, rounded total for one candidate. The learning bonus lands
    /// here, before ranking, so every qualifying candidate carries it into
    /// the sort rather than only the eventual winner.
    pub fn total_for(&self, candidate: &Candidate, priority: Priority) -> f64 {
        let weighted = self.skill * candidate.skill_score
            + self.workload * candidate.workload_score
            + self.experience * candidate.experience_score
            + self.interest * candidate.interest_score;
        let mut total = weighted.round();
        if priority.is_growth_eligible() && candidate.is_learning_fit() {
            total = (total + LEARNING_BONUS).min(MAX_SCORE);
        }
        total
    }
}
