//! Per-candidate component scoring: skill, interest, workload, experience.

mod weights;

pub use weights::{
    CRITICAL_WEIGHTS, HIGH_WEIGHTS, LEARNING_BONUS, MAX_SCORE, ROUTINE_WEIGHTS, WeightProfile,
};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{
    Candidate, Member, Priority, SeniorityTier, SkillMatch, SkillRequirement, WorkerSkillProfile,
};

pub const NEUTRAL_SCORE: f64 = 50.0;

const MAX_PROFICIENCY: f64 = 5.0;
const WORKLOAD_PENALTY: f64 = 20.0;
const LEARNING_INTEREST_BOOST: f64 = 20.0;
// Seniority base tops out at 5, tenure bonus at 1.
const EXPERIENCE_CEILING: f64 = 6.0;
const TENURE_CAP_MONTHS: f64 = 12.0;

/// Everything the scorer needs about one worker, assembled from the batched
/// store lookups. Missing profile rows and directory records fall back to
/// neutral defaults rather than erroring.
#[derive(Debug, Clone)]
pub struct WorkerSnapshot {
    pub worker_id: String,
    pub profiles: Vec<WorkerSkillProfile>,
    pub member: Option<Member>,
    pub in_flight: u32,
}

/// Scores candidates for one work item. Stateless between runs; safe to share
/// across the scoring fan-out.
pub struct CandidateScorer {
    requirements: Vec<SkillRequirement>,
    priority: Priority,
    as_of: DateTime<Utc>,
}

impl CandidateScorer {
    pub fn new(requirements: Vec<SkillRequirement>, priority: Priority) -> Self {
        Self {
            requirements,
            priority,
            as_of: Utc::now(),
        }
    }

    /// Pin the tenure reference point, mainly for deterministic tests.
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = as_of;
        self
    }

    pub fn score(&self, snapshot: &WorkerSnapshot) -> Candidate {
        let skill_matches = self.skill_matches(snapshot);
        let mut candidate = Candidate {
            worker_id: snapshot.worker_id.clone(),
            skill_score: self.skill_score(snapshot),
            interest_score: self.interest_score(snapshot),
            workload_score: workload_score(snapshot.in_flight),
            experience_score: self.experience_score(snapshot.member.as_ref()),
            total_score: 0.0,
            reasons: Vec::new(),
            skill_matches,
        };
        candidate.total_score =
            WeightProfile::for_priority(self.priority).total_for(&candidate, self.priority);
        candidate.reasons = self.reasons(&candidate, snapshot.in_flight);

        debug!(
            worker = %candidate.worker_id,
            skill = candidate.skill_score,
            interest = candidate.interest_score,
            workload = candidate.workload_score,
            experience = candidate.experience_score,
            total = candidate.total_score,
            "Candidate scored"
        );
        candidate
    }

    /// Weighted proficiency against each requirement, normalized to 0-100.
    /// Below-minimum proficiency earns a proportional partial credit.
    fn skill_score(&self, snapshot: &WorkerSnapshot) -> f64 {
        if self.requirements.is_empty() {
            return NEUTRAL_SCORE;
        }

        let mut earned = 0.0;
        let mut achievable = 0.0;
        for requirement in &self.requirements {
            let profile = self.profile_for(snapshot, &requirement.skill);
            let weight = requirement.importance.weight();
            let proficiency = f64::from(profile.proficiency);
            let min = f64::from(requirement.min_proficiency);

            // proficiency < min implies min >= 1, so the division is safe
            let contribution = if proficiency >= min {
                proficiency * weight
            } else {
                (proficiency / min) * weight
            };
            earned += contribution;
            achievable += MAX_PROFICIENCY * weight;
        }
        (earned / achievable) * 100.0
    }

    fn interest_score(&self, snapshot: &WorkerSnapshot) -> f64 {
        if self.requirements.is_empty() {
            return NEUTRAL_SCORE;
        }

        let sum: f64 = self
            .requirements
            .iter()
            .map(|requirement| {
                let profile = self.profile_for(snapshot, &requirement.skill);
                let mut score = profile.interest.base_score();
                if profile.wants_to_learn && profile.proficiency <= 2 {
                    score = (score + LEARNING_INTEREST_BOOST).min(MAX_SCORE);
                }
                score
            })
            .sum();
        sum / self.requirements.len() as f64
    }

    fn experience_score(&self, member: Option<&Member>) -> f64 {
        let (base, tenure_bonus) = match member {
            Some(member) => (
                member.seniority.base(),
                (member.months_in_org(self.as_of) / TENURE_CAP_MONTHS).min(1.0),
            ),
            None => (SeniorityTier::default().base(), 0.0),
        };
        ((base + tenure_bonus) / EXPERIENCE_CEILING) * 100.0
    }

    fn skill_matches(&self, snapshot: &WorkerSnapshot) -> Vec<SkillMatch> {
        self.requirements
            .iter()
            .map(|requirement| {
                let profile = self.profile_for(snapshot, &requirement.skill);
                SkillMatch {
                    skill: requirement.skill.clone(),
                    worker_level: profile.proficiency,
                    required_level: requirement.min_proficiency,
                    interest: profile.interest,
                    wants_to_learn: profile.wants_to_learn,
                }
            })
            .collect()
    }

    fn profile_for(&self, snapshot: &WorkerSnapshot, skill: &str) -> WorkerSkillProfile {
        snapshot
            .profiles
            .iter()
            .find(|p| p.skill == skill)
            .cloned()
            .unwrap_or_else(|| WorkerSkillProfile::neutral(&snapshot.worker_id, skill))
    }

    fn reasons(&self, candidate: &Candidate, in_flight: u32) -> Vec<String> {
        let mut reasons = Vec::new();

        if self.requirements.is_empty() {
            reasons.push("No specific skills required".to_string());
        } else if candidate.skill_score >= 80.0 {
            reasons.push(format!(
                "Strong skill match ({:.0}%)",
                candidate.skill_score
            ));
        } else if candidate.skill_score >= 50.0 {
            reasons.push(format!(
                "Moderate skill match ({:.0}%)",
                candidate.skill_score
            ));
        }

        if !self.requirements.is_empty() && candidate.interest_score >= 80.0 {
            reasons.push("High interest in the required skills".to_string());
        }
        if self.priority.is_growth_eligible() && candidate.is_learning_fit() {
            reasons.push("Learning opportunity: low proficiency, high interest".to_string());
        }

        if in_flight == 0 {
            reasons.push("No work currently in flight".to_string());
        } else if candidate.workload_score <= 40.0 {
            reasons.push(format!("Heavily loaded ({} items in flight)", in_flight));
        }

        if candidate.experience_score >= 80.0 {
            reasons.push("Senior experience profile".to_string());
        }
        reasons
    }
}

fn workload_score(in_flight: u32) -> f64 {
    (MAX_SCORE - WORKLOAD_PENALTY * f64::from(in_flight)).max(0.0)
}
