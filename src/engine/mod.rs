//! Assignment orchestration: resolve the pool and requirements, fan out
//! candidate scoring, rank, classify, and build the decision.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::capability::CapabilityExtractor;
use crate::config::DispatchConfig;
use crate::domain::{
    AssignmentDecision, AssignmentType, Candidate, Member, Priority, SkillRequirement, WorkItem,
    WorkerSkillProfile,
};
use crate::error::{DispatchError, Result};
use crate::scoring::{CandidateScorer, WorkerSnapshot};
use crate::store::{DispatchStore, read_with_retry};

pub struct AssignmentEngine {
    store: Arc<dyn DispatchStore>,
    extractor: CapabilityExtractor,
    config: DispatchConfig,
    scoring_semaphore: Arc<Semaphore>,
}

impl AssignmentEngine {
    pub fn new(store: Arc<dyn DispatchStore>, config: DispatchConfig) -> Self {
        let permits = config.scoring.max_concurrent_scoring.max(1);
        Self {
            store,
            extractor: CapabilityExtractor::default(),
            config,
            scoring_semaphore: Arc::new(Semaphore::new(permits)),
        }
    }

    pub fn with_extractor(mut self, extractor: CapabilityExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Select the best worker for a work item from the group's eligible pool.
    ///
    /// The decision is computed fully in memory and returned without being
    /// persisted; recording it is the `AuditRecorder`'s separate step, so a
    /// cancelled caller never leaves partial state behind.
    pub async fn assign(
        &self,
        work_item_id: &str,
        group_id: &str,
        org_id: &str,
    ) -> Result<AssignmentDecision> {
        let item = read_with_retry(&self.config.store, "work_item", || {
            self.store.work_item(work_item_id)
        })
        .await?
        .ok_or_else(|| DispatchError::ItemNotFound(work_item_id.to_string()))?;

        let pool = self.resolve_pool(group_id, org_id).await?;
        let requirements = self.extractor.requirements_for(&item);
        debug!(
            item = %item.id,
            priority = %item.priority,
            pool_size = pool.len(),
            requirements = requirements.len(),
            "Assignment inputs resolved"
        );

        if let [only] = pool.as_slice() {
            return Ok(self.direct_assignment(&item, org_id, only.clone()));
        }

        let snapshots = self.fetch_snapshots(&pool, &requirements).await?;
        let candidates = self
            .score_all(snapshots, requirements.clone(), item.priority)
            .await;
        self.rank_and_decide(&item, org_id, &requirements, candidates)
    }

    /// Group members, widening to the whole organization when the group is
    /// empty.
    async fn resolve_pool(&self, group_id: &str, org_id: &str) -> Result<Vec<String>> {
        let members = read_with_retry(&self.config.store, "group_members", || {
            self.store.group_members(group_id)
        })
        .await?;
        if !members.is_empty() {
            return Ok(members);
        }

        debug!(group = group_id, "Delivery group empty, widening to organization");
        let members = read_with_retry(&self.config.store, "org_members", || {
            self.store.org_members(org_id)
        })
        .await?;
        if members.is_empty() {
            return Err(DispatchError::EmptyPool {
                group_id: group_id.to_string(),
                org_id: org_id.to_string(),
            });
        }
        Ok(members)
    }

    /// One batched store call per data kind for the whole pool.
    async fn fetch_snapshots(
        &self,
        pool: &[String],
        requirements: &[SkillRequirement],
    ) -> Result<Vec<WorkerSnapshot>> {
        let skills: Vec<String> = requirements.iter().map(|r| r.skill.clone()).collect();

        let profiles = read_with_retry(&self.config.store, "profiles", || {
            self.store.profiles(pool, &skills)
        })
        .await?;
        let members = read_with_retry(&self.config.store, "members", || {
            self.store.members(pool)
        })
        .await?;
        let in_flight = read_with_retry(&self.config.store, "in_flight_counts", || {
            self.store.in_flight_counts(pool)
        })
        .await?;

        let mut profiles_by_worker: HashMap<String, Vec<WorkerSkillProfile>> = HashMap::new();
        for profile in profiles {
            profiles_by_worker
                .entry(profile.worker_id.clone())
                .or_default()
                .push(profile);
        }
        let mut members_by_id: HashMap<String, Member> = members
            .into_iter()
            .map(|m| (m.worker_id.clone(), m))
            .collect();

        Ok(pool
            .iter()
            .map(|worker_id| WorkerSnapshot {
                worker_id: worker_id.clone(),
                profiles: profiles_by_worker.remove(worker_id).unwrap_or_default(),
                member: members_by_id.remove(worker_id),
                in_flight: in_flight.get(worker_id).copied().unwrap_or(0),
            })
            .collect())
    }

    /// Score candidates concurrently under the configured bound. `join_all`
    /// returns results in input order, which keeps the tie-break stable on
    /// pool enumeration order.
    async fn score_all(
        &self,
        snapshots: Vec<WorkerSnapshot>,
        requirements: Vec<SkillRequirement>,
        priority: Priority,
    ) -> Vec<Candidate> {
        let scorer = Arc::new(CandidateScorer::new(requirements, priority));
        let futures: Vec<_> = snapshots
            .into_iter()
            .map(|snapshot| {
                let scorer = Arc::clone(&scorer);
                let semaphore = Arc::clone(&self.scoring_semaphore);
                async move {
                    let _permit = semaphore.acquire().await.expect("semaphore closed");
                    scorer.score(&snapshot)
                }
            })
            .collect();
        join_all(futures).await
    }

    fn rank_and_decide(
        &self,
        item: &WorkItem,
        org_id: &str,
        requirements: &[SkillRequirement],
        mut candidates: Vec<Candidate>,
    ) -> Result<AssignmentDecision> {
        if candidates.is_empty() {
            return Err(DispatchError::NoDevelopersAvailable(item.id.clone()));
        }

        // stable sort: equal totals keep pool enumeration order
        candidates.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let winner = candidates[0].clone();
        let assignment_type = classify(&winner, requirements, item.priority);
        let rationale = rationale_for(&winner);
        info!(
            item = %item.id,
            winner = %winner.worker_id,
            assignment_type = %assignment_type,
            score = winner.total_score,
            "Work item assigned"
        );

        Ok(AssignmentDecision::new(
            item.id.clone(),
            org_id,
            winner.worker_id.clone(),
            assignment_type,
            winner.total_score,
            rationale,
            candidates,
        ))
    }

    fn direct_assignment(
        &self,
        item: &WorkItem,
        org_id: &str,
        worker_id: String,
    ) -> AssignmentDecision {
        info!(item = %item.id, worker = %worker_id, "Single developer in pool, assigning directly");
        let rationale = format!(
            "Assigned to {}: only developer in the eligible pool",
            worker_id
        );
        AssignmentDecision::new(
            item.id.clone(),
            org_id,
            worker_id.clone(),
            AssignmentType::SingleDeveloper,
            100.0,
            rationale,
            vec![Candidate::sole(worker_id)],
        )
    }
}

/// Why the winner won. The learning-opportunity classification mirrors the
/// bonus predicate so a decision never reports a pattern the score ignored.
fn classify(
    winner: &Candidate,
    requirements: &[SkillRequirement],
    priority: Priority,
) -> AssignmentType {
    if requirements.is_empty() {
        if winner.workload_score > winner.experience_score {
            AssignmentType::WorkloadBalance
        } else {
            AssignmentType::ExperienceBased
        }
    } else if priority.is_growth_eligible() && winner.is_learning_fit() {
        AssignmentType::LearningOpportunity
    } else if winner.interest_score > winner.skill_score {
        AssignmentType::InterestMatch
    } else {
        AssignmentType::SkillMatch
    }
}

fn rationale_for(winner: &Candidate) -> String {
    format!(
        "Assigned to {} with total score {:.0} (skill {:.0}%, interest {:.0}%, workload {:.0}%, experience {:.0}%)",
        winner.worker_id,
        winner.total_score,
        winner.skill_score,
        winner.interest_score,
        winner.workload_score,
        winner.experience_score
    )
}
