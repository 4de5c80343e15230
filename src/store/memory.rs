//! In-memory store backing the test suite and lightweight embedders.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::DispatchStore;
use crate::domain::{
    AssignmentDecision, FeedbackEvent, FeedbackType, Member, OrgUsage, UsageKind, WorkItem,
    WorkerSkillProfile,
};
use crate::error::Result;

#[derive(Default)]
pub struct MemoryStore {
    work_items: RwLock<HashMap<String, WorkItem>>,
    groups: RwLock<HashMap<String, Vec<String>>>,
    orgs: RwLock<HashMap<String, Vec<String>>>,
    profiles: RwLock<HashMap<(String, String), WorkerSkillProfile>>,
    members: RwLock<HashMap<String, Member>>,
    in_flight: RwLock<HashMap<String, u32>>,
    decisions: RwLock<HashMap<Uuid, AssignmentDecision>>,
    feedback: RwLock<Vec<FeedbackEvent>>,
    usage: RwLock<HashMap<String, OrgUsage>>,
    call_counts: RwLock<HashMap<String, usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_work_item(&self, item: WorkItem) {
        self.work_items.write().insert(item.id.clone(), item);
    }

    pub fn insert_group(&self, group_id: &str, members: &[&str]) {
        self.groups.write().insert(
            group_id.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        );
    }

    pub fn insert_org(&self, org_id: &str, members: &[&str]) {
        self.orgs.write().insert(
            org_id.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        );
    }

    pub fn insert_profile(&self, profile: WorkerSkillProfile) {
        self.profiles.write().insert(
            (profile.worker_id.clone(), profile.skill.clone()),
            profile,
        );
    }

    pub fn insert_member(&self, member: Member) {
        self.members
            .write()
            .insert(member.worker_id.clone(), member);
    }

    pub fn set_in_flight(&self, worker_id: &str, count: u32) {
        self.in_flight.write().insert(worker_id.to_string(), count);
    }

    pub fn profile(&self, worker_id: &str, skill: &str) -> Option<WorkerSkillProfile> {
        self.profiles
            .read()
            .get(&(worker_id.to_string(), skill.to_string()))
            .cloned()
    }

    pub fn stored_decision(&self, id: &Uuid) -> Option<AssignmentDecision> {
        self.decisions.read().get(id).cloned()
    }

    pub fn decision_count(&self) -> usize {
        self.decisions.read().len()
    }

    pub fn feedback_events(&self) -> Vec<FeedbackEvent> {
        self.feedback.read().clone()
    }

    pub fn usage(&self, org_id: &str) -> OrgUsage {
        self.usage
            .read()
            .get(org_id)
            .cloned()
            .unwrap_or_else(|| OrgUsage::new(org_id))
    }

    /// How many times a store operation was invoked; used by tests to assert
    /// batching and the single-developer shortcut.
    pub fn call_count(&self, operation: &str) -> usize {
        self.call_counts
            .read()
            .get(operation)
            .copied()
            .unwrap_or(0)
    }

    fn record_call(&self, operation: &str) {
        *self
            .call_counts
            .write()
            .entry(operation.to_string())
            .or_insert(0) += 1;
    }
}

#[async_trait]
impl DispatchStore for MemoryStore {
    async fn work_item(&self, id: &str) -> Result<Option<WorkItem>> {
        self.record_call("work_item");
        Ok(self.work_items.read().get(id).cloned())
    }

    async fn group_members(&self, group_id: &str) -> Result<Vec<String>> {
        self.record_call("group_members");
        Ok(self.groups.read().get(group_id).cloned().unwrap_or_default())
    }

    async fn org_members(&self, org_id: &str) -> Result<Vec<String>> {
        self.record_call("org_members");
        Ok(self.orgs.read().get(org_id).cloned().unwrap_or_default())
    }

    async fn profiles(
        &self,
        worker_ids: &[String],
        skills: &[String],
    ) -> Result<Vec<WorkerSkillProfile>> {
        self.record_call("profiles");
        let profiles = self.profiles.read();
        Ok(profiles
            .values()
            .filter(|p| worker_ids.contains(&p.worker_id) && skills.contains(&p.skill))
            .cloned()
            .collect())
    }

    async fn members(&self, worker_ids: &[String]) -> Result<Vec<Member>> {
        self.record_call("members");
        let members = self.members.read();
        Ok(worker_ids
            .iter()
            .filter_map(|id| members.get(id).cloned())
            .collect())
    }

    async fn in_flight_counts(&self, worker_ids: &[String]) -> Result<HashMap<String, u32>> {
        self.record_call("in_flight_counts");
        let in_flight = self.in_flight.read();
        Ok(worker_ids
            .iter()
            .filter_map(|id| in_flight.get(id).map(|count| (id.clone(), *count)))
            .collect())
    }

    async fn record_decision(&self, decision: &AssignmentDecision) -> Result<()> {
        self.record_call("record_decision");
        self.decisions
            .write()
            .insert(decision.id, decision.clone());
        Ok(())
    }

    async fn decision(&self, id: &Uuid) -> Result<Option<AssignmentDecision>> {
        self.record_call("decision");
        Ok(self.decisions.read().get(id).cloned())
    }

    async fn append_feedback(&self, events: &[FeedbackEvent]) -> Result<()> {
        self.record_call("append_feedback");
        self.feedback.write().extend_from_slice(events);
        Ok(())
    }

    async fn apply_feedback(
        &self,
        worker_id: &str,
        feedback_type: FeedbackType,
        skills: &[String],
    ) -> Result<()> {
        self.record_call("apply_feedback");
        let now = Utc::now();
        let mut profiles = self.profiles.write();
        for skill in skills {
            let profile = profiles
                .entry((worker_id.to_string(), skill.clone()))
                .or_insert_with(|| WorkerSkillProfile::neutral(worker_id, skill));
            profile.apply_feedback(feedback_type, now);
        }
        Ok(())
    }

    async fn increment_usage(&self, org_id: &str, kind: UsageKind) -> Result<()> {
        self.record_call("increment_usage");
        self.usage
            .write()
            .entry(org_id.to_string())
            .or_insert_with(|| OrgUsage::new(org_id))
            .increment(kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_profiles_filters_by_worker_and_skill() {
        let store = MemoryStore::new();
        store.insert_profile(WorkerSkillProfile::neutral("w-1", "backend").with_proficiency(4));
        store.insert_profile(WorkerSkillProfile::neutral("w-1", "frontend").with_proficiency(2));
        store.insert_profile(WorkerSkillProfile::neutral("w-2", "backend").with_proficiency(3));

        let rows = store
            .profiles(&["w-1".to_string()], &["backend".to_string()])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].proficiency, 4);
    }

    #[tokio::test]
    async fn test_apply_feedback_creates_neutral_rows() {
        let store = MemoryStore::new();
        store
            .apply_feedback("w-1", FeedbackType::TicketCompleted, &["backend".to_string()])
            .await
            .unwrap();

        let profile = store.profile("w-1", "backend").unwrap();
        assert_eq!(profile.proficiency, 0);
        assert_eq!(profile.completed_count, 1);
    }

    #[tokio::test]
    async fn test_call_counts() {
        let store = MemoryStore::new();
        store.work_item("item-1").await.unwrap();
        store.work_item("item-2").await.unwrap();
        assert_eq!(store.call_count("work_item"), 2);
        assert_eq!(store.call_count("profiles"), 0);
    }
}
