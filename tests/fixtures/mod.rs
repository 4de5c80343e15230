//! Store doubles for failure-path tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use team_dispatch::error::Result;
use team_dispatch::{
    AssignmentDecision, DispatchError, DispatchStore, FeedbackEvent, FeedbackType, Member,
    MemoryStore, UsageKind, WorkItem, WorkerSkillProfile,
};

/// Never completes a work-item read; drives the timeout/retry path.
#[derive(Default)]
pub struct StallingStore {
    pub work_item_calls: AtomicU32,
}

#[async_trait]
impl DispatchStore for StallingStore {
    async fn work_item(&self, _id: &str) -> Result<Option<WorkItem>> {
        self.work_item_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }

    async fn group_members(&self, _group_id: &str) -> Result<Vec<String>> {
        unreachable!("stalls before pool resolution")
    }

    async fn org_members(&self, _org_id: &str) -> Result<Vec<String>> {
        unreachable!("stalls before pool resolution")
    }

    async fn profiles(
        &self,
        _worker_ids: &[String],
        _skills: &[String],
    ) -> Result<Vec<WorkerSkillProfile>> {
        unreachable!("stalls before scoring")
    }

    async fn members(&self, _worker_ids: &[String]) -> Result<Vec<Member>> {
        unreachable!("stalls before scoring")
    }

    async fn in_flight_counts(&self, _worker_ids: &[String]) -> Result<HashMap<String, u32>> {
        unreachable!("stalls before scoring")
    }

    async fn record_decision(&self, _decision: &AssignmentDecision) -> Result<()> {
        unreachable!("stalls before any decision exists")
    }

    async fn decision(&self, _id: &Uuid) -> Result<Option<AssignmentDecision>> {
        unreachable!("stalls before any decision exists")
    }

    async fn append_feedback(&self, _events: &[FeedbackEvent]) -> Result<()> {
        unreachable!("no feedback in this fixture")
    }

    async fn apply_feedback(
        &self,
        _worker_id: &str,
        _feedback_type: FeedbackType,
        _skills: &[String],
    ) -> Result<()> {
        unreachable!("no feedback in this fixture")
    }

    async fn increment_usage(&self, _org_id: &str, _kind: UsageKind) -> Result<()> {
        unreachable!("no usage in this fixture")
    }
}

/// Delegates everything to an inner `MemoryStore` but refuses decision
/// writes; drives the `AuditWriteFailed` path.
#[derive(Default)]
pub struct FailingAuditStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl DispatchStore for FailingAuditStore {
    async fn work_item(&self, id: &str) -> Result<Option<WorkItem>> {
        self.inner.work_item(id).await
    }

    async fn group_members(&self, group_id: &str) -> Result<Vec<String>> {
        self.inner.group_members(group_id).await
    }

    async fn org_members(&self, org_id: &str) -> Result<Vec<String>> {
        self.inner.org_members(org_id).await
    }

    async fn profiles(
        &self,
        worker_ids: &[String],
        skills: &[String],
    ) -> Result<Vec<WorkerSkillProfile>> {
        self.inner.profiles(worker_ids, skills).await
    }

    async fn members(&self, worker_ids: &[String]) -> Result<Vec<Member>> {
        self.inner.members(worker_ids).await
    }

    async fn in_flight_counts(&self, worker_ids: &[String]) -> Result<HashMap<String, u32>> {
        self.inner.in_flight_counts(worker_ids).await
    }

    async fn record_decision(&self, _decision: &AssignmentDecision) -> Result<()> {
        Err(DispatchError::Store("audit volume is read-only".into()))
    }

    async fn decision(&self, id: &Uuid) -> Result<Option<AssignmentDecision>> {
        self.inner.decision(id).await
    }

    async fn append_feedback(&self, events: &[FeedbackEvent]) -> Result<()> {
        self.inner.append_feedback(events).await
    }

    async fn apply_feedback(
        &self,
        worker_id: &str,
        feedback_type: FeedbackType,
        skills: &[String],
    ) -> Result<()> {
        self.inner.apply_feedback(worker_id, feedback_type, skills).await
    }

    async fn increment_usage(&self, org_id: &str, kind: UsageKind) -> Result<()> {
        self.inner.increment_usage(org_id, kind).await
    }
}
