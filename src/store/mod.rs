//! Storage-client interface consumed by the engine.
//!
//! One trait, injected by the caller; the engine never branches on which
//! concrete backend is active. Reads during an assignment run go through
//! [`read_with_retry`]: fixed timeout, at most one retry, then
//! `AssignmentUnavailable`.

mod memory;

pub use memory::MemoryStore;

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::domain::{
    AssignmentDecision, FeedbackEvent, FeedbackType, Member, UsageKind, WorkItem,
    WorkerSkillProfile,
};
use crate::error::{DispatchError, Result};

#[async_trait]
pub trait DispatchStore: Send + Sync {
    async fn work_item(&self, id: &str) -> Result<Option<WorkItem>>;

    /// Worker ids of a delivery group, in stable enumeration order. That
    /// order is the tie-break for equal candidate totals.
    async fn group_members(&self, group_id: &str) -> Result<Vec<String>>;

    /// Fallback pool: all workers of the organization.
    async fn org_members(&self, org_id: &str) -> Result<Vec<String>>;

    /// Batched profile fetch for a whole pool; one call per assignment run.
    /// Workers without rows are simply absent from the result.
    async fn profiles(
        &self,
        worker_ids: &[String],
        skills: &[String],
    ) -> Result<Vec<WorkerSkillProfile>>;

    /// Batched directory lookup for experience scoring.
    async fn members(&self, worker_ids: &[String]) -> Result<Vec<Member>>;

    /// Batched in-flight item counts. Missing workers count as zero.
    async fn in_flight_counts(&self, worker_ids: &[String]) -> Result<HashMap<String, u32>>;

    /// Persist a decision with its full candidate snapshot. Also used to
    /// rewrite a decision after a manual override.
    async fn record_decision(&self, decision: &AssignmentDecision) -> Result<()>;

    async fn decision(&self, id: &Uuid) -> Result<Option<AssignmentDecision>>;

    async fn append_feedback(&self, events: &[FeedbackEvent]) -> Result<()>;

    /// Fold one feedback signal into the worker's aggregate counters for the
    /// given skills (see `WorkerSkillProfile::apply_feedback`), creating
    /// neutral rows where none exist.
    async fn apply_feedback(
        &self,
        worker_id: &str,
        feedback_type: FeedbackType,
        skills: &[String],
    ) -> Result<()>;

    /// Atomically bump a per-organization usage counter.
    async fn increment_usage(&self, org_id: &str, kind: UsageKind) -> Result<()>;
}

/// Run one store read with a fixed timeout and a single retry. The read phase
/// of an assignment run is idempotent, so retrying a call is safe; the run as
/// a whole is never auto-retried.
pub(crate) async fn read_with_retry<T, F, Fut>(
    config: &StoreConfig,
    operation: &str,
    mut call: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let timeout = Duration::from_secs(config.timeout_secs);
    let mut last_failure = String::new();

    for attempt in 0..2 {
        if attempt > 0 {
            tokio::time::sleep(Duration::from_millis(config.retry_backoff_ms)).await;
        }
        match tokio::time::timeout(timeout, call()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) if err.is_transient() => {
                warn!(operation, attempt, error = %err, "Store read failed");
                last_failure = err.to_string();
            }
            Ok(Err(err)) => return Err(err),
            Err(_) => {
                warn!(operation, attempt, timeout_secs = config.timeout_secs, "Store read timed out");
                last_failure = format!("timed out after {}s", config.timeout_secs);
            }
        }
    }

    Err(DispatchError::AssignmentUnavailable {
        operation: operation.to_string(),
        message: last_failure,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_read_with_retry_returns_first_success() {
        let config = StoreConfig::default();
        let calls = AtomicU32::new(0);
        let result = read_with_retry(&config, "profiles", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, DispatchError>(7) }
        })
        .await
        .unwrap();
        assert_eq!(result, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_read_with_retry_retries_transient_once() {
        let config = StoreConfig {
            timeout_secs: 1,
            retry_backoff_ms: 1,
        };
        let calls = AtomicU32::new(0);
        let result: Result<u32> = read_with_retry(&config, "profiles", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(DispatchError::Store("connection reset".into())) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(matches!(
            result,
            Err(DispatchError::AssignmentUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_read_with_retry_propagates_fatal_immediately() {
        let config = StoreConfig::default();
        let calls = AtomicU32::new(0);
        let result: Result<u32> = read_with_retry(&config, "work_item", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(DispatchError::ItemNotFound("item-1".into())) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(DispatchError::ItemNotFound(_))));
    }
}
