//! Decision persistence and manual override.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{AssignmentDecision, UsageKind};
use crate::error::{DispatchError, Result};
use crate::store::DispatchStore;

pub struct AuditRecorder {
    store: Arc<dyn DispatchStore>,
}

impl AuditRecorder {
    pub fn new(store: Arc<dyn DispatchStore>) -> Self {
        Self { store }
    }

    /// Persist a fully-computed decision with its candidate snapshot.
    ///
    /// A failed write surfaces as `AuditWriteFailed` for operator
    /// reconciliation; the decision the caller already holds stays valid.
    pub async fn record(&self, decision: &AssignmentDecision) -> Result<()> {
        self.store
            .record_decision(decision)
            .await
            .map_err(|err| self.write_failed(decision.id, err))?;
        self.store
            .increment_usage(&decision.org_id, UsageKind::Assignments)
            .await?;
        info!(
            decision = %decision.id,
            item = %decision.work_item_id,
            worker = %decision.worker_id,
            "Assignment recorded"
        );
        Ok(())
    }

    /// Rewrite a stored decision as manually overridden, preserving the
    /// original score and candidate snapshot for audit.
    pub async fn record_override(
        &self,
        decision_id: &Uuid,
        overridden_by: &str,
        reason: &str,
    ) -> Result<AssignmentDecision> {
        let mut decision = self
            .store
            .decision(decision_id)
            .await?
            .ok_or_else(|| DispatchError::DecisionNotFound(decision_id.to_string()))?;

        decision.apply_override(overridden_by, reason);
        self.store
            .record_decision(&decision)
            .await
            .map_err(|err| self.write_failed(decision.id, err))?;
        self.store
            .increment_usage(&decision.org_id, UsageKind::Overrides)
            .await?;
        info!(
            decision = %decision.id,
            overridden_by,
            "Assignment manually overridden"
        );
        Ok(decision)
    }

    fn write_failed(&self, decision_id: Uuid, err: DispatchError) -> DispatchError {
        warn!(decision = %decision_id, error = %err, "Audit write failed");
        DispatchError::AuditWriteFailed {
            decision_id: decision_id.to_string(),
            message: err.to_string(),
        }
    }
}
