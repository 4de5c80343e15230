//! Completion, decline, and review signals that adjust the skill aggregates
//! future assignment runs read.

use std::sync::Arc;

use tracing::{debug, info};

use crate::capability::CapabilityExtractor;
use crate::domain::{FeedbackEvent, FeedbackType, UsageKind, WorkItem};
use crate::error::{DispatchError, Result};
use crate::store::DispatchStore;

pub struct FeedbackRecorder {
    store: Arc<dyn DispatchStore>,
    extractor: CapabilityExtractor,
}

impl FeedbackRecorder {
    pub fn new(store: Arc<dyn DispatchStore>) -> Self {
        Self {
            store,
            extractor: CapabilityExtractor::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: CapabilityExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Record one feedback signal: an event per affected skill, plus the
    /// aggregate-counter fold. Affected skills come from the explicit skill
    /// name when given, else from the work item's requirements. Assignment
    /// runs never read these events, only the folded profile aggregates.
    pub async fn record(
        &self,
        worker_id: &str,
        work_item_id: Option<&str>,
        feedback_type: FeedbackType,
        skill: Option<&str>,
        notes: Option<&str>,
    ) -> Result<()> {
        let (skills, org_id) = self.resolve_context(work_item_id, skill).await?;
        if skills.is_empty() {
            debug!(
                worker = worker_id,
                feedback = %feedback_type,
                "No skills associated with feedback, nothing to record"
            );
            return Ok(());
        }

        let events: Vec<FeedbackEvent> = skills
            .iter()
            .map(|skill| {
                let mut event = FeedbackEvent::new(worker_id, feedback_type, skill);
                if let Some(item_id) = work_item_id {
                    event = event.with_work_item(item_id);
                }
                if let Some(notes) = notes {
                    event = event.with_notes(notes);
                }
                event
            })
            .collect();

        self.store.append_feedback(&events).await?;
        self.store
            .apply_feedback(worker_id, feedback_type, &skills)
            .await?;
        if let Some(org_id) = org_id {
            self.store
                .increment_usage(&org_id, UsageKind::FeedbackEvents)
                .await?;
        }

        info!(
            worker = worker_id,
            feedback = %feedback_type,
            skills = skills.len(),
            "Feedback recorded"
        );
        Ok(())
    }

    async fn resolve_context(
        &self,
        work_item_id: Option<&str>,
        skill: Option<&str>,
    ) -> Result<(Vec<String>, Option<String>)> {
        let item: Option<WorkItem> = match work_item_id {
            Some(id) => Some(
                self.store
                    .work_item(id)
                    .await?
                    .ok_or_else(|| DispatchError::ItemNotFound(id.to_string()))?,
            ),
            None => None,
        };

        let skills = match (skill, &item) {
            (Some(skill), _) => vec![skill.to_string()],
            (None, Some(item)) => self
                .extractor
                .requirements_for(item)
                .into_iter()
                .map(|r| r.skill)
                .collect(),
            (None, None) => Vec::new(),
        };
        Ok((skills, item.map(|i| i.org_id)))
    }
}
