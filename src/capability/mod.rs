//! Determines the skills a work item needs.

mod inference;

pub use inference::{KeywordInferencer, TextSkillInferencer};

use crate::domain::{SkillRequirement, WorkItem};

/// Resolves a work item's skill requirements: explicit requirements verbatim,
/// else keyword inference over title and description. An empty result puts
/// downstream scoring into skill-agnostic mode.
pub struct CapabilityExtractor {
    inferencer: Box<dyn TextSkillInferencer>,
}

impl CapabilityExtractor {
    pub fn new(inferencer: Box<dyn TextSkillInferencer>) -> Self {
        Self { inferencer }
    }

    pub fn requirements_for(&self, item: &WorkItem) -> Vec<SkillRequirement> {
        if !item.explicit_skills.is_empty() {
            return item.explicit_skills.clone();
        }
        let text = format!("{} {}", item.title, item.description);
        self.inferencer.infer(&text)
    }
}

impl Default for CapabilityExtractor {
    fn default() -> Self {
        Self::new(Box::new(KeywordInferencer::default()))
    }
}
