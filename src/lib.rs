pub mod audit;
pub mod capability;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod scoring;
pub mod store;

pub use audit::AuditRecorder;
pub use capability::{CapabilityExtractor, KeywordInferencer, TextSkillInferencer};
pub use config::{DispatchConfig, InferenceConfig, ScoringConfig, StoreConfig};
pub use domain::{
    AssignmentDecision, AssignmentType, Candidate, FeedbackEvent, FeedbackType, Importance,
    InterestLevel, Member, OrgUsage, Priority, SeniorityTier, SkillMatch, SkillRequirement,
    UsageKind, WorkItem, WorkerSkillProfile,
};
pub use engine::AssignmentEngine;
pub use error::{DispatchError, Result};
pub use feedback::FeedbackRecorder;
pub use scoring::{CandidateScorer, WeightProfile, WorkerSnapshot};
pub use store::{DispatchStore, MemoryStore};
