//! Data contracts of the assignment engine.

mod candidate;
mod decision;
mod feedback;
mod profile;
mod usage;
mod work_item;

pub use candidate::{Candidate, SkillMatch};
pub use decision::{AssignmentDecision, AssignmentType};
pub use feedback::{FeedbackEvent, FeedbackType};
pub use profile::{InterestLevel, Member, SeniorityTier, WorkerSkillProfile};
pub use usage::{OrgUsage, UsageKind};
pub use work_item::{Importance, Priority, SkillRequirement, WorkItem};
