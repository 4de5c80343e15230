use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Medium/Low work carries the learning-opportunity incentive; urgent
    /// tiers always optimize for proven skill.
    pub fn is_growth_eligible(&self) -> bool {
        matches!(self, Priority::Medium | Priority::Low)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Required,
    Preferred,
}

impl Importance {
    /// Skill-score weighting: required skills count double.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Required => 2.0,
            Self::Preferred => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill: String,
    pub importance: Importance,
    /// Minimum proficiency on the 0-5 scale.
    pub min_proficiency: u8,
}

impl SkillRequirement {
    pub fn required(skill: impl Into<String>, min_proficiency: u8) -> Self {
        Self {
            skill: skill.into(),
            importance: Importance::Required,
            min_proficiency,
        }
    }

    pub fn preferred(skill: impl Into<String>, min_proficiency: u8) -> Self {
        Self {
            skill: skill.into(),
            importance: Importance::Preferred,
            min_proficiency,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    /// Explicit requirements win over keyword inference when non-empty.
    #[serde(default)]
    pub explicit_skills: Vec<SkillRequirement>,
    pub org_id: String,
    pub created_at: DateTime<Utc>,
}

impl WorkItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            explicit_skills: Vec::new(),
            org_id: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_skills(mut self, skills: Vec<SkillRequirement>) -> Self {
        self.explicit_skills = skills;
        self
    }

    pub fn with_org(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = org_id.into();
        self
    }
}
