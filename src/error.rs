use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Work item not found: {0}")]
    ItemNotFound(String),

    #[error("Eligible pool is empty: group {group_id} and organization {org_id} have no members")]
    EmptyPool { group_id: String, org_id: String },

    #[error("No developers available for work item: {0}")]
    NoDevelopersAvailable(String),

    #[error("Assignment unavailable: {operation} failed after retry: {message}")]
    AssignmentUnavailable { operation: String, message: String },

    #[error("Audit write failed for decision {decision_id}: {message}")]
    AuditWriteFailed {
        decision_id: String,
        message: String,
    },

    #[error("Assignment decision not found: {0}")]
    DecisionNotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl DispatchError {
    /// Transient errors are retried once by the store read wrapper before
    /// surfacing as `AssignmentUnavailable`.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Store(_) | Self::AssignmentUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
