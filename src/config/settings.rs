use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{DispatchError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub scoring: ScoringConfig,
    pub store: StoreConfig,
    pub inference: InferenceConfig,
}

impl DispatchConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = fs::read_to_string(path).await?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| DispatchError::Config(e.to_string()))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Validate configuration values for consistency and safety.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.scoring.max_concurrent_scoring == 0 {
            errors.push("scoring.max_concurrent_scoring must be greater than 0");
        }

        if self.store.timeout_secs == 0 {
            errors.push("store.timeout_secs must be greater than 0");
        }

        if self.inference.min_proficiency > 5 {
            errors.push("inference.min_proficiency must be at most 5");
        }
        let has_blank_keyword = self
            .inference
            .extra_keywords
            .values()
            .flatten()
            .any(|kw| kw.trim().is_empty());
        if has_blank_keyword {
            errors.push("inference.extra_keywords must not contain blank keywords");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::Config(errors.join("; ")))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Upper bound on concurrently scored candidates per assignment run.
    pub max_concurrent_scoring: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_concurrent_scoring: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Per-call timeout for storage reads during an assignment run.
    pub timeout_secs: u64,
    /// Backoff before the single retry of a failed storage read.
    pub retry_backoff_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            retry_backoff_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Minimum proficiency attached to keyword-inferred requirements.
    pub min_proficiency: u8,
    /// Additional skill -> keyword mappings merged into the built-in dictionary.
    pub extra_keywords: BTreeMap<String, Vec<String>>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            min_proficiency: 2,
            extra_keywords: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DispatchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = DispatchConfig::default();
        config.scoring.max_concurrent_scoring = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_concurrent_scoring"));
    }

    #[test]
    fn test_validation_collects_all_violations() {
        let mut config = DispatchConfig::default();
        config.scoring.max_concurrent_scoring = 0;
        config.store.timeout_secs = 0;
        config.inference.min_proficiency = 9;
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("max_concurrent_scoring"));
        assert!(message.contains("timeout_secs"));
        assert!(message.contains("min_proficiency"));
    }

    #[test]
    fn test_blank_extra_keyword_rejected() {
        let mut config = DispatchConfig::default();
        config
            .inference
            .extra_keywords
            .insert("backend".to_string(), vec!["  ".to_string()]);
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DispatchConfig::load(&dir.path().join("dispatch.toml"))
            .await
            .unwrap();
        assert_eq!(config.scoring.max_concurrent_scoring, 8);
        assert_eq!(config.store.timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dispatch.toml");

        let mut config = DispatchConfig::default();
        config.store.timeout_secs = 10;
        config
            .inference
            .extra_keywords
            .insert("payments".to_string(), vec!["invoice".to_string()]);
        config.save(&path).await.unwrap();

        let loaded = DispatchConfig::load(&path).await.unwrap();
        assert_eq!(loaded.store.timeout_secs, 10);
        assert_eq!(
            loaded.inference.extra_keywords.get("payments").unwrap(),
            &vec!["invoice".to_string()]
        );
    }
}
