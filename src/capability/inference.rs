use std::collections::BTreeMap;

use tracing::debug;

use crate::config::InferenceConfig;
use crate::domain::SkillRequirement;

/// Replaceable text-to-skill heuristic. The default keyword scan is
/// deliberately simple; anything smarter (embeddings, an LLM classifier)
/// plugs in here without touching the scorer.
pub trait TextSkillInferencer: Send + Sync {
    fn infer(&self, text: &str) -> Vec<SkillRequirement>;
}

/// Case-insensitive substring scan against a skill-keyword dictionary.
/// Every matched skill becomes a preferred requirement at the configured
/// minimum proficiency.
pub struct KeywordInferencer {
    min_proficiency: u8,
    // BTreeMap keeps inferred requirements in a stable order between runs.
    keywords: BTreeMap<String, Vec<String>>,
}

impl KeywordInferencer {
    pub fn new(config: &InferenceConfig) -> Self {
        let mut keywords = default_keyword_map();
        for (skill, extra) in &config.extra_keywords {
            keywords
                .entry(skill.clone())
                .or_default()
                .extend(extra.iter().map(|kw| kw.to_lowercase()));
        }
        Self {
            min_proficiency: config.min_proficiency,
            keywords,
        }
    }
}

impl Default for KeywordInferencer {
    fn default() -> Self {
        Self::new(&InferenceConfig::default())
    }
}

impl TextSkillInferencer for KeywordInferencer {
    fn infer(&self, text: &str) -> Vec<SkillRequirement> {
        let haystack = text.to_lowercase();
        let requirements: Vec<SkillRequirement> = self
            .keywords
            .iter()
            .filter(|(_, kws)| kws.iter().any(|kw| haystack.contains(kw.as_str())))
            .map(|(skill, _)| SkillRequirement::preferred(skill, self.min_proficiency))
            .collect();
        debug!(
            inferred = requirements.len(),
            "Inferred skill requirements from item text"
        );
        requirements
    }
}

fn default_keyword_map() -> BTreeMap<String, Vec<String>> {
    let entries: &[(&str, &[&str])] = &[
        ("backend", &["api", "endpoint", "backend", "webhook"]),
        ("database", &["database", "sql", "migration", "schema", "index"]),
        (
            "design",
            &["design", "figma", "wireframe", "mockup", "accessibility"],
        ),
        (
            "devops",
            &["deploy", "docker", "kubernetes", "pipeline", "terraform"],
        ),
        (
            "frontend",
            &["frontend", "react", "css", "component", "layout"],
        ),
        (
            "machine-learning",
            &["model", "training", "embedding", "classifier", "llm"],
        ),
        ("mobile", &["mobile", "ios", "android"]),
        (
            "performance",
            &["performance", "latency", "profiling", "optimization"],
        ),
        (
            "security",
            &["security", "auth", "vulnerability", "encryption", "token"],
        ),
        ("testing", &["test", "coverage", "regression", "flaky"]),
    ];
    entries
        .iter()
        .map(|(skill, kws)| {
            (
                skill.to_string(),
                kws.iter().map(|kw| kw.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::domain::Importance;

    use super::*;

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let inferencer = KeywordInferencer::default();
        let requirements = inferencer.infer("Fix the REACT component layout");
        assert!(requirements.iter().any(|r| r.skill == "frontend"));
    }

    #[test]
    fn test_inferred_requirements_are_preferred_at_min_two() {
        let inferencer = KeywordInferencer::default();
        let requirements = inferencer.infer("Add database migration for billing");
        let db = requirements.iter().find(|r| r.skill == "database").unwrap();
        assert_eq!(db.importance, Importance::Preferred);
        assert_eq!(db.min_proficiency, 2);
    }

    #[test]
    fn test_no_keywords_yields_empty() {
        let inferencer = KeywordInferencer::default();
        assert!(inferencer.infer("Summarize quarterly planning notes").is_empty());
    }

    #[test]
    fn test_extra_keywords_extend_dictionary() {
        let mut config = InferenceConfig::default();
        config
            .extra_keywords
            .insert("payments".to_string(), vec!["Invoice".to_string()]);
        let inferencer = KeywordInferencer::new(&config);
        let requirements = inferencer.infer("Rebuild the invoice export");
        assert!(requirements.iter().any(|r| r.skill == "payments"));
    }

    #[test]
    fn test_inference_order_is_stable() {
        let inferencer = KeywordInferencer::default();
        let text = "React frontend work with database schema changes and auth";
        let first = inferencer.infer(text);
        let second = inferencer.infer(text);
        assert_eq!(first, second);
    }
}
