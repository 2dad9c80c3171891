pub mod axe;
pub mod catalog;
pub mod config;
pub mod context;
pub mod key_flow;
pub mod llm;
pub mod normalizer;
pub mod pipeline;
pub mod prioritize;
pub mod report;
pub mod rules;
pub mod sanity;
pub mod scoring;
pub mod suggestions;

use ux_types::{Issue, RawSnapshot, UnifiedSchema};

pub use config::{AuditConfig, RequiredFieldDetection};
pub use context::{BusinessContext, Scenario};
pub use key_flow::infer_key_user_flow;
pub use normalizer::Normalizer;
pub use pipeline::{AuditPipeline, PipelineError};
pub use report::{AuditReport, IssueSummary};
pub use rules::{RuleEngine, UsabilityCheck};
pub use sanity::SanityChecker;
pub use scoring::ScoreCard;

/// AuditEngine entry point
///
/// The five pure core operations behind one value. Nothing here performs I/O
/// or holds mutable state, so one engine can serve concurrent callers.
pub struct AuditEngine {
    config: AuditConfig,
    normalizer: Normalizer,
    rules: RuleEngine,
    sanity: SanityChecker,
}

impl AuditEngine {
    pub fn new(config: AuditConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config.normalizer.clone()),
            rules: RuleEngine::new(&config.rules),
            sanity: SanityChecker::new(),
            config,
        }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// `None` when there is no snapshot
    pub fn normalize(&self, snapshot: Option<&RawSnapshot>, page_url: &str) -> Option<UnifiedSchema> {
        self.normalizer.normalize(snapshot, page_url)
    }

    /// Rule-engine issues only; deterministic for a given schema
    pub fn evaluate(&self, schema: &UnifiedSchema) -> Vec<Issue> {
        self.rules.evaluate(schema)
    }

    /// Rule-engine issues followed by the snapshot's axe findings
    pub fn raw_issues(&self, schema: &UnifiedSchema) -> Vec<Issue> {
        let mut issues = self.evaluate(schema);
        issues.extend(axe::axe_issues(schema));
        issues
    }

    pub fn reconcile(&self, issues: Vec<Issue>, schema: Option<&UnifiedSchema>) -> Vec<Issue> {
        self.sanity.reconcile(issues, schema)
    }

    pub fn score(&self, issues: &[Issue]) -> ScoreCard {
        scoring::score(issues)
    }

    pub fn prioritize(&self, issues: Vec<Issue>, context: &BusinessContext) -> Vec<Issue> {
        prioritize::prioritize(issues, context)
    }
}

impl Default for AuditEngine {
    fn default() -> Self {
        Self::new(AuditConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use ux_types::{Dimension, Severity};

    fn snapshot() -> RawSnapshot {
        serde_json::from_value(json!({
            "dom_tree": {
                "type": "element",
                "tagName": "form",
                "attributes": {"id": "signup"},
                "children": [
                    {"type": "element", "tagName": "input", "attributes": {"type": "email", "required": true}, "children": []},
                    {"type": "element", "tagName": "img", "attributes": {"src": "/hero.png"}, "children": []}
                ]
            },
            "axe_violations": [
                {"id": "image-alt", "impact": "critical", "description": "Images must have alternate text", "nodes": [{"target": ["img"]}]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_engine_detects_form_and_image_problems() {
        let engine = AuditEngine::default();
        let schema = engine.normalize(Some(&snapshot()), "https://example.com/signup").unwrap();
        let issues = engine.evaluate(&schema);

        assert!(issues.iter().any(|i| i.rule_id == "form-label-001"));
        assert!(issues.iter().any(|i| i.rule_id == "required-field-001"));
        assert!(issues.iter().any(|i| i.rule_id == "alt-text-001"));
        assert!(issues.iter().all(|i| !i.rule_id.starts_with("axe-")));
    }

    #[test]
    fn test_raw_issues_include_axe_findings() {
        let engine = AuditEngine::default();
        let schema = engine.normalize(Some(&snapshot()), "https://example.com/signup").unwrap();
        let issues = engine.raw_issues(&schema);

        let axe = issues.iter().find(|i| i.rule_id == "axe-image-alt").unwrap();
        assert_eq!(axe.severity, Severity::Critical);
        assert_eq!(axe.kind, Some(Dimension::Accessibility));
        assert_eq!(issues.last().map(|i| i.rule_id.as_str()), Some("axe-image-alt"));
    }

    #[test]
    fn test_engine_without_snapshot() {
        let engine = AuditEngine::default();
        assert!(engine.normalize(None, "https://example.com").is_none());
        assert_eq!(engine.score(&[]).overall_score, 100);
        assert!(engine.reconcile(Vec::new(), None).is_empty());
    }

    #[test]
    fn test_legacy_required_field_mode() {
        let config = AuditConfig::from_str("[rules]\nrequired_field_detection = \"dom_path_marker\"").unwrap();
        let engine = AuditEngine::new(config);
        let schema = engine.normalize(Some(&snapshot()), "https://example.com/signup").unwrap();
        assert!(!engine.evaluate(&schema).iter().any(|i| i.rule_id == "required-field-001"));
    }
}
