//! End-to-end audit orchestration
//!
//! normalize → evaluate + axe → (LLM → parse → attach context → reconcile →
//! merge) → suggestions → score → prioritize → report

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info};
use ux_types::{Issue, RawSnapshot};

use crate::config::AuditConfig;
use crate::context::BusinessContext;
use crate::key_flow::infer_key_user_flow;
use crate::llm::{parse_response, FallbackCompleter, LlmError, LlmPayload, ResponseParseError};
use crate::report::AuditReport;
use crate::sanity::attach_element_context;
use crate::suggestions::ensure_actionable_suggestions;
use crate::AuditEngine;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("LLM analysis failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Could not parse LLM response: {0}")]
    Parse(#[from] ResponseParseError),
}

pub struct AuditPipeline {
    engine: AuditEngine,
    completer: Option<FallbackCompleter>,
}

impl AuditPipeline {
    /// Rules-only pipeline; add a completer for LLM augmentation
    pub fn new(config: AuditConfig) -> Self {
        Self {
            engine: AuditEngine::new(config),
            completer: None,
        }
    }

    pub fn with_completer(mut self, completer: FallbackCompleter) -> Self {
        self.completer = Some(completer);
        self
    }

    pub fn engine(&self) -> &AuditEngine {
        &self.engine
    }

    /// Audit one page
    ///
    /// `key_action` overrides the key action parsed from the context when
    /// locating the key user flow. A missing snapshot yields an empty report.
    pub fn run(
        &self,
        snapshot: Option<&RawSnapshot>,
        page_url: &str,
        context: &BusinessContext,
        key_action: Option<&str>,
    ) -> Result<AuditReport, PipelineError> {
        let Some(schema) = self.engine.normalize(snapshot, page_url) else {
            info!("No snapshot for {}, producing an empty report", page_url);
            let scores = self.engine.score(&[]);
            return Ok(AuditReport::new(page_url, None, context, scores, Vec::new()));
        };

        let schema = match key_action.or(context.key_action.as_deref()) {
            Some(description) => {
                let flow = infer_key_user_flow(&schema, description);
                schema.with_key_user_flow(flow)
            }
            None => schema,
        };

        let raw_issues = self.engine.raw_issues(&schema);

        let issues = match &self.completer {
            Some(completer) => {
                let payload = LlmPayload::bounded(&schema, &raw_issues, context, &self.engine.config().llm);
                let response = completer.complete(&payload)?;
                let candidates = parse_response(&response)?;
                let candidates = attach_element_context(candidates, &schema);
                let candidates = self.engine.reconcile(candidates, Some(&schema));
                merge_issues(candidates, raw_issues)
            }
            None => raw_issues,
        };

        let issues = ensure_actionable_suggestions(issues);
        let scores = self.engine.score(&issues);
        let issues = self.engine.prioritize(issues, context);

        info!(
            "Audit of {} finished: {} issues, overall score {}",
            page_url,
            issues.len(),
            scores.overall_score
        );
        Ok(AuditReport::new(page_url, Some(&schema), context, scores, issues))
    }
}

/// LLM issues first, then the rule issues the LLM did not re-report
///
/// An issue counts as re-reported when it shares element id and rule id.
pub fn merge_issues(mut candidates: Vec<Issue>, raw_issues: Vec<Issue>) -> Vec<Issue> {
    let leftover: Vec<Issue> = {
        let reported: HashSet<(&str, &str)> = candidates
            .iter()
            .map(|i| (i.element_id.as_str(), i.rule_id.as_str()))
            .collect();
        raw_issues
            .into_iter()
            .filter(|i| !reported.contains(&(i.element_id.as_str(), i.rule_id.as_str())))
            .collect()
    };
    debug!(
        "Merging {} LLM issues with {} rule issues",
        candidates.len(),
        leftover.len()
    );
    candidates.extend(leftover);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{BackendError, Completer};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use ux_types::{Severity, UnifiedSchema};

    struct Canned(String);

    impl Completer for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        fn complete(&self, _payload: &LlmPayload) -> Result<String, BackendError> {
            Ok(self.0.clone())
        }
    }

    struct Broke;

    impl Completer for Broke {
        fn name(&self) -> &str {
            "broke"
        }

        fn complete(&self, _payload: &LlmPayload) -> Result<String, BackendError> {
            Err(BackendError::InsufficientBalance("402".to_string()))
        }
    }

    fn snapshot() -> RawSnapshot {
        let value: Value = json!({
            "dom_tree": {
                "type": "element",
                "tagName": "body",
                "attributes": {},
                "children": [
                    {
                        "type": "element",
                        "tagName": "p",
                        "attributes": {"id": "intro"},
                        "computedStyle": {"color": "#ffffff", "backgroundColor": "#ffffff", "fontSize": "16px"},
                        "children": [{"type": "text", "content": "Welcome"}]
                    },
                    {
                        "type": "element",
                        "tagName": "button",
                        "attributes": {"id": "signup"},
                        "boundingBox": {"x": 0, "y": 0, "width": 30, "height": 30},
                        "children": [{"type": "text", "content": "Sign up"}]
                    }
                ]
            },
            "axe_violations": []
        });
        serde_json::from_value(value).unwrap()
    }

    fn schema() -> UnifiedSchema {
        AuditEngine::default().normalize(Some(&snapshot()), "https://example.com").unwrap()
    }

    fn issue(element_id: &str, rule_id: &str) -> Issue {
        Issue {
            element_id: element_id.to_string(),
            rule_id: rule_id.to_string(),
            severity: Severity::Low,
            confidence: 0.5,
            explanation: String::new(),
            suggestion: String::new(),
            evidence: String::new(),
            status: None,
            kind: None,
            element: None,
        }
    }

    #[test]
    fn test_missing_snapshot_is_an_empty_report() {
        let report = AuditPipeline::new(AuditConfig::default())
            .run(None, "https://example.com", &BusinessContext::default(), None)
            .unwrap();
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.schema_fingerprint, None);
        assert_eq!(report.scores.overall_score, 100);
    }

    #[test]
    fn test_rules_only_run() {
        let context = BusinessContext::parse("Goal: more signups");
        let report = AuditPipeline::new(AuditConfig::default())
            .run(Some(&snapshot()), "https://example.com", &context, Some("click sign up"))
            .unwrap();

        let rule_ids: Vec<&str> = report.issues.iter().map(|i| i.rule_id.as_str()).collect();
        assert!(rule_ids.contains(&"contrast-001"));
        assert!(rule_ids.contains(&"clickable-size-001"));
        assert!(report.issues.iter().all(|i| i.suggestion.chars().count() > 10));
        assert_eq!(report.schema_fingerprint, Some(schema().with_key_user_flow(
            infer_key_user_flow(&schema(), "click sign up")
        ).fingerprint()));
        // critical/high ahead of medium
        assert_eq!(report.issues[0].severity, Severity::High);
    }

    #[test]
    fn test_llm_issues_are_reconciled_and_merged() {
        let schema = schema();
        let button = schema.elements.iter().find(|e| e.tag == "button").unwrap();
        let response = format!(
            "Here you go:\n```json\n{}\n```",
            json!([{
                "element_id": button.id,
                "rule_id": "contrast-001",
                "severity": "high",
                "confidence": 0.7,
                "explanation": "Button text is hard to read",
                "suggestion": "short",
                "evidence": "visual inspection"
            }])
        );

        let pipeline = AuditPipeline::new(AuditConfig::default())
            .with_completer(FallbackCompleter::single(Box::new(Canned(response))));
        let report = pipeline
            .run(Some(&snapshot()), "https://example.com", &BusinessContext::default(), None)
            .unwrap();

        let llm_issue = report
            .issues
            .iter()
            .find(|i| i.element_id == button.id && i.rule_id == "contrast-001")
            .unwrap();
        assert_eq!(llm_issue.element.as_ref().map(|e| e.tag.as_str()), Some("button"));
        assert!(llm_issue.suggestion.contains("4.5:1"));
        // rule issues the LLM did not mention survive the merge
        assert!(report.issues.iter().any(|i| i.rule_id == "clickable-size-001"));
    }

    #[test]
    fn test_llm_failure_is_an_error() {
        let pipeline = AuditPipeline::new(AuditConfig::default())
            .with_completer(FallbackCompleter::single(Box::new(Broke)));
        let err = pipeline
            .run(Some(&snapshot()), "https://example.com", &BusinessContext::default(), None)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Llm(LlmError::InsufficientBalance { .. })));

        let pipeline = AuditPipeline::new(AuditConfig::default())
            .with_completer(FallbackCompleter::single(Box::new(Canned("no json".to_string()))));
        let err = pipeline
            .run(Some(&snapshot()), "https://example.com", &BusinessContext::default(), None)
            .unwrap_err();
        assert_eq!(err, PipelineError::Parse(ResponseParseError::NoJson));
    }

    #[test]
    fn test_merge_drops_re_reported_rule_issues() {
        let merged = merge_issues(
            vec![issue("e2", "contrast-001")],
            vec![issue("e2", "contrast-001"), issue("e2", "aria-label-001"), issue("e3", "contrast-001")],
        );
        let keys: Vec<(&str, &str)> = merged
            .iter()
            .map(|i| (i.element_id.as_str(), i.rule_id.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("e2", "contrast-001"), ("e2", "aria-label-001"), ("e3", "contrast-001")]
        );
    }
}
