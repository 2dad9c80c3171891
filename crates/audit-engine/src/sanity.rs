//! Sanity Checker
//!
//! Cross-validates externally produced issues against the facts measured in
//! the schema. A contradicted claim is never dropped and never corrected:
//! it is kept, marked `pending_review` and annotated, because the
//! disagreement is itself worth a human look.

use std::collections::HashMap;

use tracing::warn;
use ux_types::{ElementContext, Issue, IssueStatus, UIElement, UnifiedSchema};

use crate::rules::contrast::MIN_CONTRAST_RATIO;
use crate::rules::CONTRAST_RULE_ID;

/// Independently verifies one kind of claim against measured facts
pub trait FactVerifier: Send + Sync {
    /// Rule id whose claims this verifier can check
    fn rule_id(&self) -> &str;

    /// Note describing the contradiction, `None` when the claim holds or
    /// cannot be checked
    fn contradiction(&self, issue: &Issue, element: &UIElement) -> Option<String>;
}

/// Low-contrast claims against the measured ratio
pub struct ContrastVerifier;

impl FactVerifier for ContrastVerifier {
    fn rule_id(&self) -> &str {
        CONTRAST_RULE_ID
    }

    fn contradiction(&self, _issue: &Issue, element: &UIElement) -> Option<String> {
        let measured = element.contrast_ratio?;
        (measured >= MIN_CONTRAST_RATIO).then(|| {
            format!(
                "[Note: measured contrast ratio is {:.1}:1, at or above the {}:1 threshold; flagged for manual review]",
                measured, MIN_CONTRAST_RATIO
            )
        })
    }
}

pub struct SanityChecker {
    verifiers: Vec<Box<dyn FactVerifier>>,
}

impl SanityChecker {
    pub fn new() -> Self {
        Self {
            verifiers: vec![Box::new(ContrastVerifier)],
        }
    }

    /// Reconcile candidate issues with the schema
    ///
    /// Output has the same length and order as the input. Without a schema
    /// the issues are returned unchanged.
    pub fn reconcile(&self, issues: Vec<Issue>, schema: Option<&UnifiedSchema>) -> Vec<Issue> {
        let Some(schema) = schema else {
            return issues;
        };

        let by_id: HashMap<&str, &UIElement> = schema
            .elements
            .iter()
            .map(|e| (e.id.as_str(), e))
            .collect();

        issues
            .into_iter()
            .map(|issue| self.review(issue, &by_id))
            .collect()
    }

    fn review(&self, mut issue: Issue, by_id: &HashMap<&str, &UIElement>) -> Issue {
        let Some(element) = by_id.get(issue.element_id.as_str()) else {
            return issue;
        };
        let note = self
            .verifiers
            .iter()
            .filter(|v| v.rule_id() == issue.rule_id)
            .find_map(|v| v.contradiction(&issue, element));

        if let Some(note) = note {
            warn!(
                "Issue {} on {} contradicts measured facts, marking pending_review",
                issue.rule_id, issue.element_id
            );
            issue.status = Some(IssueStatus::PendingReview);
            if issue.explanation.is_empty() {
                issue.explanation = note;
            } else {
                issue.explanation = format!("{} {}", issue.explanation, note);
            }
        }
        issue
    }
}

impl Default for SanityChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill in `element` on issues that reference a schema element but lack it
///
/// External issues arrive with only an `element_id`; scoring and
/// prioritization need the tag and text.
pub fn attach_element_context(issues: Vec<Issue>, schema: &UnifiedSchema) -> Vec<Issue> {
    issues
        .into_iter()
        .map(|mut issue| {
            if issue.element.is_none() {
                issue.element = schema.element(&issue.element_id).map(ElementContext::from);
            }
            issue
        })
        .collect()
}
