//! Report composition

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ux_types::{Dimension, Issue, Severity, UnifiedSchema};

use crate::context::{BusinessContext, Scenario};
use crate::scoring::ScoreCard;

/// Issue counts by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub pending_review: usize,
}

impl IssueSummary {
    pub fn of(issues: &[Issue]) -> Self {
        let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
        Self {
            total: issues.len(),
            critical: count(Severity::Critical),
            high: count(Severity::High),
            medium: count(Severity::Medium),
            low: count(Severity::Low),
            pending_review: issues.iter().filter(|i| i.is_pending_review()).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub page_url: String,
    /// `None` when no snapshot was available
    pub schema_fingerprint: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub scenario: Scenario,
    pub summary: IssueSummary,
    pub executive_summary: String,
    pub scores: ScoreCard,
    /// In priority order
    pub issues: Vec<Issue>,
}

impl AuditReport {
    pub fn new(
        page_url: &str,
        schema: Option<&UnifiedSchema>,
        context: &BusinessContext,
        scores: ScoreCard,
        issues: Vec<Issue>,
    ) -> Self {
        let summary = IssueSummary::of(&issues);
        Self {
            page_url: page_url.to_string(),
            schema_fingerprint: schema.map(UnifiedSchema::fingerprint),
            generated_at: Utc::now(),
            scenario: context.scenario(),
            executive_summary: executive_summary(&summary, context),
            summary,
            scores,
            issues,
        }
    }

    /// Plain-text rendering for terminals
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "UX audit: {}", self.page_url);
        let _ = writeln!(out, "Generated: {}", self.generated_at.to_rfc3339());
        let _ = writeln!(out, "Scenario: {}", self.scenario);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.executive_summary);
        let _ = writeln!(out);
        let _ = writeln!(out, "Overall score: {}/100", self.scores.overall_score);
        for dimension in Dimension::ALL {
            let _ = writeln!(out, "  {:<14} {:>3}", dimension.as_str(), self.scores.dimension(dimension));
        }

        if self.issues.is_empty() {
            let _ = writeln!(out, "\nNo issues found.");
            return out;
        }

        let _ = writeln!(out, "\nIssues ({}):", self.summary.total);
        for (n, issue) in self.issues.iter().enumerate() {
            let review = if issue.is_pending_review() { " [pending review]" } else { "" };
            let target = if issue.element_id.is_empty() { "page" } else { issue.element_id.as_str() };
            let _ = writeln!(
                out,
                "{:>3}. [{}] {} on {}{}",
                n + 1,
                issue.severity,
                issue.rule_id,
                target,
                review
            );
            if !issue.explanation.is_empty() {
                let _ = writeln!(out, "     {}", issue.explanation);
            }
            if !issue.evidence.is_empty() {
                let _ = writeln!(out, "     evidence: {}", issue.evidence);
            }
            if !issue.suggestion.is_empty() {
                let _ = writeln!(out, "     fix: {}", issue.suggestion);
            }
        }
        out
    }
}

/// Headline paragraph framed by the industry and business goal
pub fn executive_summary(summary: &IssueSummary, context: &BusinessContext) -> String {
    let industry = context.industry.as_deref().unwrap_or("website");
    let goal = context.business_goal.as_deref().unwrap_or("a better user experience");
    format!(
        "This {} UX audit found {} issues: {} critical, {} high, {} medium and {} low. \
         These issues may hold back the goal of {}. \
         Fix critical and high-impact issues first for the fastest improvement.",
        industry, summary.total, summary.critical, summary.high, summary.medium, summary.low, goal
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score;
    use pretty_assertions::assert_eq;
    use ux_types::IssueStatus;

    fn issue(severity: Severity, pending: bool) -> Issue {
        Issue {
            element_id: "e1".to_string(),
            rule_id: "contrast-001".to_string(),
            severity,
            confidence: 0.9,
            explanation: "Low contrast".to_string(),
            suggestion: "Darken the text".to_string(),
            evidence: "contrast_ratio=2.10".to_string(),
            status: pending.then_some(IssueStatus::PendingReview),
            kind: None,
            element: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let issues = vec![
            issue(Severity::Critical, false),
            issue(Severity::High, true),
            issue(Severity::High, false),
            issue(Severity::Low, false),
        ];
        assert_eq!(
            IssueSummary::of(&issues),
            IssueSummary {
                total: 4,
                critical: 1,
                high: 2,
                medium: 0,
                low: 1,
                pending_review: 1,
            }
        );
    }

    #[test]
    fn test_executive_summary_uses_context() {
        let context = BusinessContext::parse("Industry: fintech, Goal: more signups");
        let summary = IssueSummary::of(&[issue(Severity::High, false)]);
        let text = executive_summary(&summary, &context);
        assert!(text.starts_with("This fintech UX audit found 1 issues: 0 critical, 1 high"));
        assert!(text.contains("the goal of more signups"));

        let fallback = executive_summary(&IssueSummary::default(), &BusinessContext::default());
        assert!(fallback.starts_with("This website UX audit found 0 issues"));
        assert!(fallback.contains("a better user experience"));
    }

    #[test]
    fn test_report_without_schema() {
        let report = AuditReport::new("https://example.com", None, &BusinessContext::default(), score(&[]), Vec::new());
        assert_eq!(report.schema_fingerprint, None);
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.scores.overall_score, 100);
        assert!(report.to_text().contains("No issues found."));
    }

    #[test]
    fn test_text_rendering() {
        let issues = vec![issue(Severity::High, true)];
        let report = AuditReport::new(
            "https://example.com",
            None,
            &BusinessContext::default(),
            score(&issues),
            issues,
        );
        let text = report.to_text();
        assert!(text.contains("Overall score: 98/100"));
        assert!(text.contains("  1. [high] contrast-001 on e1 [pending review]"));
        assert!(text.contains("evidence: contrast_ratio=2.10"));
    }

    #[test]
    fn test_report_json_shape() {
        let report = AuditReport::new("https://example.com", None, &BusinessContext::default(), score(&[]), Vec::new());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["scenario"], "general");
        assert_eq!(value["scores"]["dimension_scores"]["visual"], 100);
        assert!(value["generated_at"].is_string());
    }
}
