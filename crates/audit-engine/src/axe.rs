//! Conversion of axe-core violations into issues

use ux_types::schema::TEXT_TAG;
use ux_types::{AxeNode, AxeViolation, Dimension, ElementContext, Issue, Severity, UIElement, UnifiedSchema};

/// Confidence of an axe finding that could not be tied to a schema element
const UNMATCHED_CONFIDENCE: f64 = 0.9;

/// Map an axe impact level onto issue severity
pub fn severity_for_impact(impact: Option<&str>) -> Severity {
    match impact.map(str::trim) {
        Some("critical") => Severity::Critical,
        Some("serious") => Severity::High,
        Some("minor") => Severity::Low,
        _ => Severity::Medium,
    }
}

/// One issue per violating node, in snapshot order
pub fn axe_issues(schema: &UnifiedSchema) -> Vec<Issue> {
    schema
        .axe_issues
        .iter()
        .flat_map(|violation| {
            if violation.nodes.is_empty() {
                vec![to_issue(violation, None, None)]
            } else {
                violation
                    .nodes
                    .iter()
                    .map(|node| to_issue(violation, Some(node), match_element(schema, node)))
                    .collect()
            }
        })
        .collect()
}

/// First element whose selector equals the last compound of any target
fn match_element<'a>(schema: &'a UnifiedSchema, node: &AxeNode) -> Option<&'a UIElement> {
    node.target.iter().find_map(|target| {
        let last = target
            .rsplit(|c: char| c == '>' || c.is_whitespace())
            .find(|s| !s.is_empty())?;
        schema
            .elements
            .iter()
            .find(|e| e.tag != TEXT_TAG && (e.css_selector == last || e.css_selector == target.trim()))
    })
}

fn to_issue(violation: &AxeViolation, node: Option<&AxeNode>, element: Option<&UIElement>) -> Issue {
    let rule_id = format!("axe-{}", violation.id);
    let explanation = if violation.help.is_empty() {
        violation.description.clone()
    } else if violation.description.is_empty() {
        violation.help.clone()
    } else {
        format!("{}: {}", violation.help, violation.description)
    };
    let suggestion = node
        .and_then(|n| n.failure_summary.clone())
        .or_else(|| {
            violation
                .help_url
                .as_ref()
                .map(|url| format!("Follow the remediation guidance at {}", url))
        })
        .unwrap_or_default();
    let target = node.map(|n| n.target.join(", ")).unwrap_or_default();

    Issue {
        element_id: element.map(|e| e.id.clone()).unwrap_or_default(),
        rule_id,
        severity: severity_for_impact(violation.impact.as_deref()),
        confidence: element.map_or(UNMATCHED_CONFIDENCE, |e| e.confidence),
        explanation,
        suggestion,
        evidence: format!("axe:{}, target={}", violation.id, target),
        status: None,
        kind: Some(Dimension::Accessibility),
        element: element.map(ElementContext::from),
    }
}
