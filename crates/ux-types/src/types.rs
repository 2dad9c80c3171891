use serde::{Deserialize, Serialize};

use crate::schema::{ElementType, UIElement};

/// Severity of a usability issue
///
/// Total order for sorting: critical > high > medium > low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks the key task for a large share of users
    Critical,
    /// Likely to cause task failure or exclusion
    High,
    /// Friction that slows users down
    Medium,
    /// Polish
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Sort rank, higher is more severe
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    /// Points deducted from a dimension score for each issue of this severity
    pub fn deduction(self) -> u32 {
        match self {
            Severity::Critical => 20,
            Severity::High => 10,
            Severity::Medium => 5,
            Severity::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named bucket used to aggregate issues into sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Navigation,
    Visual,
    Form,
    Accessibility,
    Performance,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Navigation,
        Dimension::Visual,
        Dimension::Form,
        Dimension::Accessibility,
        Dimension::Performance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Navigation => "navigation",
            Dimension::Visual => "visual",
            Dimension::Form => "form",
            Dimension::Accessibility => "accessibility",
            Dimension::Performance => "performance",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review status of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Claimed problem contradicts a measured fact; needs a human decision
    PendingReview,
}

/// Snapshot of the element an issue points at
///
/// Carried on the issue so scoring and prioritization never need the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementContext {
    pub tag: String,
    pub element_type: ElementType,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_clickable: bool,
}

impl From<&UIElement> for ElementContext {
    fn from(element: &UIElement) -> Self {
        Self {
            tag: element.tag.clone(),
            element_type: element.element_type,
            text: element.text.clone(),
            is_clickable: element.is_clickable,
        }
    }
}

/// A structured usability finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub element_id: String,
    pub rule_id: String,
    pub severity: Severity,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub suggestion: String,
    /// Quantitative fact or rule id that triggered the issue
    #[serde(default)]
    pub evidence: String,
    /// Unknown values from external sources read as `None`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::snapshot::or_default"
    )]
    pub status: Option<IssueStatus>,
    /// Explicit dimension hint, e.g. `accessibility` for axe findings;
    /// unknown values read as `None`
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::snapshot::or_default"
    )]
    pub kind: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<ElementContext>,
}

impl Issue {
    /// Create an issue for an element of the schema
    pub fn for_element(
        element: &UIElement,
        rule_id: &str,
        severity: Severity,
        explanation: String,
        suggestion: &str,
        evidence: String,
    ) -> Self {
        Self {
            element_id: element.id.clone(),
            rule_id: rule_id.to_string(),
            severity,
            confidence: element.confidence,
            explanation,
            suggestion: suggestion.to_string(),
            evidence,
            status: None,
            kind: None,
            element: Some(ElementContext::from(element)),
        }
    }

    pub fn is_pending_review(&self) -> bool {
        self.status == Some(IssueStatus::PendingReview)
    }
}
