//! Usability rule catalog
//!
//! Immutable static data: seven weighted categories and the checks an audit
//! covers. Weights feed aggregate reporting only and never change the
//! severity of an individual issue.

use serde::Serialize;
use ux_types::Severity;

use crate::rules::{
    ALT_TEXT_RULE_ID, ARIA_LABEL_RULE_ID, CLICKABLE_SIZE_RULE_ID, CONTRAST_RULE_ID,
    FONT_SIZE_RULE_ID, FORM_LABEL_RULE_ID, REQUIRED_FIELD_RULE_ID,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuleCheck {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub example: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuleCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub weight: f64,
    pub checks: &'static [RuleCheck],
}

/// A check together with the category it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatalogCheck {
    #[serde(flatten)]
    pub check: &'static RuleCheck,
    pub category_id: &'static str,
    pub category: &'static str,
    pub weight: f64,
}

const fn check(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    severity: Severity,
    example: &'static str,
) -> RuleCheck {
    RuleCheck {
        id,
        name,
        description,
        severity,
        example,
    }
}

// ============================================================================
// CATEGORIES
// ============================================================================

pub static CATALOG: &[RuleCategory] = &[
    RuleCategory {
        id: "navigationAndInfoArchitecture",
        name: "Navigation & Information Architecture",
        description: "How the site's navigation is structured and how information is organised",
        weight: 0.15,
        checks: &[
            check(
                "navEntrySufficiency",
                "Sufficient navigation entries",
                "Top or side navigation covers the 3-5 main functions",
                Severity::Medium,
                "The home page only offers a single \"More\" entry, hiding features",
            ),
            check(
                "navConsistency",
                "Consistent navigation",
                "Navigation structure and order stay the same across pages",
                Severity::High,
                "\"Contact us\" is on the home page but missing from inner pages",
            ),
            check(
                "breadcrumb",
                "Breadcrumbs",
                "Deep pages offer a breadcrumb path back",
                Severity::Medium,
                "A product page lacks \"Category > Brand > Product\"",
            ),
        ],
    },
    RuleCategory {
        id: "formAndInput",
        name: "Forms & Input",
        description: "Form design and usability of input controls",
        weight: 0.20,
        checks: &[
            check(
                "placeholderClarity",
                "Clear placeholders",
                "Placeholder text explains what to enter",
                Severity::Low,
                "\"Enter text\" instead of \"Enter your mobile number\"",
            ),
            check(
                "requiredFieldIndicator",
                "Required field indicator",
                "Required fields are explicitly marked (* or a hint)",
                Severity::High,
                "Users learn the phone number is required only after submitting",
            ),
            check(
                "errorFeedback",
                "Timely error feedback",
                "Form errors are reported inline, not only after submission",
                Severity::High,
                "An invalid email is reported only after submitting",
            ),
            check(
                "inputRestrictions",
                "Fitting input controls",
                "Controls match the expected input (number fields, date pickers)",
                Severity::Medium,
                "Birthday must be typed by hand, which invites mistakes",
            ),
        ],
    },
    RuleCategory {
        id: "contentAndReadability",
        name: "Content & Readability",
        description: "How content is presented and how readable it is",
        weight: 0.15,
        checks: &[
            check(
                "fontReadability",
                "Readable font size",
                "Body text is at least 14px",
                Severity::Medium,
                "12px text on mobile is hard to read",
            ),
            check(
                "textContrast",
                "Text contrast",
                "Text to background contrast is at least 4.5:1",
                Severity::High,
                "Grey text on a grey background is hard to read",
            ),
            check(
                "lineHeight",
                "Comfortable line height",
                "Line height is 1.4-1.6 times the font size",
                Severity::Low,
                "Tight line spacing makes paragraphs feel cramped",
            ),
        ],
    },
    RuleCategory {
        id: "interactionAndFeedback",
        name: "Interaction & Feedback",
        description: "User interactions and the feedback the system gives",
        weight: 0.15,
        checks: &[
            check(
                "actionFeedback",
                "Action feedback",
                "Clicking a button gives visual or audible feedback",
                Severity::High,
                "A button shows no change on click, so users think it is broken",
            ),
            check(
                "loadingFeedback",
                "Loading feedback",
                "Loads longer than 2 seconds show progress",
                Severity::Critical,
                "A blank screen for 5 seconds looks like a crash",
            ),
            check(
                "reversibleActions",
                "Reversible actions",
                "Destructive or submitting actions can be confirmed or undone",
                Severity::High,
                "Deleting a record has no confirmation or restore option",
            ),
            check(
                "touchTargetSize",
                "Touch target size",
                "Clickable elements are at least 44x44px",
                Severity::Medium,
                "A 24px close icon is hard to hit on a phone",
            ),
        ],
    },
    RuleCategory {
        id: "performanceAndMobile",
        name: "Performance & Mobile",
        description: "Performance and mobile adaptation",
        weight: 0.15,
        checks: &[
            check(
                "firstScreenLoad",
                "First screen load time",
                "The home page loads within 3 seconds",
                Severity::Critical,
                "The home page takes 6 seconds to open",
            ),
            check(
                "imageOptimization",
                "Image optimisation",
                "Images are appropriately sized and lazy-loaded",
                Severity::Medium,
                "A 300KB icon slows the page down",
            ),
            check(
                "responsiveLayout",
                "Responsive layout",
                "The page renders correctly at common screen widths",
                Severity::High,
                "A horizontal scrollbar appears on phones",
            ),
        ],
    },
    RuleCategory {
        id: "accessibility",
        name: "Accessibility",
        description: "Support for assistive technology and accessible use",
        weight: 0.10,
        checks: &[
            check(
                "altText",
                "Alternative text",
                "Images have a descriptive alt attribute",
                Severity::Medium,
                "A product photo with alt=\"image\"",
            ),
            check(
                "keyboardUsability",
                "Keyboard usability",
                "Core functions can be operated with the keyboard",
                Severity::High,
                "The login button cannot be focused with Tab",
            ),
            check(
                "formLabels",
                "Form labels",
                "Form controls have an associated label",
                Severity::High,
                "An input without a label is announced as \"edit text\"",
            ),
            check(
                "ariaLabels",
                "Accessible names",
                "Buttons, links and images expose a name to assistive technology",
                Severity::Medium,
                "An icon-only button is announced as \"button\"",
            ),
        ],
    },
    RuleCategory {
        id: "trustAndSecurity",
        name: "Trust & Security",
        description: "Security and trust signals",
        weight: 0.10,
        checks: &[
            check(
                "https",
                "HTTPS",
                "The whole site is served over HTTPS",
                Severity::Critical,
                "The login page is served over plain http",
            ),
            check(
                "permissionPrompt",
                "Permission prompts",
                "Users are told before private data is accessed",
                Severity::High,
                "The app opens the camera without asking",
            ),
            check(
                "contactInfo",
                "Contact information",
                "A clear contact channel (email, support) is provided",
                Severity::Medium,
                "No contact channel can be found anywhere",
            ),
        ],
    },
];

// ============================================================================
// QUERIES
// ============================================================================

pub fn categories() -> &'static [RuleCategory] {
    CATALOG
}

pub fn category(id: &str) -> Option<&'static RuleCategory> {
    CATALOG.iter().find(|c| c.id == id)
}

pub fn category_by_name(name: &str) -> Option<&'static RuleCategory> {
    CATALOG.iter().find(|c| c.name == name)
}

/// Heaviest first; equal weights keep catalog order
pub fn categories_by_weight() -> Vec<&'static RuleCategory> {
    let mut sorted: Vec<&RuleCategory> = CATALOG.iter().collect();
    sorted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    sorted
}

/// Every check, flattened, in catalog order
pub fn all_checks() -> Vec<CatalogCheck> {
    CATALOG
        .iter()
        .flat_map(|category| {
            category.checks.iter().map(move |check| CatalogCheck {
                check,
                category_id: category.id,
                category: category.name,
                weight: category.weight,
            })
        })
        .collect()
}

/// Most severe first; equal severities keep catalog order
pub fn checks_by_severity() -> Vec<CatalogCheck> {
    let mut checks = all_checks();
    checks.sort_by(|a, b| b.check.severity.cmp(&a.check.severity));
    checks
}

pub fn checks_with_severity(severity: Severity) -> Vec<CatalogCheck> {
    all_checks()
        .into_iter()
        .filter(|c| c.check.severity == severity)
        .collect()
}

pub fn check_by_id(id: &str) -> Option<CatalogCheck> {
    all_checks().into_iter().find(|c| c.check.id == id)
}

/// Catalog entry an engine rule id reports against
pub fn for_rule_id(rule_id: &str) -> Option<CatalogCheck> {
    let check_id = match rule_id {
        CONTRAST_RULE_ID => "textContrast",
        FONT_SIZE_RULE_ID => "fontReadability",
        CLICKABLE_SIZE_RULE_ID => "touchTargetSize",
        FORM_LABEL_RULE_ID => "formLabels",
        REQUIRED_FIELD_RULE_ID => "requiredFieldIndicator",
        ARIA_LABEL_RULE_ID => "ariaLabels",
        ALT_TEXT_RULE_ID => "altText",
        _ => return None,
    };
    check_by_id(check_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = CATALOG.iter().map(|c| c.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(CATALOG.len(), 7);
    }

    #[test]
    fn test_check_ids_are_unique() {
        let checks = all_checks();
        let ids: HashSet<&str> = checks.iter().map(|c| c.check.id).collect();
        assert_eq!(ids.len(), checks.len());
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        let form = category("formAndInput").unwrap();
        assert_eq!(form.weight, 0.20);
        assert_eq!(category_by_name("Forms & Input"), Some(form));
        assert_eq!(category("missing"), None);
    }

    #[test]
    fn test_weight_order_is_stable() {
        let ids: Vec<&str> = categories_by_weight().iter().map(|c| c.id).collect();
        assert_eq!(ids[0], "formAndInput");
        assert_eq!(
            &ids[1..5],
            &[
                "navigationAndInfoArchitecture",
                "contentAndReadability",
                "interactionAndFeedback",
                "performanceAndMobile",
            ]
        );
    }

    #[test]
    fn test_severity_queries() {
        let critical: Vec<&str> = checks_with_severity(Severity::Critical)
            .iter()
            .map(|c| c.check.id)
            .collect();
        assert_eq!(critical, vec!["loadingFeedback", "firstScreenLoad", "https"]);

        let sorted = checks_by_severity();
        assert_eq!(sorted[0].check.id, "loadingFeedback");
        assert!(sorted
            .windows(2)
            .all(|w| w[0].check.severity >= w[1].check.severity));
    }

    #[test]
    fn test_every_engine_rule_is_catalogued() {
        for rule_id in [
            CONTRAST_RULE_ID,
            FONT_SIZE_RULE_ID,
            CLICKABLE_SIZE_RULE_ID,
            FORM_LABEL_RULE_ID,
            REQUIRED_FIELD_RULE_ID,
            ARIA_LABEL_RULE_ID,
            ALT_TEXT_RULE_ID,
        ] {
            assert!(for_rule_id(rule_id).is_some(), "{} has no catalog entry", rule_id);
        }
        let contrast = for_rule_id(CONTRAST_RULE_ID).unwrap();
        assert_eq!(contrast.category_id, "contentAndReadability");
        assert_eq!(for_rule_id("axe-color-contrast"), None);
    }
}
