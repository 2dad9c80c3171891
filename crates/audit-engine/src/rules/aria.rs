use ux_types::{ElementType, Issue, Severity, UIElement};

use super::{UsabilityCheck, ALT_TEXT_RULE_ID, ARIA_LABEL_RULE_ID};

/// Label value some generators emit instead of a real description
const PLACEHOLDER_ALT: &str = "image";

pub struct AriaLabelCheck;

impl UsabilityCheck for AriaLabelCheck {
    fn id(&self) -> &str {
        ARIA_LABEL_RULE_ID
    }

    fn name(&self) -> &str {
        "Accessible name"
    }

    fn check(&self, element: &UIElement) -> Option<Issue> {
        let needs_name = matches!(
            element.element_type,
            ElementType::Button | ElementType::Link | ElementType::Image
        );
        if !needs_name || !element.aria.label.is_empty() || !element.text.is_empty() {
            return None;
        }

        Some(Issue::for_element(
            element,
            ARIA_LABEL_RULE_ID,
            Severity::Medium,
            "Interactive element has neither an ARIA label nor visible text, so assistive technology cannot announce its purpose.".to_string(),
            "Add an aria-label or visible text that states what the element does.",
            format!("type={}, aria.label=missing, text=missing", element.element_type),
        ))
    }
}

pub struct AltTextCheck;

impl UsabilityCheck for AltTextCheck {
    fn id(&self) -> &str {
        ALT_TEXT_RULE_ID
    }

    fn name(&self) -> &str {
        "Image alternative text"
    }

    fn check(&self, element: &UIElement) -> Option<Issue> {
        if element.element_type != ElementType::Image {
            return None;
        }
        let label = element.aria.label.as_str();
        if !label.is_empty() && label != PLACEHOLDER_ALT {
            return None;
        }

        Some(Issue::for_element(
            element,
            ALT_TEXT_RULE_ID,
            Severity::Medium,
            "Image has no meaningful alternative text, so users who cannot see it miss its content.".to_string(),
            "Give the image a descriptive alt attribute that conveys its content or function.",
            format!(
                "type=image, aria.label={}",
                if label.is_empty() { "missing" } else { label }
            ),
        ))
    }
}
