//! Form control checks

use ux_types::{ElementType, Issue, Severity, UIElement};

use super::{UsabilityCheck, FORM_LABEL_RULE_ID, REQUIRED_FIELD_RULE_ID};
use crate::config::RequiredFieldDetection;

pub struct FormLabelCheck;

impl UsabilityCheck for FormLabelCheck {
    fn id(&self) -> &str {
        FORM_LABEL_RULE_ID
    }

    fn name(&self) -> &str {
        "Form control label"
    }

    fn check(&self, element: &UIElement) -> Option<Issue> {
        if element.element_type != ElementType::Input || !element.aria.label.is_empty() {
            return None;
        }

        Some(Issue::for_element(
            element,
            FORM_LABEL_RULE_ID,
            Severity::High,
            "Form control has no associated label, so screen reader users cannot tell what to enter.".to_string(),
            "Associate a visible <label for=...> with the control, or give it an aria-label.",
            "type=input, aria.label=missing".to_string(),
        ))
    }
}

/// Required inputs that do not tell the user they are required
pub struct RequiredFieldCheck {
    detection: RequiredFieldDetection,
}

impl RequiredFieldCheck {
    pub fn new(detection: RequiredFieldDetection) -> Self {
        Self { detection }
    }

    fn has_visible_marker(element: &UIElement) -> bool {
        [element.aria.label.as_str(), element.text.as_str()]
            .iter()
            .any(|s| s.contains('*') || s.to_lowercase().contains("required"))
    }
}

impl UsabilityCheck for RequiredFieldCheck {
    fn id(&self) -> &str {
        REQUIRED_FIELD_RULE_ID
    }

    fn name(&self) -> &str {
        "Required field indicator"
    }

    fn check(&self, element: &UIElement) -> Option<Issue> {
        if element.element_type != ElementType::Input {
            return None;
        }

        let evidence = match self.detection {
            RequiredFieldDetection::Attribute => {
                if !element.is_required || Self::has_visible_marker(element) {
                    return None;
                }
                "type=input, required=true, visible marker=missing"
            }
            RequiredFieldDetection::DomPathMarker => {
                if !element.dom_path.contains('*') {
                    return None;
                }
                "type=input, required=indicated by * in dom_path"
            }
        };

        Some(Issue::for_element(
            element,
            REQUIRED_FIELD_RULE_ID,
            Severity::High,
            "Required field is not marked as required, so users only find out when submission fails.".to_string(),
            "Mark required fields with an asterisk or the word \"required\" next to the label.",
            evidence.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::element;

    fn input() -> UIElement {
        element(ElementType::Input, "input")
    }

    #[test]
    fn test_unlabelled_input() {
        let issue = FormLabelCheck.check(&input()).unwrap();
        assert_eq!(issue.severity, Severity::High);

        let mut labelled = input();
        labelled.aria.label = "Email".to_string();
        assert_eq!(FormLabelCheck.check(&labelled), None);

        assert_eq!(FormLabelCheck.check(&element(ElementType::Button, "button")), None);
    }

    #[test]
    fn test_required_attribute_mode() {
        let check = RequiredFieldCheck::new(RequiredFieldDetection::Attribute);

        let mut required = input();
        required.is_required = true;
        required.aria.label = "Email".to_string();
        assert!(check.check(&required).is_some());

        required.aria.label = "Email *".to_string();
        assert_eq!(check.check(&required), None);

        required.aria.label = "Email".to_string();
        required.text = "Required".to_string();
        assert_eq!(check.check(&required), None);

        assert_eq!(check.check(&input()), None);
    }

    #[test]
    fn test_dom_path_marker_mode() {
        let check = RequiredFieldCheck::new(RequiredFieldDetection::DomPathMarker);

        let mut marked = input();
        marked.dom_path = "body>form>input.*".to_string();
        let issue = check.check(&marked).unwrap();
        assert_eq!(issue.evidence, "type=input, required=indicated by * in dom_path");

        let mut required = input();
        required.is_required = true;
        assert_eq!(check.check(&required), None);
    }
}
