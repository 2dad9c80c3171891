//! Text contrast against WCAG 2.x AA

use ux_types::{Issue, Severity, UIElement};

use super::{UsabilityCheck, CONTRAST_RULE_ID};

/// WCAG AA minimum for body text
pub const MIN_CONTRAST_RATIO: f64 = 4.5;

/// Below this ratio the issue is raised to high severity
pub const SEVERE_CONTRAST_RATIO: f64 = 3.0;

pub struct ContrastCheck;

impl UsabilityCheck for ContrastCheck {
    fn id(&self) -> &str {
        CONTRAST_RULE_ID
    }

    fn name(&self) -> &str {
        "Text contrast"
    }

    fn check(&self, element: &UIElement) -> Option<Issue> {
        let ratio = element.contrast_ratio?;
        if ratio >= MIN_CONTRAST_RATIO {
            return None;
        }

        let severity = if ratio < SEVERE_CONTRAST_RATIO {
            Severity::High
        } else {
            Severity::Medium
        };
        let font = element.font_size.as_deref().unwrap_or("unknown");
        // Rounded down so a failing ratio never prints as 4.50
        let shown = (ratio * 100.0).floor() / 100.0;

        Some(Issue::for_element(
            element,
            CONTRAST_RULE_ID,
            severity,
            format!(
                "Text to background contrast is {:.2}:1, below the WCAG AA minimum of 4.5:1; low-vision users may not be able to read it.",
                shown
            ),
            "Darken the text colour or lighten the background until contrast reaches at least 4.5:1.",
            format!("contrast_ratio={:.2}, font_size={}", shown, font),
        ))
    }
}
