use ux_types::{ElementType, Issue, Severity, UIElement};

use super::{UsabilityCheck, FONT_SIZE_RULE_ID};

/// Smallest comfortable body text size
pub const MIN_FONT_SIZE_PX: f64 = 14.0;

pub struct FontSizeCheck;

impl UsabilityCheck for FontSizeCheck {
    fn id(&self) -> &str {
        FONT_SIZE_RULE_ID
    }

    fn name(&self) -> &str {
        "Readable font size"
    }

    fn check(&self, element: &UIElement) -> Option<Issue> {
        if !matches!(element.element_type, ElementType::Text | ElementType::Heading) {
            return None;
        }
        let px = element.font_size_px()?;
        if px >= MIN_FONT_SIZE_PX {
            return None;
        }

        Some(Issue::for_element(
            element,
            FONT_SIZE_RULE_ID,
            Severity::Medium,
            format!(
                "Text is set at {}px, smaller than the recommended 14px, which makes it hard to read.",
                px
            ),
            "Increase body text to at least 14px so it stays readable on every screen.",
            format!("font_size={}px", px),
        ))
    }
}
