use ux_types::{Issue, Severity, UIElement};

use super::{UsabilityCheck, CLICKABLE_SIZE_RULE_ID};

/// Common minimum touch target edge
pub const MIN_TOUCH_TARGET_PX: f64 = 44.0;

pub struct ClickableSizeCheck;

impl UsabilityCheck for ClickableSizeCheck {
    fn id(&self) -> &str {
        CLICKABLE_SIZE_RULE_ID
    }

    fn name(&self) -> &str {
        "Touch target size"
    }

    fn check(&self, element: &UIElement) -> Option<Issue> {
        if !element.is_clickable {
            return None;
        }
        let bbox = element.bounding_box?;
        if bbox.width >= MIN_TOUCH_TARGET_PX && bbox.height >= MIN_TOUCH_TARGET_PX {
            return None;
        }

        Some(Issue::for_element(
            element,
            CLICKABLE_SIZE_RULE_ID,
            Severity::Medium,
            format!(
                "Clickable area is {}x{}px, smaller than the recommended 44x44px, so it is easy to miss.",
                bbox.width, bbox.height
            ),
            "Enlarge the clickable area (padding or min-width/min-height) to at least 44x44px.",
            format!("bbox=[{},{},{},{}]", bbox.x, bbox.y, bbox.width, bbox.height),
        ))
    }
}
