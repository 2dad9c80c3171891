//! Deterministic per-element usability checks
//!
//! Every check reads one element at a time and emits at most one issue for
//! it. Checks never mutate the schema and never consult the clock, so the
//! same schema always yields the same issue list.

pub mod aria;
pub mod contrast;
pub mod font_size;
pub mod form;
pub mod touch_target;

use std::collections::HashMap;

use tracing::debug;
use ux_types::schema::TEXT_TAG;
use ux_types::{Issue, UIElement, UnifiedSchema};

use crate::config::RulesConfig;

pub use aria::{AltTextCheck, AriaLabelCheck};
pub use contrast::ContrastCheck;
pub use font_size::FontSizeCheck;
pub use form::{FormLabelCheck, RequiredFieldCheck};
pub use touch_target::ClickableSizeCheck;

pub const CONTRAST_RULE_ID: &str = "contrast-001";
pub const FONT_SIZE_RULE_ID: &str = "font-size-001";
pub const CLICKABLE_SIZE_RULE_ID: &str = "clickable-size-001";
pub const FORM_LABEL_RULE_ID: &str = "form-label-001";
pub const REQUIRED_FIELD_RULE_ID: &str = "required-field-001";
pub const ARIA_LABEL_RULE_ID: &str = "aria-label-001";
pub const ALT_TEXT_RULE_ID: &str = "alt-text-001";

/// A single quantitative check over one element
pub trait UsabilityCheck: Send + Sync {
    /// Stable rule id carried by every issue this check emits
    fn id(&self) -> &str;

    /// Human-readable name of the check
    fn name(&self) -> &str;

    /// Check one element
    fn check(&self, element: &UIElement) -> Option<Issue>;
}

/// All checks in evaluation order
pub fn default_checks(config: &RulesConfig) -> Vec<Box<dyn UsabilityCheck>> {
    vec![
        Box::new(ContrastCheck),
        Box::new(FontSizeCheck),
        Box::new(ClickableSizeCheck),
        Box::new(FormLabelCheck),
        Box::new(RequiredFieldCheck::new(config.required_field_detection)),
        Box::new(AriaLabelCheck),
        Box::new(AltTextCheck),
    ]
}

/// Runs the fixed, ordered check set over a schema
pub struct RuleEngine {
    checks: Vec<Box<dyn UsabilityCheck>>,
}

impl RuleEngine {
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            checks: default_checks(config),
        }
    }

    pub fn checks(&self) -> impl Iterator<Item = &dyn UsabilityCheck> {
        self.checks.iter().map(|c| &**c as &dyn UsabilityCheck)
    }

    /// Evaluate every element against every check
    ///
    /// Issues come out grouped by element in schema order, then by check order.
    /// A text node whose container already failed the font-size check does
    /// not report it again: both describe the same rendered text.
    pub fn evaluate(&self, schema: &UnifiedSchema) -> Vec<Issue> {
        let mut issues = Vec::new();
        // Latest container seen at each path, and whether its font size failed.
        // In pre-order that container is the parent of any text node at the path.
        let mut small_text_containers: HashMap<&str, bool> = HashMap::new();

        for element in &schema.elements {
            let is_text = element.tag == TEXT_TAG;
            let mut font_size_failed = false;

            for issue in self.checks.iter().filter_map(|c| c.check(element)) {
                if issue.rule_id == FONT_SIZE_RULE_ID {
                    if is_text
                        && small_text_containers
                            .get(element.dom_path.as_str())
                            .copied()
                            .unwrap_or(false)
                    {
                        continue;
                    }
                    font_size_failed = true;
                }
                issues.push(issue);
            }

            if !is_text {
                small_text_containers.insert(element.dom_path.as_str(), font_size_failed);
            }
        }

        debug!(
            "Rule engine produced {} issues from {} elements",
            issues.len(),
            schema.elements.len()
        );
        issues
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(&RulesConfig::default())
    }
}
