//! Actionable suggestions for the report

use ux_types::Issue;

use crate::rules::{
    ALT_TEXT_RULE_ID, ARIA_LABEL_RULE_ID, CLICKABLE_SIZE_RULE_ID, CONTRAST_RULE_ID,
    FONT_SIZE_RULE_ID, FORM_LABEL_RULE_ID, REQUIRED_FIELD_RULE_ID,
};

/// Suggestions this short are treated as missing
pub const MIN_SUGGESTION_CHARS: usize = 10;

const GENERIC_SUGGESTION: &str = "Review the problem description and the element in context, then apply the fix recommended by the relevant web standard or design guideline.";

/// Step-by-step fix for a rule, or a generic one for unknown rules
pub fn canned_suggestion(rule_id: &str) -> &'static str {
    match rule_id {
        CONTRAST_RULE_ID => "Darken the text or lighten the background until the contrast ratio reaches at least 4.5:1 (WCAG AA), then verify the pair with a contrast checker.",
        FONT_SIZE_RULE_ID => "Raise body text to at least 14px and keep headings larger to preserve a clear visual hierarchy across devices.",
        CLICKABLE_SIZE_RULE_ID => "Enlarge the clickable element to at least 44x44px, or add padding to extend its hit area so it is easy to tap.",
        FORM_LABEL_RULE_ID => "Associate a visible <label> with the control, or provide an aria-label so assistive technology can announce its purpose.",
        REQUIRED_FIELD_RULE_ID => "Mark required fields with an asterisk or the word \"required\", and explain the marker in the form instructions.",
        ARIA_LABEL_RULE_ID => "Give the interactive element a descriptive aria-label, or make sure it contains visible text that explains what it does.",
        ALT_TEXT_RULE_ID => "Add a descriptive alt attribute that states the image's content or function; decorative images should use an empty alt=\"\".",
        _ => GENERIC_SUGGESTION,
    }
}

/// Replace missing or throwaway suggestions with the rule's canned fix
pub fn ensure_actionable_suggestions(issues: Vec<Issue>) -> Vec<Issue> {
    issues
        .into_iter()
        .map(|mut issue| {
            if issue.suggestion.trim().chars().count() <= MIN_SUGGESTION_CHARS {
                issue.suggestion = canned_suggestion(&issue.rule_id).to_string();
            }
            issue
        })
        .collect()
}
