//! Business-impact ordering of issues

use std::cmp::Ordering;

use ux_types::Issue;

use crate::context::BusinessContext;

/// Vocabulary of conversion-critical actions
pub const KEY_ACTION_KEYWORDS: &[&str] = &[
    "购买", "注册", "登录", "提交", "确认", "下单", "支付", "buy", "register", "login", "submit",
    "confirm", "order", "pay", "sign up", "checkout",
];

const KEY_ACTION_TAGS: &[&str] = &["button", "a", "input"];

/// Whether an issue sits on an element tied to the page's key action
pub fn is_key_action_issue(issue: &Issue, context: &BusinessContext) -> bool {
    let Some(element) = &issue.element else {
        return false;
    };
    if element.is_clickable || KEY_ACTION_TAGS.contains(&element.tag.as_str()) {
        return true;
    }

    let text = element.text.to_lowercase();
    if text.is_empty() {
        return false;
    }
    KEY_ACTION_KEYWORDS.iter().any(|k| text.contains(k))
        || context
            .key_action
            .as_deref()
            .map(|a| a.trim().to_lowercase())
            .is_some_and(|a| !a.is_empty() && text.contains(&a))
}

/// Order issues by severity, then key-action relevance for conversion goals,
/// then confidence
///
/// The sort is stable: issues with equal keys keep their input order.
pub fn prioritize(mut issues: Vec<Issue>, context: &BusinessContext) -> Vec<Issue> {
    let conversion = context.is_conversion_oriented();
    issues.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| {
                if conversion {
                    is_key_action_issue(b, context).cmp(&is_key_action_issue(a, context))
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
    issues
}
