//! Key user flow location
//!
//! Finds the element a plain-language action description ("点击免费试用按钮",
//! "Click the Sign up button") refers to.

use tracing::debug;
use ux_types::{KeyUserFlow, UIElement, UnifiedSchema};

const CJK_FILLER: &[&str] = &["点击", "单击", "轻触", "按下", "按钮", "链接"];

const ENGLISH_FILLER: &[&str] = &["click", "tap", "press", "on", "the", "a", "button", "link"];

/// Core of an action description with verbs and generic nouns removed
pub fn action_target(description: &str) -> String {
    let mut core = description.to_string();
    for filler in CJK_FILLER {
        core = core.replace(filler, " ");
    }
    core.split_whitespace()
        .filter(|word| !ENGLISH_FILLER.contains(&word.to_lowercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn mentions(element: &UIElement, target: &str) -> bool {
    element.text.to_lowercase().contains(target) || element.aria.label.to_lowercase().contains(target)
}

/// Locate the key action in the schema
///
/// The first clickable element whose text or label contains the described
/// target wins. Without a match the flow carries the description only.
pub fn infer_key_user_flow(schema: &UnifiedSchema, description: &str) -> KeyUserFlow {
    let target = action_target(description);
    let element = (!target.is_empty())
        .then(|| {
            schema
                .elements
                .iter()
                .find(|e| e.is_clickable && mentions(e, &target))
        })
        .flatten();

    match element {
        Some(e) => debug!("Key action '{}' resolved to {} ({})", description, e.id, e.css_selector),
        None => debug!("Key action '{}' did not match any clickable element", description),
    }

    KeyUserFlow {
        action_description: description.trim().to_string(),
        action_selector: element.map(|e| e.css_selector.clone()),
        action_element_id: element.map(|e| e.id.clone()),
    }
}
