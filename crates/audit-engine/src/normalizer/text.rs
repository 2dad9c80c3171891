//! Visible text extraction

use ux_types::RawNode;

use super::attrs::Attributes;
use super::tables::FORM_CONTROL_TAGS;

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Text an element presents to the user, capped at `max_chars`
///
/// Inputs present their `value`, then `placeholder`. Containers present the
/// non-blank text of their descendants joined by single spaces.
pub fn element_text(node: &RawNode, max_chars: usize) -> String {
    gather(node, max_chars, true)
}

/// Text of a `<label>`, without the values of the controls it wraps
pub fn label_text(node: &RawNode, max_chars: usize) -> String {
    gather(node, max_chars, false)
}

fn gather(node: &RawNode, max_chars: usize, include_controls: bool) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut len = 0usize;
    let mut stack: Vec<&RawNode> = vec![node];

    while let Some(current) = stack.pop() {
        // Joined length already past the cap; the rest would be truncated away.
        if len > max_chars {
            break;
        }
        let piece = match current {
            RawNode::Text { content } => Some(content.trim().to_string()),
            RawNode::Element {
                tag_name,
                attributes,
                children,
                ..
            } => {
                let tag = tag_name.to_ascii_lowercase();
                if tag == "input" {
                    include_controls.then(|| input_text(Attributes(attributes)))
                } else if !include_controls && FORM_CONTROL_TAGS.contains(&tag.as_str()) {
                    None
                } else {
                    stack.extend(children.iter().rev());
                    None
                }
            }
            RawNode::Other => None,
        };
        if let Some(piece) = piece.filter(|p| !p.is_empty()) {
            len += piece.chars().count() + usize::from(!parts.is_empty());
            parts.push(piece);
        }
    }

    let joined = parts.join(" ");
    if joined.is_empty() {
        if let RawNode::Element { attributes, tag_name, .. } = node {
            if tag_name.eq_ignore_ascii_case("textarea") {
                return truncate_chars(Attributes(attributes).get("placeholder").unwrap_or(""), max_chars);
            }
        }
    }
    truncate_chars(&joined, max_chars)
}

fn input_text(attrs: Attributes<'_>) -> String {
    attrs
        .get("value")
        .or_else(|| attrs.get("placeholder"))
        .unwrap_or("")
        .trim()
        .to_string()
}
