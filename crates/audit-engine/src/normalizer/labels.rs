use std::collections::HashMap;

use ux_types::RawNode;

use super::attrs::Attributes;
use super::text::label_text;

/// Text of every `<label for="...">` in the tree, keyed by the `for` target
///
/// The first label wins when several point at the same control.
pub fn collect_label_targets(root: &RawNode, max_chars: usize) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        let RawNode::Element {
            tag_name,
            attributes,
            children,
            ..
        } = node
        else {
            continue;
        };
        if tag_name.eq_ignore_ascii_case("label") {
            if let Some(target) = Attributes(attributes).get("for") {
                let text = label_text(node, max_chars);
                if !text.is_empty() {
                    labels.entry(target.trim().to_string()).or_insert(text);
                }
            }
        }
        stack.extend(children.iter().rev());
    }

    labels
}
