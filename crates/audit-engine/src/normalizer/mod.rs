//! Schema Normalizer
//!
//! Converts a raw crawler snapshot into the flat Unified UI Schema. The walk
//! is depth-first and pre-order over an explicit stack; every visited element
//! and non-blank text node gets the next sequential id (`e1`, `e2`, ...).
//!
//! The root node is a container only: it is not emitted, and its own path
//! segment starts every `dom_path`.

mod attrs;
mod labels;
pub mod style;
mod tables;
mod text;

pub use tables::{default_font_size_for, default_role_for, element_type_for};
pub use text::truncate_chars;

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use tracing::{debug, info};
use ux_types::schema::{PATH_SEPARATOR, TEXT_TAG};
use ux_types::{
    AriaInfo, BoundingBox, ComputedStyle, ElementType, PageMeta, Provenance, RawNode,
    RawSnapshot, UIElement, UnifiedSchema, Viewport,
};

use crate::config::NormalizerConfig;
use attrs::Attributes;
use style::{contrast_ratio, effective_background, parse_color, Rgba};
use tables::{CLICKABLE_TAGS, FORM_CONTROL_TAGS};
use text::{element_text, label_text};

/// Converts raw snapshots into [`UnifiedSchema`] values
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

/// What a node takes from its nearest element ancestor
#[derive(Debug, Default)]
struct Inherited {
    path: String,
    selector: String,
    color: Option<Rgba>,
    background: Option<Rgba>,
    font_size: String,
    enclosing_label: Option<String>,
}

/// Parsed subset of an element's computed style
#[derive(Debug, Default)]
struct Style {
    color: Option<Rgba>,
    background: Option<Rgba>,
    font_size: Option<String>,
}

impl Style {
    fn of(computed: Option<&ComputedStyle>) -> Self {
        let Some(computed) = computed else {
            return Self::default();
        };
        Self {
            color: computed.color.as_deref().and_then(parse_color),
            background: computed.background_color.as_deref().and_then(parse_color),
            font_size: computed
                .font_size
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize a snapshot
    ///
    /// `None` in gives `None` out: "no data" stays distinguishable from a
    /// page with zero elements.
    pub fn normalize(&self, snapshot: Option<&RawSnapshot>, page_url: &str) -> Option<UnifiedSchema> {
        let snapshot = snapshot?;

        let elements = match &snapshot.dom_tree {
            Some(root) => self.flatten(root),
            None => {
                debug!("Snapshot for {} has no DOM tree", page_url);
                Vec::new()
            }
        };

        info!(
            "Normalized {} elements ({} axe violations) for {}",
            elements.len(),
            snapshot.axe_violations.len(),
            page_url
        );

        Some(UnifiedSchema {
            page_meta: PageMeta {
                source_type: "url".to_string(),
                page_url: page_url.to_string(),
                viewport: Viewport {
                    width: self.config.viewport_width,
                    height: self.config.viewport_height,
                },
                platform: self.config.platform.clone(),
                total_elements: elements.len(),
                truncated: false,
            },
            elements,
            axe_issues: snapshot.axe_violations.clone(),
            key_user_flow: None,
        })
    }

    fn flatten(&self, root: &RawNode) -> Vec<UIElement> {
        let RawNode::Element {
            tag_name,
            attributes,
            children,
            computed_style,
            ..
        } = root
        else {
            debug!("DOM root is not an element, nothing to normalize");
            return Vec::new();
        };

        let max_chars = self.config.max_text_chars;
        let labels = labels::collect_label_targets(root, max_chars);

        let tag = tag_name.trim().to_ascii_lowercase();
        let attrs = Attributes(attributes);
        let style = Style::of(computed_style.as_ref());
        let root_context = Rc::new(Inherited {
            path: path_segment(&tag, attrs),
            selector: css_selector(&tag, attrs),
            color: style.color,
            background: effective_background(style.background, None),
            font_size: style
                .font_size
                .unwrap_or_else(|| default_font_size_for(&tag).to_string()),
            enclosing_label: (tag == "label")
                .then(|| label_text(root, max_chars))
                .filter(|l| !l.is_empty()),
        });

        let mut elements = Vec::new();
        let mut next_id = 1usize;
        let mut stack: Vec<(&RawNode, Rc<Inherited>)> = children
            .iter()
            .rev()
            .map(|child| (child, Rc::clone(&root_context)))
            .collect();

        while let Some((node, parent)) = stack.pop() {
            match node {
                RawNode::Text { content } => {
                    let content = content.trim();
                    if content.is_empty() {
                        continue;
                    }
                    elements.push(self.text_element(next_id, content, &parent));
                    next_id += 1;
                }
                RawNode::Element { children, .. } => {
                    let Some((element, context)) = self.element(next_id, node, &parent, &labels)
                    else {
                        continue;
                    };
                    next_id += 1;
                    elements.push(element);
                    let context = Rc::new(context);
                    stack.extend(
                        children
                            .iter()
                            .rev()
                            .map(|child| (child, Rc::clone(&context))),
                    );
                }
                RawNode::Other => {}
            }
        }

        elements
    }

    fn element(
        &self,
        id: usize,
        node: &RawNode,
        parent: &Inherited,
        labels: &HashMap<String, String>,
    ) -> Option<(UIElement, Inherited)> {
        let RawNode::Element {
            tag_name,
            attributes,
            children,
            bounding_box,
            computed_style,
        } = node
        else {
            return None;
        };

        let max_chars = self.config.max_text_chars;
        let tag = tag_name.trim().to_ascii_lowercase();
        let attrs = Attributes(attributes);
        let style = Style::of(computed_style.as_ref());

        let dom_path = format!("{}{}{}", parent.path, PATH_SEPARATOR, path_segment(&tag, attrs));
        let selector = css_selector(&tag, attrs);
        let text = element_text(node, max_chars);
        let font_size = style
            .font_size
            .unwrap_or_else(|| default_font_size_for(&tag).to_string());
        let color = style.color.or(parent.color);
        let background = effective_background(style.background, parent.background);

        // Only elements that paint text themselves get a ratio; ancestors
        // would otherwise repeat their children's finding.
        let paints_text = children
            .iter()
            .any(|c| matches!(c, RawNode::Text { content } if !content.trim().is_empty()))
            || (FORM_CONTROL_TAGS.contains(&tag.as_str()) && !text.is_empty());
        let contrast = match (paints_text, color, background) {
            (true, Some(fg), Some(bg)) => Some(contrast_ratio(fg, bg)),
            _ => None,
        };

        let input_type = attrs.get("type").map(|t| t.trim().to_ascii_lowercase());
        let element = UIElement {
            id: format!("e{}", id),
            element_type: element_type_for(&tag, input_type.as_deref()),
            text,
            dom_path: dom_path.clone(),
            css_selector: selector.clone(),
            aria: AriaInfo {
                role: attrs
                    .role()
                    .map(str::to_string)
                    .unwrap_or_else(|| default_role_for(&tag).to_string()),
                label: truncate_chars(&resolve_label(&tag, attrs, parent, labels), max_chars),
            },
            is_clickable: CLICKABLE_TAGS.contains(&tag.as_str()) || attrs.has_click_signal(),
            is_required: attrs.is_required(),
            contrast_ratio: contrast,
            font_size: Some(font_size.clone()),
            bounding_box: bounding_box.map(BoundingBox::from),
            confidence: self.config.element_confidence,
            source: BTreeSet::from([Provenance::Dom]),
            tag: tag.clone(),
        };

        let enclosing_label = if tag == "label" {
            Some(label_text(node, max_chars)).filter(|l| !l.is_empty())
        } else {
            parent.enclosing_label.clone()
        };

        let context = Inherited {
            path: dom_path,
            selector,
            color,
            background,
            font_size,
            enclosing_label,
        };
        Some((element, context))
    }

    fn text_element(&self, id: usize, content: &str, parent: &Inherited) -> UIElement {
        UIElement {
            id: format!("e{}", id),
            element_type: ElementType::Text,
            tag: TEXT_TAG.to_string(),
            text: truncate_chars(content, self.config.max_text_chars),
            dom_path: parent.path.clone(),
            css_selector: parent.selector.clone(),
            aria: AriaInfo {
                role: "text".to_string(),
                label: String::new(),
            },
            is_clickable: false,
            is_required: false,
            contrast_ratio: None,
            font_size: Some(parent.font_size.clone()),
            bounding_box: None,
            confidence: self.config.text_confidence,
            source: BTreeSet::from([Provenance::Dom]),
        }
    }
}

/// `tag#id`, else `tag.class1.class2`, else `tag`
fn path_segment(tag: &str, attrs: Attributes<'_>) -> String {
    if let Some(id) = attrs.id() {
        return format!("{}#{}", tag, id);
    }
    let classes = attrs.classes();
    if classes.is_empty() {
        tag.to_string()
    } else {
        format!("{}.{}", tag, classes.join("."))
    }
}

/// `#id`, else `tag.class1.class2`, else `tag`
fn css_selector(tag: &str, attrs: Attributes<'_>) -> String {
    match attrs.id() {
        Some(id) => format!("#{}", id),
        None => path_segment(tag, attrs),
    }
}

/// aria-label, alt (images), associated label (form controls), title
fn resolve_label(
    tag: &str,
    attrs: Attributes<'_>,
    parent: &Inherited,
    labels: &HashMap<String, String>,
) -> String {
    if let Some(label) = attrs.get("aria-label") {
        return label.trim().to_string();
    }
    if tag == "img" {
        if let Some(alt) = attrs.get("alt") {
            return alt.trim().to_string();
        }
    }
    if FORM_CONTROL_TAGS.contains(&tag) {
        if let Some(label) = attrs.id().and_then(|id| labels.get(id)) {
            return label.clone();
        }
        if let Some(label) = &parent.enclosing_label {
            return label.clone();
        }
    }
    attrs
        .get("title")
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{Map, Value};
    use std::collections::HashSet;

    // ============================================================
    // PROPERTY TESTS
    // ============================================================

    fn arb_child() -> impl Strategy<Value = RawNode> {
        prop_oneof![
            "[ a-z]{0,12}".prop_map(|t| RawNode::text(&t)),
            (
                prop::sample::select(vec!["div", "button", "img", "input", "h2", "marquee"]),
                prop::option::of("[a-z]{1,6}"),
                "[ a-z]{0,12}",
            )
                .prop_map(|(tag, class, text)| {
                    let mut attributes = Map::new();
                    if let Some(class) = class {
                        attributes.insert("class".to_string(), Value::String(class));
                    }
                    RawNode::element(tag, attributes, vec![RawNode::text(&text)])
                }),
            Just(RawNode::Other),
        ]
    }

    proptest! {
        #[test]
        fn ids_are_unique_and_sequential(children in prop::collection::vec(arb_child(), 0..40)) {
            let root = RawNode::element("body", Map::new(), children);
            let raw = RawSnapshot { dom_tree: Some(root), ..RawSnapshot::default() };
            let schema = Normalizer::default().normalize(Some(&raw), "u").unwrap();

            let ids: HashSet<&str> = schema.elements.iter().map(|e| e.id.as_str()).collect();
            prop_assert_eq!(ids.len(), schema.elements.len());
            for (i, e) in schema.elements.iter().enumerate() {
                prop_assert_eq!(&e.id, &format!("e{}", i + 1));
                prop_assert!(e.dom_path.starts_with("body"));
                prop_assert!(e.text.chars().count() <= 100);
                prop_assert!(e.tag != "#text" || !e.text.trim().is_empty());
            }
        }
    }
}
