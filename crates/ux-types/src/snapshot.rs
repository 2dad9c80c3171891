//! Raw page snapshot supplied by the browser-automation layer
//!
//! Crawler output is loosely typed. A field of the wrong JSON type (a `null`
//! attribute map, a numeric `fontSize`, a child node without a tag) is
//! treated as absent, so one bad value never rejects the whole snapshot.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The field's value, or its default when it has the wrong shape
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Well-formed entries of a list; malformed entries and non-lists are dropped
fn valid_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}

/// Everything the crawler captured for one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default, alias = "domTree", alias = "domNodes", deserialize_with = "or_default")]
    pub dom_tree: Option<RawNode>,
    /// Opaque accessibility-tree dump
    ///
    /// Accepted so crawler output parses as-is. Normalization does not read
    /// it: roles and labels come from DOM attributes, and it is not carried
    /// into the schema.
    #[serde(default, alias = "accessibilityTree")]
    pub accessibility_tree: Option<Value>,
    #[serde(default, alias = "axeViolations", deserialize_with = "valid_entries")]
    pub axe_violations: Vec<AxeViolation>,
}

/// One node of the captured DOM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawNode {
    Element {
        #[serde(rename = "tagName", alias = "tag_name")]
        tag_name: String,
        /// Attribute values are kept as JSON so malformed (non-string) values
        /// can be detected and ignored instead of crashing the normalizer
        #[serde(default, deserialize_with = "or_default")]
        attributes: Map<String, Value>,
        #[serde(default, deserialize_with = "valid_entries")]
        children: Vec<RawNode>,
        #[serde(
            default,
            rename = "boundingBox",
            alias = "bounding_box",
            alias = "bbox",
            deserialize_with = "or_default"
        )]
        bounding_box: Option<RawBoundingBox>,
        #[serde(
            default,
            rename = "computedStyle",
            alias = "computed_style",
            deserialize_with = "or_default"
        )]
        computed_style: Option<ComputedStyle>,
    },
    Text {
        #[serde(default, deserialize_with = "or_default")]
        content: String,
    },
    /// Comments, processing instructions and anything else the crawler emits
    #[serde(other)]
    Other,
}

impl RawNode {
    /// Element node with only a tag and attributes, mostly for tests and fixtures
    pub fn element(tag: &str, attributes: Map<String, Value>, children: Vec<RawNode>) -> Self {
        RawNode::Element {
            tag_name: tag.to_string(),
            attributes,
            children,
            bounding_box: None,
            computed_style: None,
        }
    }

    pub fn text(content: &str) -> Self {
        RawNode::Text {
            content: content.to_string(),
        }
    }
}

/// Box as reported by the crawler, either `{x,y,width,height}` or `[x,y,w,h]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawBoundingBox {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Array([f64; 4]),
}

impl From<RawBoundingBox> for crate::schema::BoundingBox {
    fn from(raw: RawBoundingBox) -> Self {
        match raw {
            RawBoundingBox::Rect {
                x,
                y,
                width,
                height,
            } => Self::new(x, y, width, height),
            RawBoundingBox::Array(arr) => Self::from(arr),
        }
    }
}

/// Subset of computed CSS the rule checks care about
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyle {
    #[serde(default, deserialize_with = "or_default")]
    pub color: Option<String>,
    #[serde(default, alias = "background", deserialize_with = "or_default")]
    pub background_color: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub font_size: Option<String>,
}

/// A violation reported by an axe-core run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxeViolation {
    pub id: String,
    /// `critical`, `serious`, `moderate` or `minor`
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub help_url: Option<String>,
    #[serde(default, deserialize_with = "valid_entries")]
    pub nodes: Vec<AxeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxeNode {
    #[serde(default, deserialize_with = "valid_entries")]
    pub target: Vec<String>,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub failure_summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BoundingBox;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parses_crawler_dom_shape() {
        let json = r#"{
            "domTree": {
                "type": "element",
                "tagName": "body",
                "attributes": {"class": ["not", "a", "string"]},
                "children": [
                    {"type": "text", "content": "Hello"},
                    {"type": "comment"},
                    {"type": "element", "tagName": "img", "boundingBox": {"x": 1, "y": 2, "width": 3, "height": 4}}
                ]
            },
            "axeViolations": [
                {"id": "image-alt", "impact": "critical", "nodes": [{"target": ["img"], "html": "<img>"}]}
            ]
        }"#;
        let snapshot: RawSnapshot = serde_json::from_str(json).unwrap();

        let Some(RawNode::Element { children, attributes, .. }) = &snapshot.dom_tree else {
            panic!("expected element root");
        };
        assert!(attributes["class"].is_array());
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], RawNode::text("Hello"));
        assert_eq!(children[1], RawNode::Other);
        let RawNode::Element { bounding_box, .. } = &children[2] else {
            panic!("expected img element");
        };
        assert_eq!(
            bounding_box.map(BoundingBox::from),
            Some(BoundingBox::new(1.0, 2.0, 3.0, 4.0))
        );
        assert_eq!(snapshot.axe_violations[0].impact.as_deref(), Some("critical"));
    }

    #[test]
    fn test_array_bounding_box() {
        let raw: RawBoundingBox = serde_json::from_str("[0, 0, 30, 30]").unwrap();
        assert_eq!(BoundingBox::from(raw), BoundingBox::new(0.0, 0.0, 30.0, 30.0));
    }

    #[test]
    fn test_malformed_fields_are_absent() {
        let json = r##"{
            "dom_tree": {
                "type": "element",
                "tagName": "body",
                "attributes": null,
                "children": [
                    {"type": "element", "tagName": "div", "attributes": {"id": "a"}, "children": null},
                    {"type": "text", "content": null},
                    {"type": "element", "attributes": {}},
                    {"type": "element", "tagName": "p", "computedStyle": {"fontSize": 12, "color": "#333"}},
                    {"type": "element", "tagName": "span", "computedStyle": "bold", "boundingBox": [1, 2]}
                ]
            },
            "axe_violations": [{"impact": "minor"}, {"id": "label", "nodes": null}]
        }"##;
        let snapshot: RawSnapshot = serde_json::from_str(json).unwrap();

        let Some(RawNode::Element { attributes, children, .. }) = &snapshot.dom_tree else {
            panic!("expected element root");
        };
        assert!(attributes.is_empty());
        // the tag-less element is dropped, the rest survive
        assert_eq!(children.len(), 4);

        let RawNode::Element { children: div_children, .. } = &children[0] else {
            panic!("expected div");
        };
        assert!(div_children.is_empty());
        assert_eq!(children[1], RawNode::text(""));

        let RawNode::Element { computed_style, .. } = &children[2] else {
            panic!("expected p");
        };
        assert_eq!(
            computed_style.clone(),
            Some(ComputedStyle {
                color: Some("#333".to_string()),
                background_color: None,
                font_size: None,
            })
        );

        let RawNode::Element { computed_style, bounding_box, .. } = &children[3] else {
            panic!("expected span");
        };
        assert_eq!(computed_style, &None);
        assert_eq!(bounding_box, &None);

        assert_eq!(snapshot.axe_violations.len(), 1);
        assert_eq!(snapshot.axe_violations[0].id, "label");
        assert!(snapshot.axe_violations[0].nodes.is_empty());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot: RawSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, RawSnapshot::default());
    }
}
