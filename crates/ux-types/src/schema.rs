//! Unified UI Schema
//!
//! A flat, provenance-tagged list of page elements. There are no parent or
//! child references: hierarchy is recovered only by `dom_path` prefix
//! matching (see [`UnifiedSchema::ancestors_of`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Path segment separator inside `dom_path`
pub const PATH_SEPARATOR: char = '>';

/// Tag recorded for text nodes
pub const TEXT_TAG: &str = "#text";

/// Closed set of element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Button,
    Input,
    Heading,
    Image,
    Link,
    Nav,
    Banner,
    Contentinfo,
    Complementary,
    Main,
    Form,
    Region,
    Article,
    Text,
    Generic,
}

impl ElementType {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Button => "button",
            ElementType::Input => "input",
            ElementType::Heading => "heading",
            ElementType::Image => "image",
            ElementType::Link => "link",
            ElementType::Nav => "nav",
            ElementType::Banner => "banner",
            ElementType::Contentinfo => "contentinfo",
            ElementType::Complementary => "complementary",
            ElementType::Main => "main",
            ElementType::Form => "form",
            ElementType::Region => "region",
            ElementType::Article => "article",
            ElementType::Text => "text",
            ElementType::Generic => "generic",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a fact about an element was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Dom,
    Ocr,
    Vision,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AriaInfo {
    pub role: String,
    #[serde(default)]
    pub label: String,
}

/// Element box in page coordinates, serialized as `[x, y, width, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([x, y, width, height]: [f64; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x, b.y, b.width, b.height]
    }
}

/// One node of the Unified UI Schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UIElement {
    /// Unique within one schema instance only
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Lower-case tag name, `#text` for text nodes
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub text: String,
    /// Human-readable locator, not guaranteed unique
    #[serde(default)]
    pub dom_path: String,
    #[serde(default)]
    pub css_selector: String,
    #[serde(default)]
    pub aria: AriaInfo,
    #[serde(default)]
    pub is_clickable: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast_ratio: Option<f64>,
    /// CSS length such as `"14px"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, alias = "bbox", skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    pub confidence: f64,
    #[serde(default)]
    pub source: BTreeSet<Provenance>,
}

impl UIElement {
    /// Font size in pixels, `None` when absent or not a `px` length
    pub fn font_size_px(&self) -> Option<f64> {
        let raw = self.font_size.as_deref()?.trim();
        let number = raw.strip_suffix("px")?.trim();
        number.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Number of segments in `dom_path`
    pub fn depth(&self) -> usize {
        if self.dom_path.is_empty() {
            0
        } else {
            self.dom_path.split(PATH_SEPARATOR).count()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub source_type: String,
    pub page_url: String,
    pub viewport: Viewport,
    pub platform: String,
    /// Element count of the full normalized schema
    pub total_elements: usize,
    /// True on a bounded view produced by [`UnifiedSchema::bounded`]
    #[serde(default)]
    pub truncated: bool,
}

/// The page's key conversion action, located in the schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyUserFlow {
    pub action_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_element_id: Option<String>,
}

/// Normalized page representation shared by every rule and scoring stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedSchema {
    pub page_meta: PageMeta,
    pub elements: Vec<UIElement>,
    #[serde(default)]
    pub axe_issues: Vec<crate::snapshot::AxeViolation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_user_flow: Option<KeyUserFlow>,
}

impl UnifiedSchema {
    pub fn element(&self, id: &str) -> Option<&UIElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Caller-visible truncated view: the first `max_elements` in visitation order
    pub fn bounded(&self, max_elements: usize) -> UnifiedSchema {
        let truncated = self.elements.len() > max_elements;
        let mut view = UnifiedSchema {
            page_meta: self.page_meta.clone(),
            elements: self.elements.iter().take(max_elements).cloned().collect(),
            axe_issues: self.axe_issues.clone(),
            key_user_flow: self.key_user_flow.clone(),
        };
        view.page_meta.truncated = self.page_meta.truncated || truncated;
        view
    }

    pub fn with_key_user_flow(mut self, flow: KeyUserFlow) -> UnifiedSchema {
        self.key_user_flow = Some(flow);
        self
    }

    /// Elements whose path is a proper segment prefix of the element's path
    ///
    /// Text nodes share their parent's path and are never ancestors; for a
    /// text node the elements at its own path count as containers. Because
    /// paths are not unique, same-path siblings of real ancestors are included.
    pub fn ancestors_of(&self, id: &str) -> Vec<&UIElement> {
        let Some(target) = self.element(id) else {
            return Vec::new();
        };
        let is_text = target.tag == TEXT_TAG;
        self.elements
            .iter()
            .filter(|e| e.id != target.id && e.tag != TEXT_TAG)
            .filter(|e| {
                is_path_prefix(&e.dom_path, &target.dom_path)
                    || (is_text && e.dom_path == target.dom_path)
            })
            .collect()
    }

    /// Elements below the element: deeper paths under it plus its text nodes
    pub fn descendants_of(&self, id: &str) -> Vec<&UIElement> {
        let Some(parent) = self.element(id) else {
            return Vec::new();
        };
        if parent.tag == TEXT_TAG {
            return Vec::new();
        }
        self.elements
            .iter()
            .filter(|e| e.id != parent.id)
            .filter(|e| {
                is_path_prefix(&parent.dom_path, &e.dom_path)
                    || (e.tag == TEXT_TAG && e.dom_path == parent.dom_path)
            })
            .collect()
    }
}

/// True when `prefix` is a strict, segment-aligned prefix of `path`
pub fn is_path_prefix(prefix: &str, path: &str) -> bool {
    if prefix.is_empty() || prefix.len() >= path.len() {
        return false;
    }
    path.starts_with(prefix) && path[prefix.len()..].starts_with(PATH_SEPARATOR)
}
