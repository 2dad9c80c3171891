//! Static per-tag lookup tables
//!
//! Each table has an explicit fallback for unknown tags: `generic` type,
//! `generic` role and a 16px font size.

use ux_types::ElementType;

/// Tags that are clickable without any further signal
pub const CLICKABLE_TAGS: &[&str] = &["button", "a", "input", "select", "textarea"];

/// Form controls that take a `<label>`
pub const FORM_CONTROL_TAGS: &[&str] = &["input", "select", "textarea"];

pub const DEFAULT_FONT_SIZE: &str = "16px";

/// Element type for a tag; `input_type` is the input's `type` attribute
pub fn element_type_for(tag: &str, input_type: Option<&str>) -> ElementType {
    match tag {
        "button" => ElementType::Button,
        "input" => match input_type {
            Some("submit") | Some("button") | Some("reset") => ElementType::Button,
            _ => ElementType::Input,
        },
        "textarea" | "select" => ElementType::Input,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => ElementType::Heading,
        "img" => ElementType::Image,
        "a" => ElementType::Link,
        "nav" => ElementType::Nav,
        "header" => ElementType::Banner,
        "footer" => ElementType::Contentinfo,
        "aside" => ElementType::Complementary,
        "main" => ElementType::Main,
        "form" => ElementType::Form,
        "section" => ElementType::Region,
        "article" => ElementType::Article,
        _ => ElementType::Generic,
    }
}

/// Implicit ARIA role for a tag
pub fn default_role_for(tag: &str) -> &'static str {
    match tag {
        "button" => "button",
        "input" | "textarea" => "textbox",
        "select" => "combobox",
        "a" => "link",
        "img" => "img",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
        "nav" => "navigation",
        "header" => "banner",
        "footer" => "contentinfo",
        "aside" => "complementary",
        "main" => "main",
        "form" => "form",
        "section" => "region",
        "article" => "article",
        _ => "generic",
    }
}

/// User-agent default font size for a tag
pub fn default_font_size_for(tag: &str) -> &'static str {
    match tag {
        "h1" => "32px",
        "h2" => "24px",
        "h3" => "18px",
        "h4" => "16px",
        "h5" => "14px",
        "h6" => "12px",
        "p" => "16px",
        "button" => "14px",
        "input" => "16px",
        _ => DEFAULT_FONT_SIZE,
    }
}
