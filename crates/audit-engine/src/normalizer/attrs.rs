//! Attribute access with malformed-value recovery
//!
//! Crawlers occasionally hand over non-string attribute values (arrays,
//! objects, numbers). Those are treated as absent, never coerced.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy)]
pub struct Attributes<'a>(pub &'a Map<String, Value>);

impl<'a> Attributes<'a> {
    /// Attribute value when it is a non-blank string
    pub fn get(&self, name: &str) -> Option<&'a str> {
        match self.0.get(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// HTML boolean attribute: present as any string (usually `""`) or `true`
    pub fn flag(&self, name: &str) -> bool {
        match self.0.get(name) {
            Some(Value::String(s)) => !s.eq_ignore_ascii_case("false"),
            Some(Value::Bool(b)) => *b,
            _ => false,
        }
    }

    pub fn id(&self) -> Option<&'a str> {
        self.get("id").map(str::trim)
    }

    /// Class tokens from `class`, falling back to `className`
    pub fn classes(&self) -> Vec<&'a str> {
        self.get("class")
            .or_else(|| self.get("className"))
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn role(&self) -> Option<&'a str> {
        self.get("role").map(str::trim)
    }

    pub fn is_required(&self) -> bool {
        self.flag("required")
            || self
                .get("aria-required")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    /// Explicit click signal: an `onclick` handler or `role="button"`
    pub fn has_click_signal(&self) -> bool {
        self.get("onclick").is_some()
            || self
                .role()
                .is_some_and(|r| r.eq_ignore_ascii_case("button"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_non_string_values_are_absent() {
        let map = attrs(json!({"class": ["a", "b"], "id": 42, "title": {"x": 1}}));
        let a = Attributes(&map);
        assert!(a.classes().is_empty());
        assert_eq!(a.id(), None);
        assert_eq!(a.get("title"), None);
    }

    #[test]
    fn test_class_fallback_and_whitespace() {
        let map = attrs(json!({"className": "  btn   btn-primary "}));
        assert_eq!(Attributes(&map).classes(), vec!["btn", "btn-primary"]);
    }

    #[test]
    fn test_boolean_flags() {
        let map = attrs(json!({"required": "", "disabled": "false"}));
        let a = Attributes(&map);
        assert!(a.flag("required"));
        assert!(!a.flag("disabled"));
        assert!(a.is_required());

        let map = attrs(json!({"aria-required": "TRUE"}));
        assert!(Attributes(&map).is_required());
    }

    #[test]
    fn test_click_signal() {
        let map = attrs(json!({"role": "Button"}));
        assert!(Attributes(&map).has_click_signal());
        let map = attrs(json!({"onclick": "go()"}));
        assert!(Attributes(&map).has_click_signal());
        let map = attrs(json!({"onclick": ""}));
        assert!(!Attributes(&map).has_click_signal());
    }
}
