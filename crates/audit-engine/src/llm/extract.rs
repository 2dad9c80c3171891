//! Recovery of a JSON issue list from free-text LLM output

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};
use ux_types::Issue;

use super::ResponseParseError;

lazy_static! {
    static ref FENCED_BLOCK: Regex = Regex::new(r"```(?:[A-Za-z]+)?\s*([\s\S]*?)\s*```").unwrap();
}

/// Extract the JSON value holding the issue list from free text
///
/// Strategies in order: the whole text, each fenced code block, then a
/// balanced-bracket scan starting at every `[` or `{`. The first candidate
/// shaped like an issue list wins; otherwise the first JSON value found.
pub fn extract_json(text: &str) -> Result<Value, ResponseParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ResponseParseError::Empty);
    }

    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    let fenced = FENCED_BLOCK
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|block| match serde_json::from_str::<Value>(block.as_str()) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Fenced block is not valid JSON: {}", e);
                None
            }
        });
    let scanned = text
        .char_indices()
        .filter(|(_, c)| *c == '[' || *c == '{')
        .filter_map(|(start, _)| {
            let end = balanced_end(&text[start..])?;
            serde_json::from_str::<Value>(&text[start..start + end]).ok()
        });

    let mut first = None;
    for value in fenced.chain(scanned) {
        if is_issue_list_shaped(&value) {
            return Ok(value);
        }
        first.get_or_insert(value);
    }
    first.ok_or(ResponseParseError::NoJson)
}

/// An array of objects, or an object carrying an `issues` array
fn is_issue_list_shaped(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(Value::is_object),
        Value::Object(map) => matches!(map.get("issues"), Some(Value::Array(_))),
        _ => false,
    }
}

/// Byte length of the bracketed span opening at the start of `s`
fn balanced_end(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

/// Candidate issues from an array or an `{"issues": [...]}` object
///
/// Entries that do not describe an issue are skipped with a warning.
pub fn parse_issue_list(value: Value) -> Result<Vec<Issue>, ResponseParseError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("issues") {
            Some(Value::Array(items)) => items,
            _ => return Err(ResponseParseError::NotAnIssueList),
        },
        _ => return Err(ResponseParseError::NotAnIssueList),
    };

    let total = items.len();
    let issues: Vec<Issue> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Issue>(normalize_entry(item)) {
            Ok(mut issue) => {
                issue.confidence = issue.confidence.clamp(0.0, 1.0);
                Some(issue)
            }
            Err(e) => {
                warn!("Skipping malformed LLM issue #{}: {}", index, e);
                None
            }
        })
        .collect();

    debug!("Parsed {} of {} LLM issue entries", issues.len(), total);
    Ok(issues)
}

/// Lower-case severity and type so "High" and "Accessibility" are accepted
fn normalize_entry(mut item: Value) -> Value {
    for field in ["severity", "type"] {
        if let Some(Value::String(value)) = item.get_mut(field) {
            *value = value.trim().to_lowercase();
        }
    }
    item
}

/// `extract_json` followed by `parse_issue_list`
pub fn parse_response(text: &str) -> Result<Vec<Issue>, ResponseParseError> {
    parse_issue_list(extract_json(text)?)
}
