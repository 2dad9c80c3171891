//! Dimension scoring

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ux_types::{Dimension, Issue};

pub const MAX_SCORE: u32 = 100;

const VISUAL_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "span"];
const FORM_TAGS: &[&str] = &["input", "select", "textarea", "form"];
const NAVIGATION_TAGS: &[&str] = &["a", "nav", "header", "footer"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub dimension_scores: BTreeMap<Dimension, u32>,
    pub overall_score: u32,
}

impl ScoreCard {
    pub fn dimension(&self, dimension: Dimension) -> u32 {
        self.dimension_scores.get(&dimension).copied().unwrap_or(MAX_SCORE)
    }
}

/// Dimension an issue counts against
///
/// An explicit `type` hint wins, then the element's tag family. Anything
/// unattributable lands in `visual`.
pub fn dimension_for(issue: &Issue) -> Dimension {
    if let Some(kind) = issue.kind {
        return kind;
    }
    let Some(tag) = issue.element.as_ref().map(|e| e.tag.as_str()) else {
        return Dimension::Visual;
    };
    if VISUAL_TAGS.contains(&tag) {
        Dimension::Visual
    } else if FORM_TAGS.contains(&tag) {
        Dimension::Form
    } else if NAVIGATION_TAGS.contains(&tag) {
        Dimension::Navigation
    } else {
        Dimension::Visual
    }
}

/// Score issues per dimension, floored at 0, plus the rounded mean
pub fn score(issues: &[Issue]) -> ScoreCard {
    let mut deductions: BTreeMap<Dimension, u32> =
        Dimension::ALL.iter().map(|d| (*d, 0)).collect();
    for issue in issues {
        *deductions.entry(dimension_for(issue)).or_insert(0) += issue.severity.deduction();
    }

    let dimension_scores: BTreeMap<Dimension, u32> = deductions
        .into_iter()
        .map(|(dimension, deducted)| (dimension, MAX_SCORE.saturating_sub(deducted)))
        .collect();

    let total: u32 = dimension_scores.values().sum();
    let overall_score = (f64::from(total) / dimension_scores.len() as f64).round() as u32;

    ScoreCard {
        dimension_scores,
        overall_score,
    }
}
