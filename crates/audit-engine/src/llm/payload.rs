use serde::Serialize;
use ux_types::{Issue, UnifiedSchema};

use crate::config::LlmPayloadConfig;
use crate::context::{BusinessContext, Scenario};

/// What the LLM collaborator receives, bounded in size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmPayload {
    pub unified_schema: UnifiedSchema,
    pub raw_issues: Vec<Issue>,
    /// True when `raw_issues` was cut to the configured cap
    pub raw_issues_truncated: bool,
    pub business_context: BusinessContext,
    pub scenario: Scenario,
}

impl LlmPayload {
    pub fn bounded(
        schema: &UnifiedSchema,
        raw_issues: &[Issue],
        context: &BusinessContext,
        config: &LlmPayloadConfig,
    ) -> Self {
        Self {
            unified_schema: schema.bounded(config.max_elements),
            raw_issues: raw_issues.iter().take(config.max_issues).cloned().collect(),
            raw_issues_truncated: raw_issues.len() > config.max_issues,
            business_context: context.clone(),
            scenario: context.scenario(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
