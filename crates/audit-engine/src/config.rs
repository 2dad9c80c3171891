//! Engine configuration
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! [normalizer]
//! max_text_chars = 100
//!
//! [rules]
//! required_field_detection = "attribute"
//!
//! [llm]
//! max_elements = 100
//! max_issues = 50
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub llm: LlmPayloadConfig,
}

impl AuditConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }
}

/// How the required-field check recognises a required input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredFieldDetection {
    /// `required` / `aria-required="true"` attribute
    #[default]
    Attribute,
    /// A literal `*` anywhere in `dom_path` (legacy fixtures)
    DomPathMarker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Cap on extracted element text, in characters
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    #[serde(default = "default_element_confidence")]
    pub element_confidence: f64,
    #[serde(default = "default_text_confidence")]
    pub text_confidence: f64,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    #[serde(default = "default_platform")]
    pub platform: String,
}

fn default_max_text_chars() -> usize {
    100
}

fn default_element_confidence() -> f64 {
    0.9
}

fn default_text_confidence() -> f64 {
    0.8
}

fn default_viewport_width() -> u32 {
    1920
}

fn default_viewport_height() -> u32 {
    1080
}

fn default_platform() -> String {
    "desktop".to_string()
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_text_chars: default_max_text_chars(),
            element_confidence: default_element_confidence(),
            text_confidence: default_text_confidence(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            platform: default_platform(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub required_field_detection: RequiredFieldDetection,
}

/// Size bounds on what is handed to the LLM collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmPayloadConfig {
    #[serde(default = "default_max_elements")]
    pub max_elements: usize,
    #[serde(default = "default_max_issues")]
    pub max_issues: usize,
}

fn default_max_elements() -> usize {
    100
}

fn default_max_issues() -> usize {
    50
}

impl Default for LlmPayloadConfig {
    fn default() -> Self {
        Self {
            max_elements: default_max_elements(),
            max_issues: default_max_issues(),
        }
    }
}
