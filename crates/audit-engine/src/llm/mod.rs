//! LLM collaborator plumbing
//!
//! The engine never talks HTTP. It hands a size-bounded [`LlmPayload`] to a
//! [`Completer`], applies the primary/secondary fallback policy, and parses
//! the free-text answer back into candidate issues. Prompt wording belongs to
//! the `Completer` implementation.

pub mod extract;
pub mod fallback;
pub mod payload;

use thiserror::Error;

pub use extract::{extract_json, parse_issue_list, parse_response};
pub use fallback::FallbackCompleter;
pub use payload::LlmPayload;

/// Failure of a single LLM backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("backend is not configured")]
    NotConfigured,

    /// Account has run out of credit; retrying elsewhere will not help
    #[error("insufficient balance: {0}")]
    InsufficientBalance(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Failure of the whole completion, after the fallback policy ran
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LlmError {
    #[error("No LLM backend is configured")]
    NoBackendConfigured,

    #[error("{backend} has insufficient balance: {message}")]
    InsufficientBalance { backend: String, message: String },

    #[error("All LLM backends failed: {}", .failures.join("; "))]
    AllBackendsFailed { failures: Vec<String> },
}

/// LLM output that no extraction strategy could turn into issues
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResponseParseError {
    #[error("LLM response is empty")]
    Empty,

    #[error("No JSON value found in LLM response")]
    NoJson,

    #[error("LLM response JSON is not an issue list")]
    NotAnIssueList,
}

/// A text-completion capability
pub trait Completer: Send + Sync {
    /// Backend name used in logs and errors
    fn name(&self) -> &str;

    fn complete(&self, payload: &LlmPayload) -> Result<String, BackendError>;
}
