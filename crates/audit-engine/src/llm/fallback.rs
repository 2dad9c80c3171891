//! Primary/secondary backend policy
//!
//! The primary backend is tried first. Any failure other than insufficient
//! balance falls through to the secondary; insufficient balance aborts at
//! once. When every configured backend fails the caller gets one aggregated
//! error.

use tracing::{info, warn};

use super::{BackendError, Completer, LlmError, LlmPayload};

pub struct FallbackCompleter {
    primary: Option<Box<dyn Completer>>,
    secondary: Option<Box<dyn Completer>>,
}

impl FallbackCompleter {
    pub fn new(primary: Option<Box<dyn Completer>>, secondary: Option<Box<dyn Completer>>) -> Self {
        Self { primary, secondary }
    }

    /// Single backend, no fallback
    pub fn single(backend: Box<dyn Completer>) -> Self {
        Self::new(Some(backend), None)
    }

    pub fn complete(&self, payload: &LlmPayload) -> Result<String, LlmError> {
        let mut failures = Vec::new();
        let mut attempted = false;

        for backend in [&self.primary, &self.secondary].into_iter().flatten() {
            match backend.complete(payload) {
                Ok(text) => {
                    info!("{} completed the analysis ({} chars)", backend.name(), text.len());
                    return Ok(text);
                }
                Err(BackendError::NotConfigured) => {
                    info!("{} is not configured, skipping", backend.name());
                }
                Err(BackendError::InsufficientBalance(message)) => {
                    warn!("{} has insufficient balance, not falling back", backend.name());
                    return Err(LlmError::InsufficientBalance {
                        backend: backend.name().to_string(),
                        message,
                    });
                }
                Err(e) => {
                    attempted = true;
                    warn!("{} failed: {}", backend.name(), e);
                    failures.push(format!("{}: {}", backend.name(), e));
                }
            }
        }

        if attempted {
            Err(LlmError::AllBackendsFailed { failures })
        } else {
            Err(LlmError::NoBackendConfigured)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BusinessContext;
    use crate::config::LlmPayloadConfig;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use ux_types::{PageMeta, UnifiedSchema, Viewport};

    struct Scripted {
        name: &'static str,
        result: Result<String, BackendError>,
        calls: Arc<AtomicUsize>,
    }

    impl Completer for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        fn complete(&self, _payload: &LlmPayload) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn backend(name: &'static str, result: Result<String, BackendError>) -> (Box<dyn Completer>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let completer = Scripted {
            name,
            result,
            calls: Arc::clone(&calls),
        };
        (Box::new(completer), calls)
    }

    fn payload() -> LlmPayload {
        let schema = UnifiedSchema {
            page_meta: PageMeta {
                source_type: "url".to_string(),
                page_url: "https://example.com".to_string(),
                viewport: Viewport::default(),
                platform: "desktop".to_string(),
                total_elements: 0,
                truncated: false,
            },
            elements: Vec::new(),
            axe_issues: Vec::new(),
            key_user_flow: None,
        };
        LlmPayload::bounded(&schema, &[], &BusinessContext::default(), &LlmPayloadConfig::default())
    }

    #[test]
    fn test_primary_success_skips_secondary() {
        let (primary, _) = backend("primary", Ok("[]".to_string()));
        let (secondary, secondary_calls) = backend("secondary", Ok("unused".to_string()));
        let completer = FallbackCompleter::new(Some(primary), Some(secondary));

        assert_eq!(completer.complete(&payload()), Ok("[]".to_string()));
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failure_falls_back() {
        let (primary, _) = backend("primary", Err(BackendError::Request("timeout".to_string())));
        let (secondary, _) = backend("secondary", Ok("[]".to_string()));
        let completer = FallbackCompleter::new(Some(primary), Some(secondary));
        assert_eq!(completer.complete(&payload()), Ok("[]".to_string()));
    }

    #[test]
    fn test_insufficient_balance_aborts() {
        let (primary, _) = backend("primary", Err(BackendError::InsufficientBalance("402".to_string())));
        let (secondary, secondary_calls) = backend("secondary", Ok("[]".to_string()));
        let completer = FallbackCompleter::new(Some(primary), Some(secondary));

        assert_eq!(
            completer.complete(&payload()),
            Err(LlmError::InsufficientBalance {
                backend: "primary".to_string(),
                message: "402".to_string(),
            })
        );
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_both_failing_aggregates() {
        let (primary, _) = backend("primary", Err(BackendError::Request("timeout".to_string())));
        let (secondary, _) = backend("secondary", Err(BackendError::InvalidResponse("no choices".to_string())));
        let completer = FallbackCompleter::new(Some(primary), Some(secondary));

        let err = completer.complete(&payload()).unwrap_err();
        assert_eq!(
            err,
            LlmError::AllBackendsFailed {
                failures: vec![
                    "primary: request failed: timeout".to_string(),
                    "secondary: invalid response: no choices".to_string(),
                ],
            }
        );
        assert!(err.to_string().starts_with("All LLM backends failed: primary"));
    }

    #[test]
    fn test_nothing_configured() {
        assert_eq!(
            FallbackCompleter::new(None, None).complete(&payload()),
            Err(LlmError::NoBackendConfigured)
        );
        let (unconfigured, _) = backend("primary", Err(BackendError::NotConfigured));
        assert_eq!(
            FallbackCompleter::single(unconfigured).complete(&payload()),
            Err(LlmError::NoBackendConfigured)
        );
    }
}
