//! Confidence gating for AI reply suggestions.
//!
//! Every suggestion passes through the gate before it is surfaced to an
//! agent or auto-sent. Fallback is non-blocking: the unassisted flow
//! continues uninterrupted, so an AI failure can never stop the chat.

use chat_core::SuggestionError;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::SignalConfig;

/// Outcome of gating one AI suggestion.
///
/// Ephemeral; computed per call and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceDecision {
    /// Whether the suggestion may be trusted.
    pub accept: bool,
    /// Human-readable reason, logged on fallback.
    pub reason: String,
}

/// Decides whether an AI output may be trusted or the conversation must
/// fall back to the unassisted flow.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceGate {
    config: SignalConfig,
}

impl ConfidenceGate {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    /// Whether the suggestion must be discarded.
    ///
    /// Any upstream error forces fallback regardless of the reported
    /// confidence; otherwise confidence below the threshold does. The
    /// boundary is inclusive-false: exactly at the threshold the output
    /// is trusted.
    pub fn should_fallback(&self, error: Option<&SuggestionError>, confidence: f64) -> bool {
        if error.is_some() {
            return true;
        }
        confidence < self.config.confidence_threshold
    }

    /// Gate a suggestion and produce the full decision record.
    pub fn decide(&self, error: Option<&SuggestionError>, confidence: f64) -> ConfidenceDecision {
        if let Some(err) = error {
            return ConfidenceDecision {
                accept: false,
                reason: format!("AI error: {}", err),
            };
        }

        if confidence < self.config.confidence_threshold {
            return ConfidenceDecision {
                accept: false,
                reason: format!("low confidence: {:.2}", confidence),
            };
        }

        ConfidenceDecision {
            accept: true,
            reason: format!("confidence {:.2} above threshold", confidence),
        }
    }

    /// Fallback entry point for an upstream error.
    pub fn fallback_on_error(&self, conversation_id: &str, error: &SuggestionError) {
        self.handle_fallback(conversation_id, &format!("AI error: {}", error));
    }

    /// Fallback entry point for a low-confidence suggestion.
    pub fn fallback_on_low_confidence(&self, conversation_id: &str, confidence: f64) {
        self.handle_fallback(conversation_id, &format!("low confidence: {:.2}", confidence));
    }

    /// Record a fallback event and return.
    ///
    /// Deliberately a no-op beyond the audit log: no suggestion is
    /// surfaced and the surrounding system continues the unassisted
    /// flow without interruption.
    pub fn handle_fallback(&self, conversation_id: &str, reason: &str) {
        warn!(
            conversation_id = %conversation_id,
            reason = %reason,
            "AI_FALLBACK"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_forces_fallback_even_at_full_confidence() {
        let gate = ConfidenceGate::default();
        let err = SuggestionError::Provider("upstream down".to_string());

        assert!(gate.should_fallback(Some(&err), 1.0));
        assert!(gate.should_fallback(Some(&err), 0.0));
    }

    #[test]
    fn test_threshold_boundary_is_inclusive_false() {
        let gate = ConfidenceGate::default();

        assert!(gate.should_fallback(None, 0.49));
        assert!(!gate.should_fallback(None, 0.5));
        assert!(!gate.should_fallback(None, 0.51));
    }

    #[test]
    fn test_decide_accepts_confident_output() {
        let gate = ConfidenceGate::default();
        let decision = gate.decide(None, 0.85);

        assert!(decision.accept);
        assert_eq!(decision.reason, "confidence 0.85 above threshold");
    }

    #[test]
    fn test_decide_reason_on_error() {
        let gate = ConfidenceGate::default();
        let err = SuggestionError::Timeout(30);
        let decision = gate.decide(Some(&err), 0.9);

        assert!(!decision.accept);
        assert_eq!(decision.reason, "AI error: request timed out after 30s");
    }

    #[test]
    fn test_decide_reason_on_low_confidence() {
        let gate = ConfidenceGate::default();
        let decision = gate.decide(None, 0.123);

        assert!(!decision.accept);
        assert_eq!(decision.reason, "low confidence: 0.12");
    }

    #[test]
    fn test_custom_threshold() {
        let config = SignalConfig {
            confidence_threshold: 0.8,
            ..SignalConfig::default()
        };
        let gate = ConfidenceGate::new(config);

        assert!(gate.should_fallback(None, 0.7));
        assert!(!gate.should_fallback(None, 0.8));
    }

    #[test]
    fn test_handle_fallback_is_non_blocking() {
        // Must return without error or side effects beyond the log.
        let gate = ConfidenceGate::default();
        gate.handle_fallback("conv-1", "low confidence: 0.30");
        gate.fallback_on_low_confidence("conv-1", 0.3);
        gate.fallback_on_error("conv-1", &SuggestionError::Provider("boom".to_string()));
    }
}
