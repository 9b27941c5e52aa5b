//! Upstream AI failure taxonomy.

use thiserror::Error;

/// Errors surfaced by the reply-suggestion capability.
///
/// The suggestion pipeline itself is an opaque collaborator; the signal
/// layer only needs a typed error to feed the confidence gate, which
/// forces a fallback on any variant.
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// The model provider returned an error.
    #[error("provider error: {0}")]
    Provider(String),

    /// The call exceeded its deadline.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The provider answered but the response could not be used.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
