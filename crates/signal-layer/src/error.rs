//! Error types for signal-layer operations.

use chat_core::{EmbeddingError, VectorStoreError};
use thiserror::Error;

/// Errors from the embed-and-store path.
///
/// Embedding is advisory enrichment, never a hard dependency of the
/// chat path: callers log these and continue.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Embedding generation failed.
    #[error("embedding generation failed: {0}")]
    Generate(#[from] EmbeddingError),

    /// Vector store write failed.
    #[error("vector store write failed: {0}")]
    Store(#[from] VectorStoreError),
}
