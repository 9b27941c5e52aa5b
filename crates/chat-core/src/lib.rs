//! Shared conversation types and collaborator traits for the Dealdesk
//! signal layer.
//!
//! This crate provides the data model consumed by the signal-layer crate:
//!
//! - [`ChatMessage`] / [`Sender`] - Immutable conversation messages
//! - [`ConversationMetadata`] / [`Sentiment`] - The per-conversation
//!   derived snapshot produced by the AI/rule layer
//! - [`ContentType`] - Categories of content eligible for embedding
//! - [`SuggestionError`] - Failure taxonomy for the upstream AI call
//! - [`EmbeddingProvider`] / [`VectorStore`] - Traits for the embedding
//!   generation and vector storage collaborators
//!
//! # Example
//!
//! ```rust
//! use chat_core::{ChatMessage, Sender};
//! use chrono::Utc;
//!
//! let msg = ChatMessage::customer("conv-1", "thanks, this looks great!", Utc::now());
//! assert_eq!(msg.sender, Sender::Customer);
//! ```

mod embedding;
mod error;
mod message;
mod metadata;

pub use embedding::{
    ContentType, EmbeddingError, EmbeddingProvider, FixedEmbedder, InMemoryVectorStore,
    StoredDocument, VectorStore, VectorStoreError,
};
pub use error::SuggestionError;
pub use message::{ChatMessage, Sender};
pub use metadata::{clamp_score, ConversationMetadata, Sentiment};

// Re-export async_trait for downstream trait implementations
pub use async_trait::async_trait;
