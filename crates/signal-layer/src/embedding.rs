//! Selective content embedding policy.
//!
//! Retrieval context is built from curated derived content only
//! (product knowledge, summaries, preferences) - raw chat text is never
//! embedded. The policy decides admission, then routes accepted content
//! through embedding generation into the tenant's vector store.

use std::sync::Arc;

use chat_core::{ContentType, EmbeddingProvider, VectorStore};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::EmbedError;

/// Admission policy plus embed-and-store orchestration for one tenant.
///
/// Holds no mutable state; safe to share across conversations. The
/// embedding and store calls are the only blocking work in the signal
/// layer and should run off the critical request path.
pub struct EmbeddingPolicy {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    tenant: String,
}

impl EmbeddingPolicy {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        tenant: impl Into<String>,
    ) -> Self {
        Self {
            embedder,
            store,
            tenant: tenant.into(),
        }
    }

    /// Whether content of this type may be embedded.
    ///
    /// Empty content is never admitted. Raw chat text is never admitted
    /// regardless of emptiness: only curated derived content feeds
    /// retrieval.
    pub fn should_embed(&self, content: &str, content_type: ContentType) -> bool {
        if content.is_empty() {
            return false;
        }

        match content_type {
            ContentType::ProductKnowledge
            | ContentType::ConversationSummary
            | ContentType::CustomerPreference => true,
            ContentType::RawMessage => false,
        }
    }

    /// Embed admissible content and write it to the tenant's store.
    ///
    /// Inadmissible content is a silent no-op, not an error - omission
    /// is expected and common. The document id comes from a
    /// caller-supplied `id` metadata field when present, else a fallback
    /// derived from the collection name and content length (collisions
    /// are tolerated).
    pub async fn embed_and_store(
        &self,
        collection: &str,
        content: &str,
        content_type: ContentType,
        metadata: Option<Map<String, Value>>,
    ) -> Result<(), EmbedError> {
        if !self.should_embed(content, content_type) {
            debug!(
                collection = %collection,
                content_type = content_type.as_str(),
                "EMBED_SKIPPED"
            );
            return Ok(());
        }

        let vector = self.embedder.generate(content).await?;

        let mut metadata = metadata.unwrap_or_default();
        let id = metadata
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}_{}", collection, content.len()));
        metadata.insert(
            "content_type".to_string(),
            Value::String(content_type.as_str().to_string()),
        );

        let scoped_collection = format!("{}_{}", self.tenant, collection);
        self.store
            .add_documents(
                &scoped_collection,
                &[content.to_string()],
                &[vector],
                &[Value::Object(metadata)],
                &[id.clone()],
            )
            .await?;

        info!(
            collection = %scoped_collection,
            content_type = content_type.as_str(),
            id = %id,
            "EMBED_STORED"
        );
        Ok(())
    }
}
