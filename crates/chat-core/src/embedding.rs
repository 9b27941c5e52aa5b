//! Embedding and vector-store collaborator traits.
//!
//! The signal layer never talks to an embedding model or a vector
//! database directly; it goes through these traits so transports can be
//! swapped (hosted API, local model, tests).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of content considered for embedding.
///
/// Governs the selective-embedding policy: retrieval context is built
/// from curated derived content only, never verbatim chat logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Curated product facts supplied by the tenant.
    ProductKnowledge,
    /// AI-generated rolling summary of a conversation.
    ConversationSummary,
    /// A recorded customer preference.
    CustomerPreference,
    /// Raw chat text. Never eligible for embedding.
    RawMessage,
}

impl ContentType {
    /// Stable label stored in document metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductKnowledge => "product_knowledge",
            Self::ConversationSummary => "conversation_summary",
            Self::CustomerPreference => "customer_preference",
            Self::RawMessage => "raw_message",
        }
    }
}

/// Errors from the embedding-generation collaborator.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The embedding provider returned an error.
    #[error("embedding provider error: {0}")]
    Provider(String),

    /// The provider returned a vector of unexpected dimension.
    #[error("unexpected vector dimension: got {got}, expected {expected}")]
    Dimension { got: usize, expected: usize },
}

/// Errors from the vector-store collaborator.
#[derive(Debug, Error)]
pub enum VectorStoreError {
    /// Write to the store failed.
    #[error("vector store write failed: {0}")]
    WriteFailed(String),

    /// Mismatched batch lengths (documents, vectors, metadata, ids).
    #[error("batch length mismatch: {0}")]
    BatchMismatch(String),
}

/// Trait for generating embedding vectors from text.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate a fixed-length embedding vector for the given text.
    async fn generate(&self, text: &str) -> Result<Vec<f64>, EmbeddingError>;
}

/// Trait for writing documents into a vector database.
///
/// Collection names are tenant-prefixed by the caller before they reach
/// an implementation.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Add a batch of documents with their vectors, metadata, and ids.
    ///
    /// All four slices must have equal length.
    async fn add_documents(
        &self,
        collection: &str,
        documents: &[String],
        vectors: &[Vec<f64>],
        metadata_records: &[serde_json::Value],
        ids: &[String],
    ) -> Result<(), VectorStoreError>;
}

/// A document as held by [`InMemoryVectorStore`].
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub content: String,
    pub vector: Vec<f64>,
    pub metadata: serde_json::Value,
}

/// In-memory vector store for tests and local development.
///
/// Keeps documents per collection behind a mutex; no similarity search,
/// just enough to observe what the policy layer wrote.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    collections: Mutex<HashMap<String, Vec<StoredDocument>>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the documents currently stored in a collection.
    pub fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        self.collections
            .lock()
            .expect("vector store mutex poisoned")
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Total document count across all collections.
    pub fn len(&self) -> usize {
        self.collections
            .lock()
            .expect("vector store mutex poisoned")
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add_documents(
        &self,
        collection: &str,
        documents: &[String],
        vectors: &[Vec<f64>],
        metadata_records: &[serde_json::Value],
        ids: &[String],
    ) -> Result<(), VectorStoreError> {
        if documents.len() != vectors.len()
            || documents.len() != metadata_records.len()
            || documents.len() != ids.len()
        {
            return Err(VectorStoreError::BatchMismatch(format!(
                "documents={} vectors={} metadata={} ids={}",
                documents.len(),
                vectors.len(),
                metadata_records.len(),
                ids.len()
            )));
        }

        let mut collections = self
            .collections
            .lock()
            .expect("vector store mutex poisoned");
        let entries = collections.entry(collection.to_string()).or_default();
        for i in 0..documents.len() {
            entries.push(StoredDocument {
                id: ids[i].clone(),
                content: documents[i].clone(),
                vector: vectors[i].clone(),
                metadata: metadata_records[i].clone(),
            });
        }
        Ok(())
    }
}

/// Embedding provider that returns a constant vector.
///
/// Useful in tests where only the policy decision matters, not the
/// geometry of the vectors.
#[derive(Debug, Clone)]
pub struct FixedEmbedder {
    vector: Vec<f64>,
}

impl FixedEmbedder {
    /// Create a provider that always returns `vector`.
    pub fn new(vector: Vec<f64>) -> Self {
        Self { vector }
    }

    /// A zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        Self::new(vec![0.0; dimension])
    }
}

#[async_trait]
impl EmbeddingProvider for FixedEmbedder {
    async fn generate(&self, _text: &str) -> Result<Vec<f64>, EmbeddingError> {
        Ok(self.vector.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_labels() {
        assert_eq!(ContentType::ProductKnowledge.as_str(), "product_knowledge");
        assert_eq!(ContentType::RawMessage.as_str(), "raw_message");
    }

    #[test]
    fn test_content_type_serde_snake_case() {
        let json = serde_json::to_string(&ContentType::CustomerPreference).unwrap();
        assert_eq!(json, "\"customer_preference\"");
    }

    #[tokio::test]
    async fn test_in_memory_store_roundtrip() {
        let store = InMemoryVectorStore::new();
        store
            .add_documents(
                "acme_products",
                &["widget specs".to_string()],
                &[vec![0.1, 0.2]],
                &[serde_json::json!({"content_type": "product_knowledge"})],
                &["doc-1".to_string()],
            )
            .await
            .unwrap();

        let docs = store.documents("acme_products");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "doc-1");
        assert_eq!(docs[0].content, "widget specs");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_store_rejects_mismatched_batch() {
        let store = InMemoryVectorStore::new();
        let result = store
            .add_documents(
                "acme_products",
                &["a".to_string(), "b".to_string()],
                &[vec![0.1]],
                &[serde_json::Value::Null],
                &["id-1".to_string()],
            )
            .await;

        assert!(matches!(result, Err(VectorStoreError::BatchMismatch(_))));
    }

    #[tokio::test]
    async fn test_fixed_embedder() {
        let embedder = FixedEmbedder::zeros(4);
        let vector = embedder.generate("anything").await.unwrap();
        assert_eq!(vector, vec![0.0; 4]);
    }
}
