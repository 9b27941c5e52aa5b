//! Signal and decision layer for the Dealdesk sales-chat platform.
//!
//! This crate holds the numeric and policy logic that sits between the
//! conversation API and the AI orchestration layer:
//!
//! - [`TrendAnalyzer`] - Sentiment/emotion trend direction over a
//!   conversation's message history
//! - [`ConfidenceGate`] - Accept-or-fallback decision for AI reply
//!   suggestions
//! - [`EmbeddingPolicy`] - Selective admission of derived content into
//!   the vector store
//! - [`TimingSuggester`] - Optimal follow-up window estimation
//!
//! # Architecture
//!
//! ```text
//! Inbound message (from API layer)
//!          ↓
//! ┌────────────────────────────────────────────────────────┐
//! │                    SIGNAL LAYER                        │
//! │                                                        │
//! │  history + metadata ──→ TrendAnalyzer ──→ TrendAnalysis│
//! │  AI result ───────────→ ConfidenceGate ─→ accept/fall  │
//! │  derived content ─────→ EmbeddingPolicy → vector store │
//! │  history + now ───────→ TimingSuggester ─→ TimingWindow│
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! All components are stateless over caller-supplied inputs and safe to
//! invoke concurrently across conversations. Insufficient data resolves
//! to documented neutral defaults, never an error; upstream failures
//! degrade functionality, never availability.
//!
//! # Example
//!
//! ```rust
//! use signal_layer::{ConfidenceGate, SignalConfig};
//!
//! let gate = ConfidenceGate::new(SignalConfig::default());
//! assert!(!gate.should_fallback(None, 0.9));
//! assert!(gate.should_fallback(None, 0.2));
//! ```

mod confidence;
mod config;
mod embedding;
mod error;
mod timing;
mod trend;

// Public exports
pub use confidence::{ConfidenceDecision, ConfidenceGate};
pub use config::{
    SignalConfig, DEFAULT_BUSINESS_CLOSE_HOUR, DEFAULT_BUSINESS_OPEN_HOUR,
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_FOLLOW_UP_SPAN_HOURS, DEFAULT_TREND_THRESHOLD,
};
pub use embedding::EmbeddingPolicy;
pub use error::EmbedError;
pub use timing::{TimingSuggester, TimingWindow};
pub use trend::{TrendAnalysis, TrendAnalyzer, TrendDirection};

// Re-export commonly used types from chat-core
pub use chat_core::{
    ChatMessage, ContentType, ConversationMetadata, EmbeddingProvider, Sender, Sentiment,
    SuggestionError, VectorStore,
};
