//! Per-conversation derived metadata snapshot.
//!
//! One live record exists per conversation and is overwritten on each
//! recomputation by the AI/rule layer. The signal layer treats it as a
//! read-only current-state snapshot, not history.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall conversation sentiment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::Neutral
    }
}

/// Current-state analysis snapshot for a conversation.
///
/// Produced by the upstream AI orchestration layer; every score is
/// clamped to `[0, 1]` on construction so downstream math never sees an
/// out-of-range input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMetadata {
    /// Conversation this snapshot describes.
    pub conversation_id: String,
    /// Classified purpose of the customer's messages (buying, support, ...).
    pub intent: String,
    /// Confidence of the intent classification, in [0, 1].
    pub intent_score: f64,
    /// Overall sentiment label.
    pub sentiment: Sentiment,
    /// Sentiment strength, in [0, 1].
    pub sentiment_score: f64,
    /// Detected emotion tags (e.g. "frustration", "excitement").
    pub emotions: HashSet<String>,
    /// Detected objection categories (price, trust, delivery, ...).
    pub objections: HashSet<String>,
    /// When this snapshot was recomputed.
    pub updated_at: DateTime<Utc>,
}

impl ConversationMetadata {
    /// Create a snapshot with scores clamped to [0, 1].
    pub fn new(
        conversation_id: impl Into<String>,
        intent: impl Into<String>,
        intent_score: f64,
        sentiment: Sentiment,
        sentiment_score: f64,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            intent: intent.into(),
            intent_score: clamp_score(intent_score),
            sentiment,
            sentiment_score: clamp_score(sentiment_score),
            emotions: HashSet::new(),
            objections: HashSet::new(),
            updated_at,
        }
    }

    /// Builder-style helper to attach emotion tags.
    pub fn with_emotions<I, S>(mut self, emotions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.emotions = emotions.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style helper to attach objection categories.
    pub fn with_objections<I, S>(mut self, objections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.objections = objections.into_iter().map(Into::into).collect();
        self
    }

    /// Neutral snapshot used when no analysis has run yet.
    pub fn neutral(conversation_id: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self::new(
            conversation_id,
            "unknown",
            0.0,
            Sentiment::Neutral,
            0.5,
            updated_at,
        )
    }
}

/// Clamp a score to the [0, 1] range.
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
