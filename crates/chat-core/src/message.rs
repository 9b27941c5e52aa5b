//! Conversation message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The customer on the other end of the chat.
    Customer,
    /// A human agent (or an accepted AI suggestion sent on their behalf).
    Agent,
}

/// A single message in a conversation.
///
/// Messages are immutable once created and ordered by timestamp within
/// their conversation. The persistence layer owns storage; this type is
/// only the in-process shape handed to the signal layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: String,
    /// Conversation this message belongs to.
    pub conversation_id: String,
    /// Message author.
    pub sender: Sender,
    /// Message text.
    pub content: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a customer message with a generated per-conversation id.
    pub fn customer(
        conversation_id: impl Into<String>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::new(conversation_id, Sender::Customer, content, timestamp)
    }

    /// Create an agent message with a generated per-conversation id.
    pub fn agent(
        conversation_id: impl Into<String>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::new(conversation_id, Sender::Agent, content, timestamp)
    }

    fn new(
        conversation_id: impl Into<String>,
        sender: Sender,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let conversation_id = conversation_id.into();
        Self {
            id: format!("{}-{}", conversation_id, timestamp.timestamp_millis()),
            conversation_id,
            sender,
            content: content.into(),
            timestamp,
        }
    }

    /// Whether this message was sent by the customer.
    pub fn is_customer(&self) -> bool {
        self.sender == Sender::Customer
    }
}
