use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::models::Message;

/// Events the core hands to the delivery boundary. Fire-and-forget: the core
/// never awaits acknowledgement, and a failed publish never fails the write
/// that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Notification {
    MatchFormed {
        #[serde(rename = "userA")]
        user_a: Uuid,
        #[serde(rename = "userB")]
        user_b: Uuid,
    },
    MessageAppended {
        #[serde(rename = "conversationId")]
        conversation_id: Uuid,
        message: Message,
    },
}

/// Outbound event boundary between the core and connection management.
///
/// Connection/session bookkeeping and the push transport live entirely on the
/// consuming side; the core only produces events.
pub trait NotificationBridge: Send + Sync {
    fn publish(&self, event: Notification);
}

/// Production bridge: an unbounded channel drained by the delivery task.
pub struct ChannelBridge {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelBridge {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationBridge for ChannelBridge {
    fn publish(&self, event: Notification) {
        if self.tx.send(event).is_err() {
            tracing::warn!("notification dropped: delivery receiver is gone");
        }
    }
}

/// Bridge that discards everything; used where delivery is irrelevant.
pub struct NullBridge;

impl NotificationBridge for NullBridge {
    fn publish(&self, event: Notification) {
        tracing::trace!(?event, "notification discarded");
    }
}
