use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{
    Conversation, ConversationOverview, CounterpartExcerpt, Message, MessageKind, ReadReceipt,
    UserPair,
};
use crate::services::{Notification, NotificationBridge, UserDirectory};

/// One page of a conversation's messages, chronological ascending.
#[derive(Debug)]
pub struct MessagesPage {
    pub messages: Vec<Message>,
    pub has_more: bool,
}

/// Owner of chat identity and message state.
///
/// A conversation exists per unordered participant pair, created lazily on
/// first open and only for matched pairs. Message appends serialize on the
/// conversation's own mutex, so two simultaneous sends are both preserved and
/// `last_message` always reflects the final append.
pub struct ConversationStore {
    directory: Arc<UserDirectory>,
    notifier: Arc<dyn NotificationBridge>,
    inner: RwLock<ConversationIndex>,
}

struct ConversationIndex {
    by_id: HashMap<Uuid, Arc<Mutex<Conversation>>>,
    by_pair: HashMap<UserPair, Uuid>,
}

impl ConversationStore {
    pub fn new(directory: Arc<UserDirectory>, notifier: Arc<dyn NotificationBridge>) -> Self {
        Self {
            directory,
            notifier,
            inner: RwLock::new(ConversationIndex {
                by_id: HashMap::new(),
                by_pair: HashMap::new(),
            }),
        }
    }

    /// Open the conversation for a pair, creating it on first access.
    ///
    /// Fails with `NotMatched` unless the pair is currently matched. The pair
    /// index is checked and populated under one writer lock, so a second
    /// conversation can never appear for the same unordered pair.
    pub async fn get_or_create(&self, user_a: Uuid, user_b: Uuid) -> Result<Conversation, CoreError> {
        if user_a == user_b {
            return Err(CoreError::Validation(
                "a conversation needs two distinct participants".to_string(),
            ));
        }
        if !self.directory.are_matched(user_a, user_b).await? {
            return Err(CoreError::NotMatched);
        }

        let pair = UserPair::new(user_a, user_b);
        let mut inner = self.inner.write().await;

        if let Some(id) = inner.by_pair.get(&pair) {
            let handle = inner.by_id.get(id).cloned().ok_or_else(|| {
                CoreError::NotFound(format!("conversation {}", id))
            })?;
            drop(inner);
            return Ok(handle.lock().await.clone());
        }

        let conversation = Conversation {
            id: Uuid::new_v4(),
            participants: [user_a, user_b],
            messages: vec![],
            last_message: None,
            is_active: true,
            created_at: Utc::now(),
        };

        inner.by_pair.insert(pair, conversation.id);
        inner
            .by_id
            .insert(conversation.id, Arc::new(Mutex::new(conversation.clone())));

        tracing::info!(
            "conversation {} created for {} and {}",
            conversation.id,
            user_a,
            user_b
        );
        Ok(conversation)
    }

    /// List the user's active conversations, newest last message first.
    /// Conversations with no messages sort by creation time; ties break on id
    /// so the order is deterministic.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ConversationOverview>, CoreError> {
        if !self.directory.exists(user_id).await {
            return Err(CoreError::NotFound(format!("user {}", user_id)));
        }

        let handles: Vec<Arc<Mutex<Conversation>>> =
            self.inner.read().await.by_id.values().cloned().collect();

        let mut overviews = Vec::new();
        for handle in handles {
            let conversation = handle.lock().await.clone();
            if !conversation.is_active || !conversation.has_participant(user_id) {
                continue;
            }
            let Some(counterpart_id) = conversation.counterpart_of(user_id) else {
                continue;
            };
            let counterpart = match self.directory.read_profile(counterpart_id).await {
                Ok(profile) => CounterpartExcerpt {
                    user_id: profile.id,
                    first_name: profile.first_name.clone(),
                    age: profile.age,
                    university: profile.university.clone(),
                    main_photo_url: profile.main_photo().map(|p| p.url.clone()),
                },
                Err(e) => {
                    tracing::warn!(
                        "skipping conversation {}: counterpart unavailable: {}",
                        conversation.id,
                        e
                    );
                    continue;
                }
            };

            overviews.push(ConversationOverview {
                conversation_id: conversation.id,
                counterpart,
                last_message: conversation.last_message.clone(),
                created_at: conversation.created_at,
            });
        }

        overviews.sort_by(|a, b| {
            let ta = a.last_message.as_ref().map(|m| m.timestamp).unwrap_or(a.created_at);
            let tb = b.last_message.as_ref().map(|m| m.timestamp).unwrap_or(b.created_at);
            tb.cmp(&ta)
                .then_with(|| a.conversation_id.cmp(&b.conversation_id))
        });

        Ok(overviews)
    }

    /// Fetch one page of messages, newest page first, each page in
    /// chronological order. `has_more` says whether an older page exists.
    pub async fn list_messages(
        &self,
        conversation_id: Uuid,
        requester: Uuid,
        page: usize,
        page_size: usize,
    ) -> Result<MessagesPage, CoreError> {
        if page == 0 || page_size == 0 {
            return Err(CoreError::Validation(
                "page and pageSize start at 1".to_string(),
            ));
        }

        let handle = self.handle(conversation_id).await?;
        let conversation = handle.lock().await;
        if !conversation.has_participant(requester) {
            return Err(CoreError::Forbidden(
                "requester is not a participant".to_string(),
            ));
        }

        let total = conversation.messages.len();
        let skip = (page - 1) * page_size;

        let mut messages: Vec<Message> = conversation
            .messages
            .iter()
            .rev()
            .skip(skip)
            .take(page_size)
            .cloned()
            .collect();
        messages.reverse();

        Ok(MessagesPage {
            messages,
            has_more: total > skip + page_size,
        })
    }

    /// Append a message and update the `last_message` pointer in the same
    /// critical section; emits `message-appended` after the write commits.
    pub async fn send_message(
        &self,
        conversation_id: Uuid,
        sender: Uuid,
        content: String,
        kind: MessageKind,
    ) -> Result<Message, CoreError> {
        let length = content.chars().count();
        if length == 0 || length > 1000 {
            return Err(CoreError::Validation(
                "message content must be 1-1000 characters".to_string(),
            ));
        }

        let handle = self.handle(conversation_id).await?;
        let mut conversation = handle.lock().await;
        if !conversation.has_participant(sender) {
            return Err(CoreError::Forbidden(
                "sender is not a participant".to_string(),
            ));
        }

        let now = Utc::now();
        let message = Message {
            id: Uuid::new_v4(),
            sender_id: sender,
            content,
            kind,
            created_at: now,
            // The sender has read their own message at send time
            read_by: vec![ReadReceipt {
                user_id: sender,
                read_at: now,
            }],
        };

        conversation.messages.push(message.clone());
        conversation.recompute_last_message();
        drop(conversation);

        tracing::debug!("message {} appended to {}", message.id, conversation_id);
        self.notifier.publish(Notification::MessageAppended {
            conversation_id,
            message: message.clone(),
        });

        Ok(message)
    }

    /// Stamp a read receipt for the requester on every message that lacks
    /// one. Idempotent: already-receipted messages are untouched.
    pub async fn mark_read(&self, conversation_id: Uuid, requester: Uuid) -> Result<(), CoreError> {
        let handle = self.handle(conversation_id).await?;
        let mut conversation = handle.lock().await;
        if !conversation.has_participant(requester) {
            return Err(CoreError::Forbidden(
                "requester is not a participant".to_string(),
            ));
        }

        let now = Utc::now();
        let mut stamped = 0usize;
        for message in &mut conversation.messages {
            if !message.read_by_user(requester) {
                message.read_by.push(ReadReceipt {
                    user_id: requester,
                    read_at: now,
                });
                stamped += 1;
            }
        }

        tracing::debug!(
            "marked {} messages read in {} for {}",
            stamped,
            conversation_id,
            requester
        );
        Ok(())
    }

    /// Remove one of the requester's own messages and repair `last_message`
    /// from the new tail.
    pub async fn delete_message(
        &self,
        conversation_id: Uuid,
        message_id: Uuid,
        requester: Uuid,
    ) -> Result<(), CoreError> {
        let handle = self.handle(conversation_id).await?;
        let mut conversation = handle.lock().await;

        let index = conversation
            .messages
            .iter()
            .position(|m| m.id == message_id)
            .ok_or_else(|| CoreError::NotFound(format!("message {}", message_id)))?;

        if conversation.messages[index].sender_id != requester {
            return Err(CoreError::Forbidden(
                "only the sender may delete a message".to_string(),
            ));
        }

        conversation.messages.remove(index);
        conversation.recompute_last_message();

        tracing::debug!("message {} deleted from {}", message_id, conversation_id);
        Ok(())
    }

    async fn handle(&self, conversation_id: Uuid) -> Result<Arc<Mutex<Conversation>>, CoreError> {
        self.inner
            .read()
            .await
            .by_id
            .get(&conversation_id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("conversation {}", conversation_id)))
    }
}
