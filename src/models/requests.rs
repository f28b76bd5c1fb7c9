use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::domain::{Gender, InterestedIn, MessageKind};

/// Request to register a new profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterProfileRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 64))]
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[validate(length(min = 1, max = 64))]
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[validate(range(min = 18, max = 30))]
    pub age: u8,
    pub gender: Gender,
    #[serde(rename = "interestedIn")]
    pub interested_in: InterestedIn,
    #[validate(length(max = 128))]
    #[serde(default)]
    pub course: String,
    #[validate(range(min = 1, max = 7))]
    #[serde(rename = "yearOfStudy")]
    pub year_of_study: u8,
}

/// Request to update the free-form profile fields
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(length(max = 128))]
    pub course: Option<String>,
    #[validate(range(min = 1, max = 7))]
    #[serde(rename = "yearOfStudy")]
    pub year_of_study: Option<u8>,
}

/// Request to update a user's location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
}

/// Request to update matching preferences
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePreferencesRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[validate(range(min = 18, max = 30))]
    #[serde(rename = "minAge")]
    pub min_age: u8,
    #[validate(range(min = 18, max = 30))]
    #[serde(rename = "maxAge")]
    pub max_age: u8,
    #[validate(range(min = 1, max = 100))]
    #[serde(rename = "maxDistanceKm")]
    pub max_distance_km: u16,
}

/// Request to append a photo to a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddPhotoRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
}

/// Request to remove a photo, or to mark one as main
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PhotoRefRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
}

/// Request for the candidate feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindCandidatesRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Like / dislike / unmatch action on a target profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "targetUserId")]
    pub target_user_id: Uuid,
}

/// Request to open (lazily create) the conversation with a matched user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenConversationRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "targetUserId")]
    pub target_user_id: Uuid,
}

/// Request to send a message
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[serde(rename = "conversationId")]
    pub conversation_id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
}

/// Message pagination query. Page numbering starts at 1; page size defaults
/// and caps come from the chat settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessagesQuery {
    #[serde(rename = "conversationId")]
    pub conversation_id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(rename = "pageSize", default)]
    pub page_size: Option<usize>,
}

/// Conversation listing query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConversationsQuery {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Verification callback payload from the email-verification boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyProfileRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Request to mark every message in a conversation as read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadRequest {
    #[serde(rename = "conversationId")]
    pub conversation_id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Request to delete one of the requester's own messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMessageRequest {
    #[serde(rename = "conversationId")]
    pub conversation_id: Uuid,
    #[serde(rename = "messageId")]
    pub message_id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}
