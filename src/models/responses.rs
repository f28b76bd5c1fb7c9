use serde::{Deserialize, Serialize};

use crate::models::domain::{CandidateSummary, ConversationOverview, Message};

/// Response for the candidate feed endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesResponse {
    pub candidates: Vec<CandidateSummary>,
    pub total: usize,
}

/// Response for a like action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    #[serde(rename = "isMatch")]
    pub is_match: bool,
    #[serde(rename = "matchedUser")]
    pub matched_user: Option<CandidateSummary>,
}

/// Generic acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

/// Response for the conversation listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationListResponse {
    pub conversations: Vec<ConversationOverview>,
}

/// One page of messages, chronological ascending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesPageResponse {
    pub messages: Vec<Message>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
