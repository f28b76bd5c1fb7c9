use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::CoreError;
use crate::models::{
    AckResponse, ConversationListResponse, DeleteMessageRequest, ListConversationsQuery,
    ListMessagesQuery, MarkReadRequest, MessagesPageResponse, OpenConversationRequest,
    SendMessageRequest,
};
use crate::routes::AppState;

/// Configure all chat-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat/conversations", web::post().to(open_conversation))
        .route("/chat/conversations", web::get().to(list_conversations))
        .route("/chat/messages", web::get().to(list_messages))
        .route("/chat/messages", web::post().to(send_message))
        .route("/chat/messages", web::delete().to(delete_message))
        .route("/chat/messages/read", web::post().to(mark_read));
}

/// Open (lazily create) the conversation with a matched user
///
/// POST /api/v1/chat/conversations
///
/// Request body:
/// ```json
/// { "userId": "uuid", "targetUserId": "uuid" }
/// ```
async fn open_conversation(
    state: web::Data<AppState>,
    req: web::Json<OpenConversationRequest>,
) -> Result<HttpResponse, CoreError> {
    let conversation = state
        .conversations
        .get_or_create(req.user_id, req.target_user_id)
        .await?;

    tracing::info!(
        "conversation {} opened by {}",
        conversation.id,
        req.user_id
    );
    Ok(HttpResponse::Ok().json(conversation))
}

/// List the requester's active conversations
///
/// GET /api/v1/chat/conversations?userId={userId}
async fn list_conversations(
    state: web::Data<AppState>,
    query: web::Query<ListConversationsQuery>,
) -> Result<HttpResponse, CoreError> {
    let conversations = state.conversations.list_for_user(query.user_id).await?;
    Ok(HttpResponse::Ok().json(ConversationListResponse { conversations }))
}

/// Fetch one page of messages
///
/// GET /api/v1/chat/messages?conversationId={id}&userId={id}&page=1&pageSize=50
async fn list_messages(
    state: web::Data<AppState>,
    query: web::Query<ListMessagesQuery>,
) -> Result<HttpResponse, CoreError> {
    let page = query.page.unwrap_or(1);
    // Cap the page size to keep responses bounded
    let page_size = query
        .page_size
        .unwrap_or(state.chat.default_page_size)
        .min(state.chat.max_page_size);

    let result = state
        .conversations
        .list_messages(query.conversation_id, query.user_id, page, page_size)
        .await?;

    Ok(HttpResponse::Ok().json(MessagesPageResponse {
        messages: result.messages,
        has_more: result.has_more,
    }))
}

/// Send a message
///
/// POST /api/v1/chat/messages
///
/// Request body:
/// ```json
/// { "conversationId": "uuid", "userId": "uuid", "content": "...", "type": "text" }
/// ```
async fn send_message(
    state: web::Data<AppState>,
    req: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, CoreError> {
    req.validate()?;
    let req = req.into_inner();

    let message = state
        .conversations
        .send_message(req.conversation_id, req.user_id, req.content, req.kind)
        .await?;

    Ok(HttpResponse::Created().json(message))
}

/// Mark every message in a conversation as read
///
/// POST /api/v1/chat/messages/read
async fn mark_read(
    state: web::Data<AppState>,
    req: web::Json<MarkReadRequest>,
) -> Result<HttpResponse, CoreError> {
    state
        .conversations
        .mark_read(req.conversation_id, req.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(AckResponse { success: true }))
}

/// Delete one of the requester's own messages
///
/// DELETE /api/v1/chat/messages
async fn delete_message(
    state: web::Data<AppState>,
    req: web::Json<DeleteMessageRequest>,
) -> Result<HttpResponse, CoreError> {
    state
        .conversations
        .delete_message(req.conversation_id, req.message_id, req.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(AckResponse { success: true }))
}
