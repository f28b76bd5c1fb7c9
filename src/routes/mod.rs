// Route exports
pub mod chat;
pub mod matches;
pub mod profile;

use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};

use crate::config::ChatSettings;
use crate::core::MatchingEngine;
use crate::models::HealthResponse;
use crate::services::{ConversationStore, UserDirectory};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<UserDirectory>,
    pub engine: Arc<MatchingEngine>,
    pub conversations: Arc<ConversationStore>,
    pub chat: ChatSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(profile::configure)
            .configure(matches::configure)
            .configure(chat::configure),
    );
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
