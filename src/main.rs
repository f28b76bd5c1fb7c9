use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use tracing::{error as log_error, info};
use tracing_subscriber::EnvFilter;

use unimatch::config::Settings;
use unimatch::core::MatchingEngine;
use unimatch::routes::{self, AppState};
use unimatch::services::{ChannelBridge, ConversationStore, UserDirectory};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting UniMatch core service...");
    info!(
        "Configuration loaded ({} allowed registration domains)",
        settings.registration.allowed_domains.len()
    );

    // Build the core: directory, notification bridge, engine, conversations
    let directory = Arc::new(UserDirectory::new(
        settings.registration.allowed_domains.clone(),
    ));

    let (bridge, mut events) = ChannelBridge::new();
    let bridge = Arc::new(bridge);

    // Drain task standing in for the delivery boundary: connection management
    // and the actual push transport live outside this service.
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            info!(?event, "outbound notification");
        }
        log_error!("notification channel closed");
    });

    let engine = Arc::new(MatchingEngine::new(
        directory.clone(),
        bridge.clone(),
        settings.matching.candidate_limit,
    ));

    let conversations = Arc::new(ConversationStore::new(directory.clone(), bridge.clone()));

    info!(
        "Matching engine initialized (candidate limit: {})",
        settings.matching.candidate_limit
    );

    // Build application state
    let app_state = AppState {
        directory,
        engine,
        conversations,
        chat: settings.chat.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
