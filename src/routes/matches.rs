use actix_web::{web, HttpResponse};

use crate::error::CoreError;
use crate::models::{AckResponse, CandidatesResponse, FindCandidatesRequest, SwipeRequest, SwipeResponse};
use crate::routes::AppState;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches/candidates", web::post().to(candidates))
        .route("/matches/like", web::post().to(like))
        .route("/matches/dislike", web::post().to(dislike))
        .route("/matches/unmatch", web::post().to(unmatch));
}

/// Candidate feed endpoint
///
/// POST /api/v1/matches/candidates
///
/// Request body:
/// ```json
/// { "userId": "uuid" }
/// ```
async fn candidates(
    state: web::Data<AppState>,
    req: web::Json<FindCandidatesRequest>,
) -> Result<HttpResponse, CoreError> {
    tracing::info!("candidate feed requested by {}", req.user_id);

    let candidates = state.engine.get_candidates(req.user_id).await?;
    let total = candidates.len();

    // Browsing counts as activity; the feed computation itself stays a pure read
    state.directory.touch_last_active(req.user_id).await?;

    Ok(HttpResponse::Ok().json(CandidatesResponse { candidates, total }))
}

/// Like a target profile
///
/// POST /api/v1/matches/like
///
/// Request body:
/// ```json
/// { "userId": "uuid", "targetUserId": "uuid" }
/// ```
async fn like(
    state: web::Data<AppState>,
    req: web::Json<SwipeRequest>,
) -> Result<HttpResponse, CoreError> {
    let outcome = state.engine.like(req.user_id, req.target_user_id).await?;

    tracing::info!(
        "like {} -> {} (match: {})",
        req.user_id,
        req.target_user_id,
        outcome.is_match
    );

    Ok(HttpResponse::Ok().json(SwipeResponse {
        is_match: outcome.is_match,
        matched_user: outcome.matched_user,
    }))
}

/// Dislike a target profile
///
/// POST /api/v1/matches/dislike
async fn dislike(
    state: web::Data<AppState>,
    req: web::Json<SwipeRequest>,
) -> Result<HttpResponse, CoreError> {
    state.engine.dislike(req.user_id, req.target_user_id).await?;
    Ok(HttpResponse::Ok().json(AckResponse { success: true }))
}

/// Dissolve a match
///
/// POST /api/v1/matches/unmatch
async fn unmatch(
    state: web::Data<AppState>,
    req: web::Json<SwipeRequest>,
) -> Result<HttpResponse, CoreError> {
    state.engine.unmatch(req.user_id, req.target_user_id).await?;
    Ok(HttpResponse::Ok().json(AckResponse { success: true }))
}
