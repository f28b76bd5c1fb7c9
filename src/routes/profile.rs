use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::CoreError;
use crate::models::{
    AckResponse, AddPhotoRequest, PhotoRefRequest, RegisterProfileRequest, UpdateLocationRequest,
    UpdatePreferencesRequest, UpdateProfileRequest, VerifyProfileRequest,
};
use crate::routes::AppState;

/// Configure all profile-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/profiles", web::post().to(register))
        .route("/profiles/verify", web::post().to(verify))
        .route("/profiles/update", web::post().to(update))
        .route("/profiles/location", web::post().to(set_location))
        .route("/profiles/preferences", web::post().to(set_preferences))
        .route("/profiles/photos", web::post().to(add_photo))
        .route("/profiles/photos", web::delete().to(remove_photo))
        .route("/profiles/photos/main", web::post().to(set_main_photo));
}

/// Register a new profile
///
/// POST /api/v1/profiles
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterProfileRequest>,
) -> Result<HttpResponse, CoreError> {
    req.validate()?;

    tracing::info!("registration request for {}", req.email);
    let profile = state.directory.register(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(profile))
}

/// Mark a profile as verified; called by the email-verification boundary.
///
/// POST /api/v1/profiles/verify
async fn verify(
    state: web::Data<AppState>,
    req: web::Json<VerifyProfileRequest>,
) -> Result<HttpResponse, CoreError> {
    state.directory.mark_verified(req.user_id).await?;
    Ok(HttpResponse::Ok().json(AckResponse { success: true }))
}

/// Update the free-form profile fields
///
/// POST /api/v1/profiles/update
async fn update(
    state: web::Data<AppState>,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, CoreError> {
    req.validate()?;
    let profile = state.directory.update_profile(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// POST /api/v1/profiles/location
async fn set_location(
    state: web::Data<AppState>,
    req: web::Json<UpdateLocationRequest>,
) -> Result<HttpResponse, CoreError> {
    req.validate()?;
    state
        .directory
        .set_location(req.user_id, req.longitude, req.latitude)
        .await?;
    Ok(HttpResponse::Ok().json(AckResponse { success: true }))
}

/// POST /api/v1/profiles/preferences
async fn set_preferences(
    state: web::Data<AppState>,
    req: web::Json<UpdatePreferencesRequest>,
) -> Result<HttpResponse, CoreError> {
    req.validate()?;
    state.directory.set_preferences(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AckResponse { success: true }))
}

/// POST /api/v1/profiles/photos
async fn add_photo(
    state: web::Data<AppState>,
    req: web::Json<AddPhotoRequest>,
) -> Result<HttpResponse, CoreError> {
    req.validate()?;
    let req = req.into_inner();
    let profile = state.directory.add_photo(req.user_id, req.url).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// DELETE /api/v1/profiles/photos
async fn remove_photo(
    state: web::Data<AppState>,
    req: web::Json<PhotoRefRequest>,
) -> Result<HttpResponse, CoreError> {
    req.validate()?;
    let profile = state.directory.remove_photo(req.user_id, &req.url).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// POST /api/v1/profiles/photos/main
async fn set_main_photo(
    state: web::Data<AppState>,
    req: web::Json<PhotoRefRequest>,
) -> Result<HttpResponse, CoreError> {
    req.validate()?;
    state.directory.set_main_photo(req.user_id, &req.url).await?;
    Ok(HttpResponse::Ok().json(AckResponse { success: true }))
}
