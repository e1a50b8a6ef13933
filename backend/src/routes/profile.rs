//! Onboarding API routes: profile, plan settings and equipment

use crate::error::ApiError;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use liftwise_shared::types::{UpdateProfileRequest, UpdateSettingsRequest};
use liftwise_shared::{EquipmentInventory, PlanSettings, UserProfile};

/// Create onboarding routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/equipment", get(get_equipment).put(update_equipment))
}

/// GET /api/v1/profile
async fn get_profile(State(state): State<AppState>) -> Result<Json<UserProfile>, ApiError> {
    let profile = state
        .run_blocking(|state| ProfileService::get_profile(state.store()))
        .await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile - Save the profile and drop the current plan
async fn update_profile(
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let _guard = state.lock_writes().await;
    let today = Utc::now().date_naive();
    let profile = state
        .run_blocking(move |state| ProfileService::update_profile(state.store(), req, today))
        .await?;
    Ok(Json(profile))
}

/// GET /api/v1/settings
async fn get_settings(State(state): State<AppState>) -> Result<Json<PlanSettings>, ApiError> {
    let settings = state
        .run_blocking(|state| ProfileService::get_settings(state.store()))
        .await?;
    Ok(Json(settings))
}

/// PUT /api/v1/settings - Save preferences and drop the current plan
async fn update_settings(
    State(state): State<AppState>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<PlanSettings>, ApiError> {
    let _guard = state.lock_writes().await;
    let settings = state
        .run_blocking(move |state| ProfileService::update_settings(state.store(), req))
        .await?;
    Ok(Json(settings))
}

/// GET /api/v1/equipment
async fn get_equipment(
    State(state): State<AppState>,
) -> Result<Json<EquipmentInventory>, ApiError> {
    let equipment = state
        .run_blocking(|state| ProfileService::get_equipment(state.store()))
        .await?;
    Ok(Json(equipment))
}

/// PUT /api/v1/equipment - Save the inventory and drop the current plan
async fn update_equipment(
    State(state): State<AppState>,
    Json(equipment): Json<EquipmentInventory>,
) -> Result<Json<EquipmentInventory>, ApiError> {
    let _guard = state.lock_writes().await;
    let equipment = state
        .run_blocking(move |state| ProfileService::update_equipment(state.store(), equipment))
        .await?;
    Ok(Json(equipment))
}
