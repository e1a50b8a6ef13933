//! Plan and rotation API routes

use crate::error::ApiError;
use crate::services::PlanService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use liftwise_shared::types::{CompleteDayRequest, GeneratePlanResponse, NextWorkoutResponse};
use liftwise_shared::GeneratedPlan;

/// Create plan routes
pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_plan))
        .route("/generate", post(generate_plan))
        .route("/next", get(get_next_workout))
        .route("/complete", post(complete_day))
}

/// POST /api/v1/plan/generate - Build a new plan from the saved records
///
/// Returns 409 until a profile and plan settings have been saved.
async fn generate_plan(
    State(state): State<AppState>,
) -> Result<Json<GeneratePlanResponse>, ApiError> {
    let _guard = state.lock_writes().await;
    let now = Utc::now();
    let response = state
        .run_blocking(move |state| {
            PlanService::generate(state.store(), state.catalog(), &state.config().engine, now)
        })
        .await?;
    Ok(Json(response))
}

/// GET /api/v1/plan
async fn get_plan(State(state): State<AppState>) -> Result<Json<GeneratedPlan>, ApiError> {
    let plan = state
        .run_blocking(|state| PlanService::current_plan(state.store()))
        .await?;
    Ok(Json(plan))
}

/// GET /api/v1/plan/next - The day due next in the rotation
async fn get_next_workout(
    State(state): State<AppState>,
) -> Result<Json<NextWorkoutResponse>, ApiError> {
    let view = state
        .run_blocking(|state| PlanService::next_workout(state.store()))
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/plan/complete - Mark a day done without logging it
async fn complete_day(
    State(state): State<AppState>,
    Json(req): Json<CompleteDayRequest>,
) -> Result<Json<NextWorkoutResponse>, ApiError> {
    let _guard = state.lock_writes().await;
    let view = state
        .run_blocking(move |state| PlanService::complete_day(state.store(), req.into()))
        .await?;
    Ok(Json(view))
}
