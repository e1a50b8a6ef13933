//! Workout logging API routes

use crate::error::ApiError;
use crate::services::WorkoutService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use liftwise_shared::types::{RecordWorkoutRequest, RecordWorkoutResponse};
use liftwise_shared::FinishedWorkoutSummary;

/// Create workout routes
pub fn workout_routes() -> Router<AppState> {
    Router::new().route("/", post(record_workout).get(get_history))
}

/// POST /api/v1/workouts - Finish a workout
///
/// Appends it to history and advances the rotation when it covered its
/// plan day.
async fn record_workout(
    State(state): State<AppState>,
    Json(req): Json<RecordWorkoutRequest>,
) -> Result<(StatusCode, Json<RecordWorkoutResponse>), ApiError> {
    let _guard = state.lock_writes().await;
    let response = state
        .run_blocking(move |state| WorkoutService::record(state.store(), state.catalog(), req))
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/workouts - History, newest first
async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<FinishedWorkoutSummary>>, ApiError> {
    let history = state
        .run_blocking(|state| WorkoutService::history(state.store()))
        .await?;
    Ok(Json(history))
}
