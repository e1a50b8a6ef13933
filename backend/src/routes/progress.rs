//! Progress API routes

use crate::error::ApiError;
use crate::services::progress::RecordsView;
use crate::services::ProgressService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use liftwise_shared::analytics::{DayActivity, ProgressPoint, ProgressReport};
use liftwise_shared::types::{ExerciseProgressResponse, SeriesQuery, StatsResponse};

/// Create progress routes
pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_report))
        .route("/stats", get(get_stats))
        .route("/weekly", get(get_weekly))
        .route("/series", get(get_series))
        .route("/records", get(get_records))
        .route("/exercises/:id", get(get_exercise_progress))
}

/// GET /api/v1/progress - Full progress screen
async fn get_report(State(state): State<AppState>) -> Result<Json<ProgressReport>, ApiError> {
    let today = Utc::now().date_naive();
    let report = state
        .run_blocking(move |state| {
            ProgressService::report(state.store(), today, &state.config().engine)
        })
        .await?;
    Ok(Json(report))
}

/// GET /api/v1/progress/stats - Totals and current streak
async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let today = Utc::now().date_naive();
    let stats = state
        .run_blocking(move |state| ProgressService::stats(state.store(), today))
        .await?;
    Ok(Json(stats))
}

/// GET /api/v1/progress/weekly - Trailing seven days of activity
async fn get_weekly(State(state): State<AppState>) -> Result<Json<Vec<DayActivity>>, ApiError> {
    let today = Utc::now().date_naive();
    let weekly = state
        .run_blocking(move |state| ProgressService::weekly(state.store(), today))
        .await?;
    Ok(Json(weekly))
}

/// GET /api/v1/progress/series?limit= - Volume of recent workouts
async fn get_series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<Vec<ProgressPoint>>, ApiError> {
    let series = state
        .run_blocking(move |state| {
            ProgressService::series(state.store(), query.limit, &state.config().engine)
        })
        .await?;
    Ok(Json(series))
}

/// GET /api/v1/progress/records - Personal records
async fn get_records(State(state): State<AppState>) -> Result<Json<RecordsView>, ApiError> {
    let records = state
        .run_blocking(|state| ProgressService::records(state.store()))
        .await?;
    Ok(Json(records))
}

/// GET /api/v1/progress/exercises/:id - 1RM trend and next suggested load
async fn get_exercise_progress(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExerciseProgressResponse>, ApiError> {
    let view = state
        .run_blocking(move |state| {
            ProgressService::exercise(state.store(), state.catalog(), &id, &state.config().engine)
        })
        .await?;
    Ok(Json(view))
}
