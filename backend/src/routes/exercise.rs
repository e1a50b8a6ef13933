//! Exercise catalog API routes

use crate::error::ApiError;
use crate::services::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use liftwise_shared::matcher::ScoredExercise;
use liftwise_shared::types::{ExerciseSearchQuery, ReplacementQuery};
use liftwise_shared::Exercise;

/// Create exercise routes
pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search_exercises))
        .route("/:id", get(get_exercise))
        .route("/:id/suggestions", get(get_suggestions))
        .route("/:id/replacements", get(get_replacements))
}

/// GET /api/v1/exercises?q= - Search the catalog by name or muscle group
async fn search_exercises(
    State(state): State<AppState>,
    Query(query): Query<ExerciseSearchQuery>,
) -> Json<Vec<Exercise>> {
    let results = CatalogService::search(state.catalog(), query.q.as_deref());
    Json(results.into_iter().cloned().collect())
}

/// GET /api/v1/exercises/:id
async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Exercise>, ApiError> {
    Ok(Json(CatalogService::find(state.catalog(), &id)?.clone()))
}

/// GET /api/v1/exercises/:id/suggestions - Closest alternatives, best first
async fn get_suggestions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ScoredExercise>>, ApiError> {
    let suggestions = CatalogService::suggestions(state.catalog(), &id, &state.config().engine)?;
    Ok(Json(suggestions))
}

/// GET /api/v1/exercises/:id/replacements?q=&day_number=
///
/// When `day_number` names a day of the current plan, that day's other
/// exercises are left out.
async fn get_replacements(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ReplacementQuery>,
) -> Result<Json<Vec<Exercise>>, ApiError> {
    let results = state
        .run_blocking(move |state| {
            let plan = match query.day_number {
                Some(_) => state.store().load_plan()?,
                None => None,
            };
            CatalogService::replacements(
                state.catalog(),
                &id,
                query.q.as_deref(),
                plan.as_ref(),
                query.day_number,
                &state.config().engine,
            )
        })
        .await?;
    Ok(Json(results))
}
