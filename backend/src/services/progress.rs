//! Progress views over workout history
//!
//! Thin wrappers over the analytics module; every view is derived from the
//! full history on each request.

use crate::error::ApiError;
use chrono::NaiveDate;
use liftwise_shared::analytics::{
    exercise_progress, exercise_records, overload_baselines, progress_series, total_stats,
    weekly_activity, workout_records, DayActivity, ExerciseRecord, ProgressPoint, ProgressReport,
    WorkoutRecords,
};
use liftwise_shared::types::{ExerciseProgressResponse, StatsResponse};
use liftwise_shared::{EngineConfig, Exercise, PlanGenerator, TrainingStore};
use serde::Serialize;

/// Personal records, per exercise and per workout
#[derive(Debug, Clone, Serialize)]
pub struct RecordsView {
    pub exercises: Vec<ExerciseRecord>,
    pub workouts: WorkoutRecords,
}

pub struct ProgressService;

impl ProgressService {
    /// Every progress view in one response
    pub fn report(
        store: &dyn TrainingStore,
        today: NaiveDate,
        config: &EngineConfig,
    ) -> Result<ProgressReport, ApiError> {
        let history = store.load_history()?;
        Ok(ProgressReport::build(&history, today, config.progress_series_len))
    }

    pub fn stats(store: &dyn TrainingStore, today: NaiveDate) -> Result<StatsResponse, ApiError> {
        let history = store.load_history()?;
        let active_days_this_week = weekly_activity(&history, today)
            .iter()
            .filter(|d| d.active)
            .count();
        Ok(StatsResponse {
            totals: total_stats(&history, today),
            active_days_this_week,
        })
    }

    pub fn weekly(
        store: &dyn TrainingStore,
        today: NaiveDate,
    ) -> Result<Vec<DayActivity>, ApiError> {
        Ok(weekly_activity(&store.load_history()?, today))
    }

    pub fn series(
        store: &dyn TrainingStore,
        limit: Option<usize>,
        config: &EngineConfig,
    ) -> Result<Vec<ProgressPoint>, ApiError> {
        let limit = limit.unwrap_or(config.progress_series_len).max(1);
        Ok(progress_series(&store.load_history()?, limit))
    }

    pub fn records(store: &dyn TrainingStore) -> Result<RecordsView, ApiError> {
        let history = store.load_history()?;
        Ok(RecordsView {
            exercises: exercise_records(&history),
            workouts: workout_records(&history),
        })
    }

    /// 1RM trend for one exercise plus the load the next plan would suggest
    pub fn exercise(
        store: &dyn TrainingStore,
        catalog: &[Exercise],
        exercise_id: &str,
        config: &EngineConfig,
    ) -> Result<ExerciseProgressResponse, ApiError> {
        let exercise = catalog
            .iter()
            .find(|e| e.id == exercise_id)
            .ok_or_else(|| ApiError::NotFound(format!("Exercise {} not found", exercise_id)))?;
        let history = store.load_history()?;
        let unit = store
            .load_settings()?
            .unwrap_or_default()
            .unit_system
            .weight_unit();

        let mut progress = exercise_progress(&history, exercise_id);
        if progress.sessions.is_empty() {
            progress.exercise_name = exercise.name.clone();
        }
        let baselines = overload_baselines(&history);
        let suggested_weight = PlanGenerator::new(config.clone()).target_weight(
            exercise,
            baselines.get(exercise_id),
            unit,
        );

        Ok(ExerciseProgressResponse {
            progress,
            suggested_weight,
            weight_unit: unit,
        })
    }
}
