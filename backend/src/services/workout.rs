//! Workout recording
//!
//! Finalizes a submitted workout into an immutable history record and, when
//! the session was for a plan day, feeds it to the rotation.

use crate::error::ApiError;
use liftwise_shared::types::{RecordWorkoutRequest, RecordWorkoutResponse};
use liftwise_shared::validation::{validate_set_row, ValidationError};
use liftwise_shared::{
    Exercise, ExerciseSetRow, ExerciseSnapshot, FinishedWorkoutSummary, TrainingStore,
    WeightUnit, WorkoutDraft,
};
use metrics::counter;
use std::collections::BTreeMap;
use tracing::{debug, info};
use validator::Validate;

pub struct WorkoutService;

impl WorkoutService {
    /// Finalize, append and update rotation
    ///
    /// Callers hold the state's write lock.
    pub fn record(
        store: &dyn TrainingStore,
        catalog: &[Exercise],
        req: RecordWorkoutRequest,
    ) -> Result<RecordWorkoutResponse, ApiError> {
        req.validate()?;
        let saved_unit = store
            .load_settings()?
            .unwrap_or_default()
            .unit_system
            .weight_unit();
        let draft = Self::build_draft(catalog, req, saved_unit)?;

        let body_weight = store.load_profile()?.map(|p| p.weight_kg());
        let workout = FinishedWorkoutSummary::finalize(draft, body_weight);
        store.append_workout(&workout)?;
        counter!("workouts_recorded_total").increment(1);
        info!(
            id = %workout.id,
            volume = workout.total_volume,
            unit = %workout.weight_unit,
            exercises = workout.exercise_count,
            "Recorded workout"
        );

        let mut day_completed = false;
        let mut next_day = None;
        if let (Some(key), Some(plan)) = (&workout.workout_day, store.load_plan()?) {
            let mut progress = store.load_rotation()?.unwrap_or_default();
            let performed = workout
                .sets
                .iter()
                .filter(|(_, rows)| rows.iter().any(|r| r.completed))
                .map(|(id, _)| id.as_str());
            day_completed = progress.record_session(&plan, key, performed);
            if day_completed {
                store.save_rotation(&progress)?;
            }
            next_day = progress.next(&plan).cloned();
            debug!(day = %key, day_completed, "Rotation updated from workout");
        }

        Ok(RecordWorkoutResponse {
            workout,
            day_completed,
            next_day,
        })
    }

    /// History, newest first
    pub fn history(store: &dyn TrainingStore) -> Result<Vec<FinishedWorkoutSummary>, ApiError> {
        let mut history = store.load_history()?;
        history.sort_by(|a, b| b.finished_at.cmp(&a.finished_at));
        Ok(history)
    }

    fn build_draft(
        catalog: &[Exercise],
        req: RecordWorkoutRequest,
        saved_unit: WeightUnit,
    ) -> Result<WorkoutDraft, ApiError> {
        let mut exercises = Vec::with_capacity(req.exercise_ids.len());
        for id in &req.exercise_ids {
            let exercise = catalog.iter().find(|e| &e.id == id).ok_or_else(|| {
                ApiError::from(ValidationError::new(
                    "exercises",
                    &format!("Unknown exercise {}", id),
                ))
            })?;
            if !exercises.iter().any(|s: &ExerciseSnapshot| &s.id == id) {
                exercises.push(ExerciseSnapshot::from(exercise));
            }
        }

        let mut sets: BTreeMap<String, Vec<ExerciseSetRow>> = BTreeMap::new();
        for (id, rows) in req.sets {
            if !req.exercise_ids.contains(&id) {
                return Err(ValidationError::new(
                    "sets",
                    &format!("Sets logged for {} which is not in the workout", id),
                )
                .into());
            }
            let rows: Vec<ExerciseSetRow> = rows.into_iter().map(ExerciseSetRow::from).collect();
            for row in &rows {
                validate_set_row(row).map_err(|e| ValidationError::new("sets", &e))?;
            }
            sets.insert(id, rows);
        }

        Ok(WorkoutDraft {
            finished_at: req.finished_at,
            duration_seconds: req.duration_seconds,
            exercises,
            sets,
            weight_unit: req.weight_unit.unwrap_or(saved_unit),
            workout_day: req.workout_day,
        })
    }
}
