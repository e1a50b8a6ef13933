//! Plan generation and rotation
//!
//! Loads the onboarding records and history, runs the generator and
//! persists the result. A new plan always starts a fresh rotation: the
//! rotation is reset before the plan is written, and restored if the plan
//! write fails, so a new plan is never paired with stale progress.

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use liftwise_shared::analytics::{overload_baselines, used_exercise_ids};
use liftwise_shared::types::{GeneratePlanResponse, NextWorkoutResponse};
use liftwise_shared::{
    EngineConfig, Exercise, GeneratedPlan, PlanError, PlanGenerator, PlanInputs,
    RotationProgress, TrainingStore, WorkoutDayKey,
};
use metrics::counter;
use tracing::{info, warn};

pub struct PlanService;

impl PlanService {
    /// Generate and persist a plan from the stored records
    ///
    /// Callers hold the state's write lock.
    pub fn generate(
        store: &dyn TrainingStore,
        catalog: &[Exercise],
        config: &EngineConfig,
        now: DateTime<Utc>,
    ) -> Result<GeneratePlanResponse, ApiError> {
        let profile = store.load_profile()?.ok_or(PlanError::MissingProfile)?;
        let settings = store.load_settings()?.ok_or(PlanError::MissingSettings)?;
        let equipment = store.load_equipment()?.unwrap_or_default();
        let history = store.load_history()?;

        let baselines = overload_baselines(&history);
        let used = used_exercise_ids(&history);
        let inputs = PlanInputs {
            catalog,
            settings: &settings,
            profile: Some(&profile),
            equipment: &equipment,
            baselines: &baselines,
            used_exercises: &used,
        };

        let plan = PlanGenerator::new(config.clone()).generate(&inputs, now)?;

        let previous_rotation = store.load_rotation()?;
        store.save_rotation(&RotationProgress::default())?;
        if let Err(e) = store.save_plan(&plan) {
            // An absent rotation already reads as the reset one.
            if let Some(progress) = &previous_rotation {
                if let Err(restore_err) = store.save_rotation(progress) {
                    warn!(
                        error = %restore_err,
                        "Could not restore rotation after failed plan save"
                    );
                }
            }
            return Err(e.into());
        }

        counter!("plans_generated_total").increment(1);
        let degenerate = plan.is_degenerate();
        if degenerate {
            counter!("plans_degenerate_total").increment(1);
            warn!(
                missing = ?plan.missing_muscle_groups,
                "Saved plan with uncovered muscle groups"
            );
        }
        info!(name = %plan.name, days = plan.workout_days.len(), "Plan saved");

        let next_day = plan.workout_days.first().cloned();
        Ok(GeneratePlanResponse {
            plan,
            degenerate,
            next_day,
        })
    }

    pub fn current_plan(store: &dyn TrainingStore) -> Result<GeneratedPlan, ApiError> {
        store
            .load_plan()?
            .ok_or_else(|| ApiError::NotFound("No plan has been generated".to_string()))
    }

    pub fn next_workout(store: &dyn TrainingStore) -> Result<NextWorkoutResponse, ApiError> {
        let plan = Self::current_plan(store)?;
        let progress = store.load_rotation()?.unwrap_or_default();
        Ok(Self::rotation_view(&plan, &progress))
    }

    /// Mark a day done without logging a workout
    pub fn complete_day(
        store: &dyn TrainingStore,
        key: WorkoutDayKey,
    ) -> Result<NextWorkoutResponse, ApiError> {
        let plan = Self::current_plan(store)?;
        if plan.day(&key).is_none() {
            return Err(ApiError::NotFound(format!("Plan has no day {}", key)));
        }

        let mut progress = store.load_rotation()?.unwrap_or_default();
        let wrapped = progress.mark_completed(&plan, &key);
        store.save_rotation(&progress)?;
        info!(day = %key, wrapped, "Marked plan day complete");

        Ok(Self::rotation_view(&plan, &progress))
    }

    pub fn rotation_view(plan: &GeneratedPlan, progress: &RotationProgress) -> NextWorkoutResponse {
        NextWorkoutResponse {
            next_day: progress.next(plan).cloned(),
            completed_days: progress.completed.iter().cloned().collect(),
            total_days: plan.workout_days.len(),
        }
    }
}
