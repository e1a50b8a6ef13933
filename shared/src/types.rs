//! API request and response types

use crate::analytics::{ExerciseProgress, TotalStats};
use crate::models::{
    BodyRegion, ExerciseSetRow, ExerciseVariability, ExperienceLevel, FinishedWorkoutSummary,
    Gender, GeneratedPlan, MovementCategory, PainStatus, PlanSettings, SessionDuration,
    SquatComfort, TrainingGoal, TrainingSplit, UserProfile, WorkoutDay, WorkoutDayKey,
};
use crate::units::{HeightUnit, UnitSystem, WeightUnit};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Onboarding
// ============================================================================

/// Profile submitted at the end of onboarding or from the profile screen
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    #[validate(range(min = 1.0, max = 400.0))]
    pub height: f64,
    pub height_unit: HeightUnit,
    #[validate(range(min = 1.0, max = 1500.0))]
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub experience: ExperienceLevel,
    #[serde(default)]
    pub pain_status: PainStatus,
    #[serde(default)]
    pub pain_locations: BTreeSet<BodyRegion>,
    #[serde(default)]
    #[validate(range(min = 0, max = 10))]
    pub pain_level: u8,
    #[serde(default)]
    pub pain_triggers: BTreeSet<MovementCategory>,
    #[serde(default)]
    pub squat_comfort: SquatComfort,
}

impl From<UpdateProfileRequest> for UserProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            gender: req.gender,
            date_of_birth: req.date_of_birth,
            height: req.height,
            height_unit: req.height_unit,
            weight: req.weight,
            weight_unit: req.weight_unit,
            experience: req.experience,
            pain_status: req.pain_status,
            pain_locations: req.pain_locations,
            pain_level: req.pain_level,
            pain_triggers: req.pain_triggers,
            squat_comfort: req.squat_comfort,
        }
    }
}

/// Plan preferences from the settings screen
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub goal: TrainingGoal,
    #[validate(range(min = 1, max = 7))]
    pub workouts_per_week: u8,
    #[serde(default)]
    pub duration: SessionDuration,
    #[serde(default)]
    pub experience: ExperienceLevel,
    #[serde(default)]
    pub split: TrainingSplit,
    #[serde(default)]
    pub variability: ExerciseVariability,
    #[serde(default)]
    pub unit_system: UnitSystem,
    #[serde(default)]
    pub cardio: bool,
    #[serde(default)]
    pub stretching: bool,
}

impl From<UpdateSettingsRequest> for PlanSettings {
    fn from(req: UpdateSettingsRequest) -> Self {
        Self {
            goal: req.goal,
            workouts_per_week: req.workouts_per_week,
            duration: req.duration,
            experience: req.experience,
            split: req.split,
            variability: req.variability,
            unit_system: req.unit_system,
            cardio: req.cardio,
            stretching: req.stretching,
        }
    }
}

// ============================================================================
// Plan and Rotation
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePlanResponse {
    pub plan: GeneratedPlan,
    /// True when some focus group had no usable exercise
    pub degenerate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_day: Option<WorkoutDay>,
}

/// Rotation state for the "next workout" card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextWorkoutResponse {
    pub next_day: Option<WorkoutDay>,
    pub completed_days: Vec<WorkoutDayKey>,
    pub total_days: usize,
}

/// Manually mark a plan day as done
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteDayRequest {
    pub day_number: u8,
    pub day_name: String,
}

impl From<CompleteDayRequest> for WorkoutDayKey {
    fn from(req: CompleteDayRequest) -> Self {
        Self {
            day_number: req.day_number,
            day_name: req.day_name,
        }
    }
}

// ============================================================================
// Exercise Catalog
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplacementQuery {
    #[serde(default)]
    pub q: Option<String>,
    /// Plan day the replacement is for; its other exercises are excluded
    #[serde(default)]
    pub day_number: Option<u8>,
}

// ============================================================================
// Workouts
// ============================================================================

/// One logged set as submitted by the client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct SetRowInput {
    #[validate(range(min = 0.0, max = 2000.0))]
    pub weight: f64,
    #[validate(range(max = 1000))]
    pub reps: u32,
    #[serde(default)]
    pub completed: bool,
}

impl From<SetRowInput> for ExerciseSetRow {
    fn from(input: SetRowInput) -> Self {
        Self {
            weight: input.weight,
            reps: input.reps,
            completed: input.completed,
        }
    }
}

/// Finished workout submitted from the logging screen
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordWorkoutRequest {
    #[serde(default = "Utc::now")]
    pub finished_at: DateTime<Utc>,
    #[validate(range(max = 86400))]
    pub duration_seconds: u32,
    /// Catalog ids in the order they were performed
    #[validate(length(min = 1))]
    pub exercise_ids: Vec<String>,
    #[serde(default)]
    pub sets: BTreeMap<String, Vec<SetRowInput>>,
    /// Unit the weights were entered in; the saved unit system when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<WeightUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_day: Option<WorkoutDayKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordWorkoutResponse {
    pub workout: FinishedWorkoutSummary,
    /// Whether the session completed its plan day
    pub day_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_day: Option<WorkoutDay>,
}

// ============================================================================
// Progress
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub totals: TotalStats,
    pub active_days_this_week: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseProgressResponse {
    #[serde(flatten)]
    pub progress: ExerciseProgress,
    /// Next suggested load derived from the latest session
    pub suggested_weight: f64,
    pub weight_unit: WeightUnit,
}
