//! Data model for the training engine
//!
//! Records are plain serde structs so the host can persist them in whatever
//! store it wires behind [`crate::store::TrainingStore`].

use crate::units::{HeightUnit, UnitSystem, WeightUnit};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use uuid::Uuid;

/// Equipment requirement value for exercises that need nothing
pub const NO_EQUIPMENT: &str = "none";

// ============================================================================
// User Profile
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Training experience tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PainStatus {
    #[default]
    NoPain,
    Occasional,
    Chronic,
}

/// Body regions a user can report pain in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRegion {
    LowerBack,
    UpperBack,
    Neck,
    Shoulders,
    Elbows,
    Wrists,
    Hips,
    Knees,
    Ankles,
}

/// Movement categories, matching the `category` field of catalog exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementCategory {
    Squat,
    Hinge,
    Lunge,
    Push,
    Pull,
    Overhead,
    Rotation,
    Carry,
}

impl MovementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementCategory::Squat => "squat",
            MovementCategory::Hinge => "hinge",
            MovementCategory::Lunge => "lunge",
            MovementCategory::Push => "push",
            MovementCategory::Pull => "pull",
            MovementCategory::Overhead => "overhead",
            MovementCategory::Rotation => "rotation",
            MovementCategory::Carry => "carry",
        }
    }
}

/// Answer to "can you squat without pain?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SquatComfort {
    #[default]
    Yes,
    Somewhat,
    No,
}

/// Physical profile collected during onboarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub height: f64,
    pub height_unit: HeightUnit,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub experience: ExperienceLevel,
    pub pain_status: PainStatus,
    #[serde(default)]
    pub pain_locations: BTreeSet<BodyRegion>,
    /// 0 (none) to 10 (worst)
    #[serde(default)]
    pub pain_level: u8,
    #[serde(default)]
    pub pain_triggers: BTreeSet<MovementCategory>,
    #[serde(default)]
    pub squat_comfort: SquatComfort,
}

impl UserProfile {
    pub fn weight_kg(&self) -> f64 {
        self.weight_unit.to_kg(self.weight)
    }

    pub fn height_cm(&self) -> f64 {
        self.height_unit.to_cm(self.height)
    }

    /// Whether pain-derived constraints apply
    pub fn has_pain(&self) -> bool {
        self.pain_status != PainStatus::NoPain || self.pain_level > 0
    }
}

// ============================================================================
// Plan Settings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrainingGoal {
    #[default]
    HypertrophySafe,
    RehabFocused,
}

/// Session length bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionDuration {
    #[serde(rename = "30_min")]
    Minutes30,
    #[serde(rename = "45_min")]
    Minutes45,
    #[default]
    #[serde(rename = "60_min")]
    Minutes60,
    #[serde(rename = "90_min")]
    Minutes90,
}

impl SessionDuration {
    pub fn minutes(&self) -> u32 {
        match self {
            SessionDuration::Minutes30 => 30,
            SessionDuration::Minutes45 => 45,
            SessionDuration::Minutes60 => 60,
            SessionDuration::Minutes90 => 90,
        }
    }
}

/// Weekly split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrainingSplit {
    #[default]
    PushPullLegs,
    UpperLower,
    FullBody,
    FreshMuscleGroups,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseVariability {
    MoreConsistent,
    #[default]
    Balanced,
    MoreVariable,
}

/// User-editable training preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSettings {
    pub goal: TrainingGoal,
    /// 1 to 7
    pub workouts_per_week: u8,
    pub duration: SessionDuration,
    pub experience: ExperienceLevel,
    pub split: TrainingSplit,
    pub variability: ExerciseVariability,
    pub unit_system: UnitSystem,
    pub cardio: bool,
    pub stretching: bool,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            goal: TrainingGoal::default(),
            workouts_per_week: 3,
            duration: SessionDuration::default(),
            experience: ExperienceLevel::default(),
            split: TrainingSplit::default(),
            variability: ExerciseVariability::default(),
            unit_system: UnitSystem::default(),
            cardio: false,
            stretching: false,
        }
    }
}

// ============================================================================
// Equipment
// ============================================================================

/// Equipment items the user marked as selected, grouped by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentInventory {
    #[serde(default)]
    pub machines: BTreeSet<String>,
    #[serde(default)]
    pub benches: BTreeSet<String>,
    #[serde(default)]
    pub free_weights: BTreeSet<String>,
    #[serde(default)]
    pub other: BTreeSet<String>,
    /// Explicit restriction to bodyweight work, overriding the selections
    #[serde(default)]
    pub bodyweight_only: bool,
}

impl EquipmentInventory {
    pub fn is_empty(&self) -> bool {
        self.items().next().is_none()
    }

    /// All selected items across categories
    pub fn items(&self) -> impl Iterator<Item = &String> {
        self.machines
            .iter()
            .chain(self.benches.iter())
            .chain(self.free_weights.iter())
            .chain(self.other.iter())
    }

    /// Resolve the equipment the generator may use
    ///
    /// An empty inventory means nothing was restricted, so everything is
    /// available unless the user chose bodyweight-only.
    pub fn access(&self) -> EquipmentAccess {
        if self.bodyweight_only {
            EquipmentAccess::BodyweightOnly
        } else if self.is_empty() {
            EquipmentAccess::Any
        } else {
            EquipmentAccess::Only(self.items().map(|item| item.to_lowercase()).collect())
        }
    }
}

/// Effective equipment availability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipmentAccess {
    Any,
    BodyweightOnly,
    /// Lowercased item identifiers
    Only(BTreeSet<String>),
}

impl EquipmentAccess {
    pub fn permits(&self, requirement: &str) -> bool {
        if is_no_equipment(requirement) {
            return true;
        }
        match self {
            EquipmentAccess::Any => true,
            EquipmentAccess::BodyweightOnly => false,
            EquipmentAccess::Only(items) => items.contains(&requirement.to_lowercase()),
        }
    }
}

pub fn is_no_equipment(requirement: &str) -> bool {
    let requirement = requirement.trim();
    requirement.is_empty()
        || requirement.eq_ignore_ascii_case(NO_EQUIPMENT)
        || requirement.eq_ignore_ascii_case("bodyweight")
}

// ============================================================================
// Exercise Catalog
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Severity of a per-issue restriction, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionLevel {
    #[default]
    None,
    Caution,
    Avoid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryRestriction {
    pub issue: BodyRegion,
    pub level: RestrictionLevel,
    #[serde(default)]
    pub recommendation: String,
}

/// Catalog exercise. Reference data, never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub muscle_groups: Vec<String>,
    pub equipment: String,
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub default_sets: u32,
    pub default_reps: u32,
    #[serde(default)]
    pub default_weight: f64,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default)]
    pub back_restrictions: Vec<InjuryRestriction>,
    #[serde(default)]
    pub back_friendly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl Exercise {
    pub fn trains(&self, muscle_group: &str) -> bool {
        self.muscle_groups
            .iter()
            .any(|group| group.eq_ignore_ascii_case(muscle_group))
    }

    pub fn needs_equipment(&self) -> bool {
        !is_no_equipment(&self.equipment)
    }

    pub fn is_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }

    /// Most severe restriction applying to any of the given regions
    pub fn restriction_for<'a>(
        &self,
        regions: impl IntoIterator<Item = &'a BodyRegion>,
    ) -> Option<&InjuryRestriction> {
        let regions: Vec<&BodyRegion> = regions.into_iter().collect();
        self.back_restrictions
            .iter()
            .filter(|r| regions.contains(&&r.issue))
            .max_by_key(|r| r.level)
    }
}

// ============================================================================
// Generated Plan
// ============================================================================

/// Identity of a workout day inside a plan
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkoutDayKey {
    pub day_number: u8,
    pub day_name: String,
}

impl fmt::Display for WorkoutDayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day_number, self.day_name)
    }
}

/// An exercise placed in a plan with its targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedExercise {
    pub exercise: Exercise,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    /// Best estimated 1RM from history, when the exercise was done before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_one_rep_max: Option<f64>,
    /// Recommendation text for caution-level restrictions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    /// 0 to 6
    pub day_number: u8,
    pub day_name: String,
    pub focus: Vec<String>,
    pub exercises: Vec<PlannedExercise>,
}

impl WorkoutDay {
    pub fn key(&self) -> WorkoutDayKey {
        WorkoutDayKey {
            day_number: self.day_number,
            day_name: self.day_name.clone(),
        }
    }

    pub fn has_key(&self, key: &WorkoutDayKey) -> bool {
        self.day_number == key.day_number && self.day_name == key.day_name
    }

    pub fn contains_exercise(&self, exercise_id: &str) -> bool {
        self.exercises.iter().any(|p| p.exercise.id == exercise_id)
    }
}

/// Substitute proposed for a muscle group the equipment could not cover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeExercise {
    pub muscle_group: String,
    pub exercise_id: String,
    pub name: String,
    pub equipment: String,
    pub score: u32,
}

/// The user's current plan. Replaced wholesale on regeneration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub workout_days: Vec<WorkoutDay>,
    #[serde(default)]
    pub missing_muscle_groups: Vec<String>,
    #[serde(default)]
    pub alternative_exercises: Vec<AlternativeExercise>,
}

impl GeneratedPlan {
    pub fn day(&self, key: &WorkoutDayKey) -> Option<&WorkoutDay> {
        self.workout_days.iter().find(|d| d.has_key(key))
    }

    pub fn day_by_number(&self, day_number: u8) -> Option<&WorkoutDay> {
        self.workout_days.iter().find(|d| d.day_number == day_number)
    }

    /// True when at least one focus muscle group could not be covered
    pub fn is_degenerate(&self) -> bool {
        !self.missing_muscle_groups.is_empty()
    }
}

// ============================================================================
// Workout History
// ============================================================================

/// One logged set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSetRow {
    pub weight: f64,
    pub reps: u32,
    pub completed: bool,
}

impl ExerciseSetRow {
    pub fn volume(&self) -> f64 {
        if self.completed {
            self.weight * self.reps as f64
        } else {
            0.0
        }
    }
}

/// Exercise identity as it was when the workout was finished
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    pub category: String,
}

impl From<&Exercise> for ExerciseSnapshot {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id.clone(),
            name: exercise.name.clone(),
            muscle_groups: exercise.muscle_groups.clone(),
            category: exercise.category.clone(),
        }
    }
}

/// Workout data handed over by the host when the user taps "finish"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDraft {
    pub finished_at: DateTime<Utc>,
    pub duration_seconds: u32,
    pub exercises: Vec<ExerciseSnapshot>,
    pub sets: BTreeMap<String, Vec<ExerciseSetRow>>,
    /// Unit the set weights were entered in
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_day: Option<WorkoutDayKey>,
}

/// Body weight assumed for calorie estimates when the profile has none
pub const DEFAULT_BODY_WEIGHT_KG: f64 = 70.0;

/// MET value for general resistance training
const RESISTANCE_TRAINING_MET: f64 = 5.0;

/// Immutable history record of a finished workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedWorkoutSummary {
    pub id: Uuid,
    pub finished_at: DateTime<Utc>,
    pub duration_seconds: u32,
    pub total_volume: f64,
    pub calories: f64,
    pub exercise_count: u32,
    pub exercises: Vec<ExerciseSnapshot>,
    pub sets: BTreeMap<String, Vec<ExerciseSetRow>>,
    /// Unit of the set weights and `total_volume`; records written before
    /// units were tracked are kilograms
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_day: Option<WorkoutDayKey>,
}

impl FinishedWorkoutSummary {
    /// Build the complete history record from a draft
    pub fn finalize(draft: WorkoutDraft, body_weight_kg: Option<f64>) -> Self {
        let total_volume = draft
            .sets
            .values()
            .flat_map(|rows| rows.iter())
            .map(ExerciseSetRow::volume)
            .sum();

        let body_weight = body_weight_kg
            .filter(|w| *w > 0.0)
            .unwrap_or(DEFAULT_BODY_WEIGHT_KG);
        let hours = draft.duration_seconds as f64 / 3600.0;
        let calories = (RESISTANCE_TRAINING_MET * body_weight * hours).round();

        Self {
            id: Uuid::new_v4(),
            finished_at: draft.finished_at,
            duration_seconds: draft.duration_seconds,
            total_volume,
            calories,
            exercise_count: draft.exercises.len() as u32,
            exercises: draft.exercises,
            sets: draft.sets,
            weight_unit: draft.weight_unit,
            workout_day: draft.workout_day,
        }
    }

    pub fn volume_kg(&self) -> f64 {
        self.weight_unit.to_kg(self.total_volume)
    }

    /// Logged rows for one exercise with weights converted to kilograms
    pub fn rows_in_kg(&self, exercise_id: &str) -> Vec<ExerciseSetRow> {
        self.rows_for(exercise_id)
            .iter()
            .map(|row| ExerciseSetRow {
                weight: self.weight_unit.to_kg(row.weight),
                ..*row
            })
            .collect()
    }

    pub fn finished_on(&self) -> NaiveDate {
        self.finished_at.date_naive()
    }

    /// Logged rows for one exercise, empty when it was not performed
    pub fn rows_for(&self, exercise_id: &str) -> &[ExerciseSetRow] {
        self.sets.get(exercise_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Exercise ids that were performed, in snapshot order
    pub fn exercise_ids(&self) -> impl Iterator<Item = &str> {
        self.exercises.iter().map(|e| e.id.as_str())
    }
}
