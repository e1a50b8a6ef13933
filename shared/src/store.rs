//! Persistence port
//!
//! The engine never touches storage itself. Hosts implement
//! [`TrainingStore`] and the services load records, run the engine and save
//! the results. History is append-only.

use crate::errors::StoreError;
use crate::models::{
    EquipmentInventory, FinishedWorkoutSummary, GeneratedPlan, PlanSettings, UserProfile,
};
use crate::rotation::RotationProgress;

/// Logical record keys, also used as file stems by file-backed stores
pub mod keys {
    pub const PROFILE: &str = "profile";
    pub const SETTINGS: &str = "plan_settings";
    pub const EQUIPMENT: &str = "equipment";
    pub const PLAN: &str = "generated_plan";
    pub const ROTATION: &str = "rotation_progress";
    pub const HISTORY: &str = "workout_history";

    pub const ALL: [&str; 6] = [PROFILE, SETTINGS, EQUIPMENT, PLAN, ROTATION, HISTORY];
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Typed load/save for every record the engine reads or writes
///
/// `load_*` returns `Ok(None)` for an absent record. Implementations should
/// treat a record they cannot decode as absent rather than failing.
pub trait TrainingStore: Send + Sync {
    fn load_profile(&self) -> StoreResult<Option<UserProfile>>;
    fn save_profile(&self, profile: &UserProfile) -> StoreResult<()>;

    fn load_settings(&self) -> StoreResult<Option<PlanSettings>>;
    fn save_settings(&self, settings: &PlanSettings) -> StoreResult<()>;

    fn load_equipment(&self) -> StoreResult<Option<EquipmentInventory>>;
    fn save_equipment(&self, equipment: &EquipmentInventory) -> StoreResult<()>;

    fn load_plan(&self) -> StoreResult<Option<GeneratedPlan>>;
    fn save_plan(&self, plan: &GeneratedPlan) -> StoreResult<()>;
    /// Remove the plan together with its rotation progress
    fn delete_plan(&self) -> StoreResult<()>;

    fn load_rotation(&self) -> StoreResult<Option<RotationProgress>>;
    fn save_rotation(&self, progress: &RotationProgress) -> StoreResult<()>;

    /// Finished workouts in the order they were appended
    fn load_history(&self) -> StoreResult<Vec<FinishedWorkoutSummary>>;
    fn append_workout(&self, workout: &FinishedWorkoutSummary) -> StoreResult<()>;

    /// Whether writes can currently succeed, for readiness checks
    fn is_writable(&self) -> bool {
        true
    }
}
