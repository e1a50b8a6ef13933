//! In-memory record store for tests and ephemeral runs

use liftwise_shared::store::StoreResult;
use liftwise_shared::{
    EquipmentInventory, FinishedWorkoutSummary, GeneratedPlan, PlanSettings, RotationProgress,
    StoreError, TrainingStore, UserProfile,
};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Records {
    profile: Option<UserProfile>,
    settings: Option<PlanSettings>,
    equipment: Option<EquipmentInventory>,
    plan: Option<GeneratedPlan>,
    rotation: Option<RotationProgress>,
    history: Vec<FinishedWorkoutSummary>,
}

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Records>> {
        self.records
            .read()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Records>> {
        self.records
            .write()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))
    }
}

impl TrainingStore for MemoryStore {
    fn load_profile(&self) -> StoreResult<Option<UserProfile>> {
        Ok(self.read()?.profile.clone())
    }

    fn save_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        self.write()?.profile = Some(profile.clone());
        Ok(())
    }

    fn load_settings(&self) -> StoreResult<Option<PlanSettings>> {
        Ok(self.read()?.settings.clone())
    }

    fn save_settings(&self, settings: &PlanSettings) -> StoreResult<()> {
        self.write()?.settings = Some(settings.clone());
        Ok(())
    }

    fn load_equipment(&self) -> StoreResult<Option<EquipmentInventory>> {
        Ok(self.read()?.equipment.clone())
    }

    fn save_equipment(&self, equipment: &EquipmentInventory) -> StoreResult<()> {
        self.write()?.equipment = Some(equipment.clone());
        Ok(())
    }

    fn load_plan(&self) -> StoreResult<Option<GeneratedPlan>> {
        Ok(self.read()?.plan.clone())
    }

    fn save_plan(&self, plan: &GeneratedPlan) -> StoreResult<()> {
        self.write()?.plan = Some(plan.clone());
        Ok(())
    }

    fn delete_plan(&self) -> StoreResult<()> {
        let mut records = self.write()?;
        records.plan = None;
        records.rotation = None;
        Ok(())
    }

    fn load_rotation(&self) -> StoreResult<Option<RotationProgress>> {
        Ok(self.read()?.rotation.clone())
    }

    fn save_rotation(&self, progress: &RotationProgress) -> StoreResult<()> {
        self.write()?.rotation = Some(progress.clone());
        Ok(())
    }

    fn load_history(&self) -> StoreResult<Vec<FinishedWorkoutSummary>> {
        Ok(self.read()?.history.clone())
    }

    fn append_workout(&self, workout: &FinishedWorkoutSummary) -> StoreResult<()> {
        self.write()?.history.push(workout.clone());
        Ok(())
    }
}
