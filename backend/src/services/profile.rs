//! Onboarding records: profile, plan settings and equipment
//!
//! Any change to these invalidates the current plan, since the plan was
//! generated from the previous values.

use crate::error::ApiError;
use chrono::NaiveDate;
use liftwise_shared::types::{UpdateProfileRequest, UpdateSettingsRequest};
use liftwise_shared::validation::validate_profile;
use liftwise_shared::{EquipmentInventory, PlanSettings, TrainingStore, UserProfile};
use std::collections::BTreeSet;
use tracing::info;
use validator::Validate;

/// Profile service for onboarding records
pub struct ProfileService;

impl ProfileService {
    pub fn get_profile(store: &dyn TrainingStore) -> Result<UserProfile, ApiError> {
        store
            .load_profile()?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))
    }

    /// Validate and save the profile
    pub fn update_profile(
        store: &dyn TrainingStore,
        req: UpdateProfileRequest,
        today: NaiveDate,
    ) -> Result<UserProfile, ApiError> {
        req.validate()?;
        let profile: UserProfile = req.into();
        validate_profile(&profile, today)?;

        store.save_profile(&profile)?;
        Self::invalidate_plan(store, "profile")?;
        Ok(profile)
    }

    /// Saved settings, or defaults when none were saved yet
    pub fn get_settings(store: &dyn TrainingStore) -> Result<PlanSettings, ApiError> {
        Ok(store.load_settings()?.unwrap_or_default())
    }

    pub fn update_settings(
        store: &dyn TrainingStore,
        req: UpdateSettingsRequest,
    ) -> Result<PlanSettings, ApiError> {
        req.validate()?;
        let settings: PlanSettings = req.into();

        store.save_settings(&settings)?;
        Self::invalidate_plan(store, "settings")?;
        Ok(settings)
    }

    /// Saved inventory; empty means nothing was restricted
    pub fn get_equipment(store: &dyn TrainingStore) -> Result<EquipmentInventory, ApiError> {
        Ok(store.load_equipment()?.unwrap_or_default())
    }

    pub fn update_equipment(
        store: &dyn TrainingStore,
        equipment: EquipmentInventory,
    ) -> Result<EquipmentInventory, ApiError> {
        let equipment = normalize_inventory(equipment);
        store.save_equipment(&equipment)?;
        Self::invalidate_plan(store, "equipment")?;
        Ok(equipment)
    }

    fn invalidate_plan(store: &dyn TrainingStore, reason: &str) -> Result<(), ApiError> {
        store.delete_plan()?;
        info!(reason, "Plan invalidated");
        Ok(())
    }
}

/// Trim item names and drop blanks
fn normalize_inventory(equipment: EquipmentInventory) -> EquipmentInventory {
    let clean = |items: BTreeSet<String>| -> BTreeSet<String> {
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    };
    EquipmentInventory {
        machines: clean(equipment.machines),
        benches: clean(equipment.benches),
        free_weights: clean(equipment.free_weights),
        other: clean(equipment.other),
        bodyweight_only: equipment.bodyweight_only,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;
    use chrono::{TimeZone, Utc};
    use liftwise_shared::GeneratedPlan;

    fn settings_request(workouts_per_week: u8) -> UpdateSettingsRequest {
        serde_json::from_value(serde_json::json!({ "workouts_per_week": workouts_per_week }))
            .unwrap()
    }

    fn seed_plan(store: &MemoryStore) {
        store
            .save_plan(&GeneratedPlan {
                name: "Old".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                workout_days: vec![],
                missing_muscle_groups: vec![],
                alternative_exercises: vec![],
            })
            .unwrap();
    }

    #[test]
    fn test_settings_default_when_absent() {
        let store = MemoryStore::new();
        assert_eq!(ProfileService::get_settings(&store).unwrap(), PlanSettings::default());
    }

    #[test]
    fn test_saving_settings_invalidates_plan() {
        let store = MemoryStore::new();
        seed_plan(&store);
        ProfileService::update_settings(&store, settings_request(4)).unwrap();
        assert!(store.load_plan().unwrap().is_none());
        assert_eq!(store.load_settings().unwrap().unwrap().workouts_per_week, 4);
    }

    #[test]
    fn test_invalid_settings_leave_plan_alone() {
        let store = MemoryStore::new();
        seed_plan(&store);
        assert!(ProfileService::update_settings(&store, settings_request(0)).is_err());
        assert!(store.load_plan().unwrap().is_some());
    }

    #[test]
    fn test_equipment_names_are_trimmed() {
        let store = MemoryStore::new();
        let mut equipment = EquipmentInventory::default();
        equipment.free_weights.insert("  Dumbbells ".to_string());
        equipment.other.insert("   ".to_string());

        let saved = ProfileService::update_equipment(&store, equipment).unwrap();
        assert!(saved.free_weights.contains("Dumbbells"));
        assert!(saved.other.is_empty());
    }

    #[test]
    fn test_missing_profile_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            ProfileService::get_profile(&store),
            Err(ApiError::NotFound(_))
        ));
    }
}
