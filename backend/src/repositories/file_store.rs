//! JSON-file record store
//!
//! One file per logical record under the data directory. Writes go to a
//! temporary sibling first and are renamed into place, so a reader never
//! sees a half-written record.

use liftwise_shared::store::{keys, StoreResult};
use liftwise_shared::{
    EquipmentInventory, FinishedWorkoutSummary, GeneratedPlan, PlanSettings, RotationProgress,
    StoreError, TrainingStore, UserProfile,
};
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// File-backed implementation of the persistence port
pub struct JsonFileStore {
    data_dir: PathBuf,
    /// Guards read-modify-write of the history file
    history_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed
    pub fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        debug!(data_dir = %data_dir.display(), "Opened record store");
        Ok(Self {
            data_dir,
            history_lock: Mutex::new(()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// Read a record; unreadable JSON counts as absent
    fn read<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let path = self.path(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable record");
                Ok(None)
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let path = self.path(key);
        let tmp = self.data_dir.join(format!("{}.json.tmp", key));
        let json = serde_json::to_vec_pretty(value)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        debug!(key, "Saved record");
        Ok(())
    }

    /// Read the history file, moving an unreadable one aside
    ///
    /// The bad file is renamed to `workout_history.json.corrupt-<timestamp>`
    /// so an append never overwrites records it could not parse.
    fn read_history_for_append(&self) -> StoreResult<Vec<FinishedWorkoutSummary>> {
        let path = self.path(keys::HISTORY);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(history) => Ok(history),
            Err(e) => {
                let aside = self.data_dir.join(format!(
                    "{}.json.corrupt-{}",
                    keys::HISTORY,
                    Utc::now().format("%Y%m%dT%H%M%S%.3f")
                ));
                fs::rename(&path, &aside)?;
                warn!(
                    error = %e,
                    moved_to = %aside.display(),
                    "Moved unreadable workout history aside"
                );
                Ok(Vec::new())
            }
        }
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl TrainingStore for JsonFileStore {
    fn load_profile(&self) -> StoreResult<Option<UserProfile>> {
        self.read(keys::PROFILE)
    }

    fn save_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        self.write(keys::PROFILE, profile)
    }

    fn load_settings(&self) -> StoreResult<Option<PlanSettings>> {
        self.read(keys::SETTINGS)
    }

    fn save_settings(&self, settings: &PlanSettings) -> StoreResult<()> {
        self.write(keys::SETTINGS, settings)
    }

    fn load_equipment(&self) -> StoreResult<Option<EquipmentInventory>> {
        self.read(keys::EQUIPMENT)
    }

    fn save_equipment(&self, equipment: &EquipmentInventory) -> StoreResult<()> {
        self.write(keys::EQUIPMENT, equipment)
    }

    fn load_plan(&self) -> StoreResult<Option<GeneratedPlan>> {
        self.read(keys::PLAN)
    }

    fn save_plan(&self, plan: &GeneratedPlan) -> StoreResult<()> {
        self.write(keys::PLAN, plan)
    }

    fn delete_plan(&self) -> StoreResult<()> {
        self.remove(keys::PLAN)?;
        self.remove(keys::ROTATION)
    }

    fn load_rotation(&self) -> StoreResult<Option<RotationProgress>> {
        self.read(keys::ROTATION)
    }

    fn save_rotation(&self, progress: &RotationProgress) -> StoreResult<()> {
        self.write(keys::ROTATION, progress)
    }

    fn load_history(&self) -> StoreResult<Vec<FinishedWorkoutSummary>> {
        Ok(self.read(keys::HISTORY)?.unwrap_or_default())
    }

    fn append_workout(&self, workout: &FinishedWorkoutSummary) -> StoreResult<()> {
        let _guard = self
            .history_lock
            .lock()
            .map_err(|_| StoreError::Unavailable("history lock poisoned".to_string()))?;
        let mut history = self.read_history_for_append()?;
        history.push(workout.clone());
        self.write(keys::HISTORY, &history)
    }

    fn is_writable(&self) -> bool {
        let marker = self.data_dir.join(".write-check");
        let ok = fs::write(&marker, b"ok").is_ok();
        let _ = fs::remove_file(&marker);
        ok
    }
}
