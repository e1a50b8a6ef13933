//! Engine tuning knobs
//!
//! The host deserializes this from its `engine` config section; every field
//! has a default so a partial section is fine.

use crate::analytics::DEFAULT_SERIES_LEN;
use crate::matcher::{ALL_REPLACEMENT_CAP, SUGGESTED_REPLACEMENT_CAP};
use crate::units::WeightUnit;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Overload increment for metric plans
    pub progression_step_kg: f64,
    /// Overload increment for imperial plans
    pub progression_step_lbs: f64,
    pub progress_series_len: usize,
    pub suggested_replacement_cap: usize,
    pub all_replacement_cap: usize,
    pub alternatives_per_missing_group: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            progression_step_kg: 2.5,
            progression_step_lbs: 5.0,
            progress_series_len: DEFAULT_SERIES_LEN,
            suggested_replacement_cap: SUGGESTED_REPLACEMENT_CAP,
            all_replacement_cap: ALL_REPLACEMENT_CAP,
            alternatives_per_missing_group: 3,
        }
    }
}

impl EngineConfig {
    pub fn progression_step(&self, unit: WeightUnit) -> f64 {
        match unit {
            WeightUnit::Kg => self.progression_step_kg,
            WeightUnit::Lbs => self.progression_step_lbs,
        }
    }
}
