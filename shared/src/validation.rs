//! Input validation functions
//!
//! Range checks for onboarding and workout logging. Request types in
//! [`crate::types`] also carry `validator` derives for the simple bounds.

use crate::models::{ExerciseSetRow, UserProfile};
use chrono::NaiveDate;

/// Heaviest load accepted on a single logged set, in either unit
pub const MAX_SET_WEIGHT: f64 = 2000.0;
pub const MAX_SET_REPS: u32 = 1000;

/// Validate body weight (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate date of birth against `today`
/// Must not be in the future, and age must be between 1 and 150 years
pub fn validate_date_of_birth(dob: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if dob > today {
        return Err("Date of birth cannot be in the future".to_string());
    }

    match today.years_since(dob) {
        Some(age) if age < 1 => Err("Age must be at least 1 year".to_string()),
        Some(age) if age > 150 => Err("Age cannot exceed 150 years".to_string()),
        None => Err("Invalid date of birth".to_string()),
        _ => Ok(()),
    }
}

/// Validate one logged set
pub fn validate_set_row(row: &ExerciseSetRow) -> Result<(), String> {
    if row.weight.is_nan() || row.weight.is_infinite() {
        return Err("Set weight must be a valid number".to_string());
    }
    if row.weight < 0.0 {
        return Err("Set weight cannot be negative".to_string());
    }
    if row.weight > MAX_SET_WEIGHT {
        return Err(format!("Set weight must be at most {}", MAX_SET_WEIGHT));
    }
    if row.reps > MAX_SET_REPS {
        return Err(format!("Reps must be at most {}", MAX_SET_REPS));
    }
    Ok(())
}

/// Run the hand-written checks for a full profile
pub fn validate_profile(profile: &UserProfile, today: NaiveDate) -> Result<(), ValidationError> {
    validate_height_cm(profile.height_cm()).map_err(|e| ValidationError::new("height", &e))?;
    validate_weight(profile.weight_kg()).map_err(|e| ValidationError::new("weight", &e))?;
    validate_date_of_birth(profile.date_of_birth, today)
        .map_err(|e| ValidationError::new("date_of_birth", &e))?;
    if profile.pain_level > 10 {
        return Err(ValidationError::new(
            "pain_level",
            "Pain level must be between 0 and 10",
        ));
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" => "Current Weight",
        "height" | "height_cm" => "Height",
        "date_of_birth" => "Date of Birth",
        "gender" => "Gender",
        "experience" => "Experience Level",
        "pain_level" => "Pain Level",
        "pain_locations" => "Pain Locations",
        "workouts_per_week" => "Workouts per Week",
        "duration" => "Session Length",
        "split" => "Training Split",
        "duration_seconds" => "Workout Duration",
        "sets" => "Logged Sets",
        "exercises" => "Exercises",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceLevel, Gender, PainStatus, SquatComfort};
    use crate::units::{HeightUnit, WeightUnit};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile {
            gender: Gender::Male,
            date_of_birth: NaiveDate::from_ymd_opt(1985, 2, 1).unwrap(),
            height: 70.0,
            height_unit: HeightUnit::Inches,
            weight: 180.0,
            weight_unit: WeightUnit::Lbs,
            experience: ExperienceLevel::Advanced,
            pain_status: PainStatus::NoPain,
            pain_locations: BTreeSet::new(),
            pain_level: 0,
            pain_triggers: BTreeSet::new(),
            squat_comfort: SquatComfort::Yes,
        }
    }

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(70.0).is_ok());
        assert!(validate_weight(20.0).is_ok());
        assert!(validate_weight(500.0).is_ok());
        assert!(validate_weight(10.0).is_err());
        assert!(validate_weight(600.0).is_err());
        assert!(validate_weight(f64::NAN).is_err());
        assert!(validate_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_height_cm() {
        assert!(validate_height_cm(170.0).is_ok());
        assert!(validate_height_cm(50.0).is_ok());
        assert!(validate_height_cm(300.0).is_ok());

        assert!(validate_height_cm(49.9).is_err());
        assert!(validate_height_cm(300.1).is_err());
        assert!(validate_height_cm(-10.0).is_err());
        assert!(validate_height_cm(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_date_of_birth() {
        let check = |y, m, d| {
            validate_date_of_birth(NaiveDate::from_ymd_opt(y, m, d).unwrap(), today())
        };
        assert!(check(1994, 6, 15).is_ok());
        assert!(check(2023, 6, 15).is_ok());

        assert!(check(2024, 6, 16).is_err());
        assert!(check(2024, 1, 1).is_err());
        assert!(check(1800, 1, 1).is_err());
    }

    #[test]
    fn test_validate_set_row() {
        let ok = ExerciseSetRow { weight: 100.0, reps: 5, completed: true };
        assert!(validate_set_row(&ok).is_ok());
        let bodyweight = ExerciseSetRow { weight: 0.0, reps: 20, completed: true };
        assert!(validate_set_row(&bodyweight).is_ok());

        let negative = ExerciseSetRow { weight: -5.0, reps: 5, completed: true };
        assert!(validate_set_row(&negative).is_err());
        let nan = ExerciseSetRow { weight: f64::NAN, reps: 5, completed: false };
        assert!(validate_set_row(&nan).is_err());
    }

    #[test]
    fn test_validate_profile_converts_units() {
        assert!(validate_profile(&profile(), today()).is_ok());

        let mut light = profile();
        light.weight = 30.0;
        let err = validate_profile(&light, today()).unwrap_err();
        assert_eq!(err.field, "weight");
        assert_eq!(err.user_message(), "Current Weight: Weight must be at least 20 kg");

        let mut hurting = profile();
        hurting.pain_level = 11;
        assert_eq!(validate_profile(&hurting, today()).unwrap_err().field, "pain_level");
    }

    #[test]
    fn test_field_display_labels() {
        assert_eq!(get_field_display_label("date_of_birth"), "Date of Birth");
        assert_eq!(get_field_display_label("workouts_per_week"), "Workouts per Week");
        assert_eq!(get_field_display_label("height_cm"), "Height");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_weight_range(weight in 20.0f64..=500.0) {
            prop_assert!(validate_weight(weight).is_ok());
        }

        #[test]
        fn prop_invalid_weight_below_min(weight in 0.0f64..20.0) {
            prop_assert!(validate_weight(weight).is_err());
        }

        #[test]
        fn prop_valid_height_range(height in 50.0f64..=300.0) {
            prop_assert!(validate_height_cm(height).is_ok(),
                "Height {} should be valid", height);
        }

        #[test]
        fn prop_non_negative_sets_are_valid(weight in 0.0f64..=2000.0, reps in 0u32..=1000) {
            let row = ExerciseSetRow { weight, reps, completed: true };
            prop_assert!(validate_set_row(&row).is_ok());
        }
    }
}
