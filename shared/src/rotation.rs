//! Workout rotation
//!
//! Tracks which days of the current plan were finished in the running cycle
//! and decides which day comes next. Once every day has been done the cycle
//! starts over from the first day.

use crate::models::{GeneratedPlan, WorkoutDay, WorkoutDayKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// First plan day, in plan order, that is not in `completed`
///
/// Wraps to the first day once everything has been done. `None` only for a
/// plan without days.
pub fn next_available_workout<'a>(
    plan: &'a GeneratedPlan,
    completed: &BTreeSet<WorkoutDayKey>,
) -> Option<&'a WorkoutDay> {
    plan.workout_days
        .iter()
        .find(|day| !completed.contains(&day.key()))
        .or_else(|| plan.workout_days.first())
}

/// Days finished in the current cycle of the current plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationProgress {
    #[serde(default)]
    pub completed: BTreeSet<WorkoutDayKey>,
}

impl RotationProgress {
    pub fn next<'a>(&self, plan: &'a GeneratedPlan) -> Option<&'a WorkoutDay> {
        next_available_workout(plan, &self.completed)
    }

    /// Mark a day done regardless of what was logged
    ///
    /// Keys that are not part of the plan are ignored. Returns whether the
    /// cycle wrapped.
    pub fn mark_completed(&mut self, plan: &GeneratedPlan, key: &WorkoutDayKey) -> bool {
        if plan.day(key).is_none() {
            debug!(day = %key, "Ignoring completion for a day outside the plan");
            return false;
        }
        self.completed.insert(key.clone());

        // Drop stale keys from an earlier plan before checking for a full cycle.
        self.completed.retain(|k| plan.day(k).is_some());
        if self.completed.len() >= plan.workout_days.len() {
            debug!("Rotation cycle complete, starting over");
            self.completed.clear();
            return true;
        }
        false
    }

    /// Record a finished session against the rotation
    ///
    /// The day only counts when every exercise it planned was performed.
    /// Returns whether the day was marked.
    pub fn record_session<'a>(
        &mut self,
        plan: &GeneratedPlan,
        key: &WorkoutDayKey,
        performed: impl IntoIterator<Item = &'a str>,
    ) -> bool {
        let Some(day) = plan.day(key) else {
            debug!(day = %key, "Session logged against a day outside the plan");
            return false;
        };

        let performed: BTreeSet<&str> = performed.into_iter().collect();
        let finished = day
            .exercises
            .iter()
            .all(|planned| performed.contains(planned.exercise.id.as_str()));
        if !finished {
            debug!(day = %key, "Session did not cover every planned exercise");
            return false;
        }

        self.mark_completed(plan, key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, Exercise, PlannedExercise};
    use crate::units::WeightUnit;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn planned(id: &str) -> PlannedExercise {
        PlannedExercise {
            exercise: Exercise {
                id: id.to_string(),
                name: id.to_string(),
                muscle_groups: vec!["chest".to_string()],
                equipment: "none".to_string(),
                category: "push".to_string(),
                difficulty: Difficulty::Beginner,
                default_sets: 3,
                default_reps: 10,
                default_weight: 0.0,
                weight_unit: WeightUnit::Kg,
                back_restrictions: vec![],
                back_friendly: true,
                description: None,
                instructions: vec![],
                video_url: None,
            },
            sets: 3,
            reps: 10,
            weight: 0.0,
            weight_unit: WeightUnit::Kg,
            estimated_one_rep_max: None,
            caution: None,
        }
    }

    fn plan(names: &[&str]) -> GeneratedPlan {
        GeneratedPlan {
            name: "Test".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            workout_days: names
                .iter()
                .enumerate()
                .map(|(i, name)| WorkoutDay {
                    day_number: i as u8,
                    day_name: name.to_string(),
                    focus: vec![],
                    exercises: vec![
                        planned(&format!("{}-1", name)),
                        planned(&format!("{}-2", name)),
                    ],
                })
                .collect(),
            missing_muscle_groups: vec![],
            alternative_exercises: vec![],
        }
    }

    fn key(day_number: u8, day_name: &str) -> WorkoutDayKey {
        WorkoutDayKey {
            day_number,
            day_name: day_name.to_string(),
        }
    }

    #[test]
    fn test_next_follows_plan_order() {
        let plan = plan(&["Push", "Pull", "Legs"]);
        let mut completed = BTreeSet::new();
        assert_eq!(next_available_workout(&plan, &completed).unwrap().day_name, "Push");

        completed.insert(key(0, "Push"));
        assert_eq!(next_available_workout(&plan, &completed).unwrap().day_name, "Pull");

        completed.insert(key(2, "Legs"));
        assert_eq!(next_available_workout(&plan, &completed).unwrap().day_name, "Pull");
    }

    #[test]
    fn test_next_wraps_when_everything_is_done() {
        let plan = plan(&["Push", "Pull", "Legs"]);
        let completed: BTreeSet<_> = plan.workout_days.iter().map(|d| d.key()).collect();
        assert_eq!(next_available_workout(&plan, &completed).unwrap().day_number, 0);
    }

    #[test]
    fn test_empty_plan_has_no_next() {
        let plan = plan(&[]);
        assert!(next_available_workout(&plan, &BTreeSet::new()).is_none());
    }

    #[test]
    fn test_three_day_rotation_cycles() {
        let plan = plan(&["Push", "Pull", "Legs"]);
        let mut progress = RotationProgress::default();

        for expected in ["Push", "Pull", "Legs", "Push"] {
            let day = progress.next(&plan).unwrap().clone();
            assert_eq!(day.day_name, expected);
            let ids: Vec<&str> = day.exercises.iter().map(|p| p.exercise.id.as_str()).collect();
            assert!(progress.record_session(&plan, &day.key(), ids));
        }
        assert_eq!(progress.completed.len(), 1);
    }

    #[test]
    fn test_partial_session_does_not_advance() {
        let plan = plan(&["Push", "Pull"]);
        let mut progress = RotationProgress::default();
        assert!(!progress.record_session(&plan, &key(0, "Push"), ["Push-1"]));
        assert_eq!(progress.next(&plan).unwrap().day_name, "Push");

        assert!(progress.record_session(&plan, &key(0, "Push"), ["Push-2", "Push-1", "extra"]));
        assert_eq!(progress.next(&plan).unwrap().day_name, "Pull");
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let plan = plan(&["Push", "Pull"]);
        let mut progress = RotationProgress::default();
        assert!(!progress.record_session(&plan, &key(5, "Arms"), ["Push-1"]));
        assert!(!progress.mark_completed(&plan, &key(1, "Push")));
        assert!(progress.completed.is_empty());
    }

    #[test]
    fn test_stale_keys_do_not_count_toward_cycle() {
        let plan = plan(&["Push", "Pull"]);
        let mut progress = RotationProgress::default();
        progress.completed.insert(key(0, "Upper Body"));
        assert!(!progress.mark_completed(&plan, &key(0, "Push")));
        assert_eq!(progress.completed.len(), 1);
        assert!(progress.mark_completed(&plan, &key(1, "Pull")));
        assert!(progress.completed.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_next_is_always_a_plan_day(
            days in 1usize..7,
            done in prop::collection::btree_set(0u8..7, 0..7),
        ) {
            let names: Vec<String> = (0..days).map(|i| format!("Day {}", i)).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let plan = plan(&refs);
            let completed: BTreeSet<WorkoutDayKey> = done
                .iter()
                .map(|n| key(*n, &format!("Day {}", n)))
                .collect();

            let next = next_available_workout(&plan, &completed).unwrap();
            prop_assert!(plan.day(&next.key()).is_some());
            if (0..days).any(|i| !done.contains(&(i as u8))) {
                prop_assert!(!completed.contains(&next.key()));
            } else {
                prop_assert_eq!(next.day_number, 0);
            }
        }
    }
}
