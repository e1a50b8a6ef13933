//! Plan generation
//!
//! Turns preferences, equipment and the injury profile into a weekly plan:
//!
//! 1. Volume: exercises per day and sets per exercise from frequency,
//!    session length and experience.
//! 2. Split: one muscle-group focus per workout day, cycling the split's
//!    templates across the requested number of days.
//! 3. Filter: equipment must be available and no restriction for the user's
//!    pain locations may be `avoid`. `caution` items stay but rank last.
//! 4. Rank and pick: equipment match, back-friendliness and the variability
//!    preference decide order; coverage of every focus group comes first,
//!    then the day is filled by rank, preferring exercises not yet used this
//!    week.
//! 5. Targets: catalog defaults, stepped up when history has a baseline.
//! 6. Coverage gaps are recorded with substitutes found without the
//!    equipment filter.
//!
//! Generation never fails on thin data. Only a missing profile or malformed
//! settings are refused.

use crate::analytics::OverloadBaseline;
use crate::config::EngineConfig;
use crate::errors::PlanError;
use crate::matcher::{score_similarity, suggested_replacements};
use crate::models::{
    AlternativeExercise, EquipmentAccess, EquipmentInventory, Exercise, ExerciseVariability,
    ExperienceLevel, GeneratedPlan, PlanSettings, PlannedExercise, RestrictionLevel,
    SessionDuration, SquatComfort, TrainingGoal, TrainingSplit, UserProfile, WorkoutDay,
};
use crate::units::{round_load, WeightUnit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

pub const CARDIO_CATEGORY: &str = "cardio";
pub const STRETCHING_CATEGORY: &str = "stretching";

const MIN_EXERCISES_PER_DAY: i32 = 3;
const MAX_EXERCISES_PER_DAY: i32 = 9;

// ============================================================================
// Inputs
// ============================================================================

/// Everything a generation run reads
///
/// History is passed pre-digested: overload baselines and the set of
/// exercises the user has performed before.
#[derive(Debug, Clone, Copy)]
pub struct PlanInputs<'a> {
    pub catalog: &'a [Exercise],
    pub settings: &'a PlanSettings,
    pub profile: Option<&'a UserProfile>,
    pub equipment: &'a EquipmentInventory,
    pub baselines: &'a BTreeMap<String, OverloadBaseline>,
    pub used_exercises: &'a BTreeSet<String>,
}

// ============================================================================
// Step 1: Volume
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeTargets {
    pub exercises_per_day: usize,
    pub sets_per_exercise: u32,
}

/// Derive per-day volume from frequency, session length and experience
pub fn volume_targets(settings: &PlanSettings) -> VolumeTargets {
    let base = match settings.duration {
        SessionDuration::Minutes30 => 4,
        SessionDuration::Minutes45 => 5,
        SessionDuration::Minutes60 => 6,
        SessionDuration::Minutes90 => 8,
    };
    let frequency_adjustment = match settings.workouts_per_week {
        0..=2 => 1,
        3..=4 => 0,
        _ => -1,
    };
    let exercises_per_day =
        (base + frequency_adjustment).clamp(MIN_EXERCISES_PER_DAY, MAX_EXERCISES_PER_DAY) as usize;

    let sets = match settings.experience {
        ExperienceLevel::Beginner => 2,
        ExperienceLevel::Intermediate => 3,
        ExperienceLevel::Advanced => 4,
    };
    let sets_per_exercise = if settings.duration == SessionDuration::Minutes30 {
        (sets - 1).max(2)
    } else {
        sets
    };

    VolumeTargets {
        exercises_per_day,
        sets_per_exercise,
    }
}

// ============================================================================
// Step 2: Split
// ============================================================================

struct FocusTemplate {
    label: &'static str,
    muscle_groups: &'static [&'static str],
}

const PUSH: FocusTemplate = FocusTemplate {
    label: "Push",
    muscle_groups: &["chest", "shoulders", "triceps"],
};
const PULL: FocusTemplate = FocusTemplate {
    label: "Pull",
    muscle_groups: &["back", "biceps"],
};
const LEGS: FocusTemplate = FocusTemplate {
    label: "Legs",
    muscle_groups: &["quadriceps", "hamstrings", "glutes", "calves"],
};
const UPPER: FocusTemplate = FocusTemplate {
    label: "Upper Body",
    muscle_groups: &["chest", "back", "shoulders", "biceps", "triceps"],
};
const LOWER: FocusTemplate = FocusTemplate {
    label: "Lower Body",
    muscle_groups: &["quadriceps", "hamstrings", "glutes", "calves", "core"],
};
const FULL_BODY: FocusTemplate = FocusTemplate {
    label: "Full Body",
    muscle_groups: &["chest", "back", "shoulders", "quadriceps", "hamstrings", "core"],
};

// Consecutive entries never share a group, so each day meets fresh muscles.
const FRESH_CYCLE: [FocusTemplate; 5] = [
    FocusTemplate {
        label: "Chest & Triceps",
        muscle_groups: &["chest", "triceps"],
    },
    FocusTemplate {
        label: "Back & Biceps",
        muscle_groups: &["back", "biceps"],
    },
    FocusTemplate {
        label: "Quads & Calves",
        muscle_groups: &["quadriceps", "calves"],
    },
    FocusTemplate {
        label: "Shoulders & Core",
        muscle_groups: &["shoulders", "core"],
    },
    FocusTemplate {
        label: "Hamstrings & Glutes",
        muscle_groups: &["hamstrings", "glutes"],
    },
];

fn split_cycle(split: TrainingSplit) -> &'static [FocusTemplate] {
    match split {
        TrainingSplit::PushPullLegs => &[PUSH, PULL, LEGS],
        TrainingSplit::UpperLower => &[UPPER, LOWER],
        TrainingSplit::FullBody => &[FULL_BODY],
        TrainingSplit::FreshMuscleGroups => &FRESH_CYCLE,
    }
}

pub fn split_label(split: TrainingSplit) -> &'static str {
    match split {
        TrainingSplit::PushPullLegs => "Push/Pull/Legs",
        TrainingSplit::UpperLower => "Upper/Lower",
        TrainingSplit::FullBody => "Full Body",
        TrainingSplit::FreshMuscleGroups => "Fresh Muscle Groups",
    }
}

/// Name and muscle groups for one workout day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayFocus {
    pub name: String,
    pub muscle_groups: Vec<String>,
}

/// Per-day focus list, wrapping the split's cycle when there are more days
/// than templates
///
/// A label that repeats within the week gets a letter suffix so day names
/// stay distinct ("Push A", "Push B").
pub fn day_focuses(split: TrainingSplit, days: u8) -> Vec<DayFocus> {
    let cycle = split_cycle(split);
    let templates: Vec<&FocusTemplate> = (0..days as usize)
        .map(|index| &cycle[index % cycle.len()])
        .collect();

    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    templates
        .iter()
        .map(|template| {
            let repeats = templates.iter().filter(|t| t.label == template.label).count();
            let occurrence = seen.entry(template.label).or_insert(0);
            let name = if repeats > 1 {
                format!("{} {}", template.label, (b'A' + *occurrence as u8) as char)
            } else {
                template.label.to_string()
            };
            *occurrence += 1;
            DayFocus {
                name,
                muscle_groups: template.muscle_groups.iter().map(|g| g.to_string()).collect(),
            }
        })
        .collect()
}

// ============================================================================
// Steps 3-4: Filter and rank
// ============================================================================

#[derive(Debug, Clone)]
struct Candidate<'a> {
    exercise: &'a Exercise,
    /// Set when the exercise is allowed but should be done carefully
    caution: Option<String>,
    /// 2 = uses available equipment, 1 = needs none
    equipment_quality: u8,
    variability: u8,
}

struct Constraints<'a> {
    access: EquipmentAccess,
    profile: &'a UserProfile,
}

impl<'a> Constraints<'a> {
    /// `None` when the exercise must not be placed for this user
    fn admit<'e>(&self, exercise: &'e Exercise, variability: u8) -> Option<Candidate<'e>> {
        if !self.access.permits(&exercise.equipment) {
            return None;
        }

        let restriction = exercise.restriction_for(&self.profile.pain_locations);
        if matches!(restriction, Some(r) if r.level == RestrictionLevel::Avoid) {
            return None;
        }

        let caution = match restriction {
            Some(r) if r.level == RestrictionLevel::Caution => Some(if r.recommendation.is_empty() {
                "Use caution with your reported pain".to_string()
            } else {
                r.recommendation.clone()
            }),
            _ => self.profile_caution(exercise),
        };

        Some(Candidate {
            exercise,
            caution,
            equipment_quality: if exercise.needs_equipment() { 2 } else { 1 },
            variability,
        })
    }

    fn profile_caution(&self, exercise: &Exercise) -> Option<String> {
        if self.profile.squat_comfort == SquatComfort::No && exercise.is_category("squat") {
            return Some("Squatting was reported as painful; stay in a pain-free range".to_string());
        }
        if self.profile.has_pain()
            && self
                .profile
                .pain_triggers
                .iter()
                .any(|trigger| exercise.is_category(trigger.as_str()))
        {
            return Some(format!(
                "{} movements were reported as a pain trigger",
                exercise.category
            ));
        }
        None
    }
}

fn rank(goal: TrainingGoal, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    let caution = a.caution.is_some().cmp(&b.caution.is_some());
    let equipment = b.equipment_quality.cmp(&a.equipment_quality);
    let friendly = b.exercise.back_friendly.cmp(&a.exercise.back_friendly);
    let preference = match goal {
        TrainingGoal::HypertrophySafe => equipment.then(friendly),
        TrainingGoal::RehabFocused => friendly.then(equipment),
    };

    caution
        .then(preference)
        .then_with(|| b.variability.cmp(&a.variability))
        .then_with(|| a.exercise.id.cmp(&b.exercise.id))
}

fn variability_bonus(
    variability: ExerciseVariability,
    used_exercises: &BTreeSet<String>,
    exercise: &Exercise,
) -> u8 {
    let used = used_exercises.contains(&exercise.id);
    match variability {
        ExerciseVariability::MoreConsistent => u8::from(used),
        ExerciseVariability::Balanced => 0,
        ExerciseVariability::MoreVariable => u8::from(!used),
    }
}

fn is_strength(exercise: &Exercise) -> bool {
    !exercise.is_category(CARDIO_CATEGORY) && !exercise.is_category(STRETCHING_CATEGORY)
}

/// Best-ranked eligible candidate passing `accept`, preferring exercises used
/// fewer times this week
fn next_candidate<'p, 'e>(
    eligible: &[&'p Candidate<'e>],
    picked: &[&'p Candidate<'e>],
    week_usage: &BTreeMap<&str, usize>,
    accept: impl Fn(&Candidate<'e>) -> bool,
) -> Option<&'p Candidate<'e>> {
    for max_uses in [0, 1, usize::MAX] {
        let found = eligible.iter().copied().find(|&candidate| {
            accept(candidate)
                && !picked.iter().any(|p| p.exercise.id == candidate.exercise.id)
                && week_usage
                    .get(candidate.exercise.id.as_str())
                    .copied()
                    .unwrap_or(0)
                    <= max_uses
        });
        if found.is_some() {
            return found;
        }
    }
    None
}

fn select_for_day<'p, 'e>(
    eligible: &[&'p Candidate<'e>],
    focus: &[String],
    target: usize,
    week_usage: &BTreeMap<&str, usize>,
) -> Vec<&'p Candidate<'e>> {
    let mut picked: Vec<&Candidate> = Vec::with_capacity(target);

    for group in focus {
        if picked.len() >= target {
            break;
        }
        if picked.iter().any(|c| c.exercise.trains(group)) {
            continue;
        }
        if let Some(candidate) =
            next_candidate(eligible, &picked, week_usage, |c| c.exercise.trains(group))
        {
            picked.push(candidate);
        }
    }

    while picked.len() < target {
        match next_candidate(eligible, &picked, week_usage, |_| true) {
            Some(candidate) => picked.push(candidate),
            None => break,
        }
    }

    picked
}

// ============================================================================
// Generator
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct PlanGenerator {
    config: EngineConfig,
}

impl PlanGenerator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Build a complete plan
    ///
    /// Returns [`PlanError::MissingProfile`] when onboarding has not been
    /// completed. Thin catalogs or equipment produce empty days and
    /// `missing_muscle_groups`, never an error.
    pub fn generate(
        &self,
        inputs: &PlanInputs<'_>,
        now: DateTime<Utc>,
    ) -> Result<GeneratedPlan, PlanError> {
        let profile = inputs.profile.ok_or(PlanError::MissingProfile)?;
        let settings = inputs.settings;
        if !(1..=7).contains(&settings.workouts_per_week) {
            return Err(PlanError::InvalidSettings(format!(
                "workouts per week must be between 1 and 7, got {}",
                settings.workouts_per_week
            )));
        }

        let targets = volume_targets(settings);
        let focuses = day_focuses(settings.split, settings.workouts_per_week);
        let unit = settings.unit_system.weight_unit();
        let constraints = Constraints {
            access: inputs.equipment.access(),
            profile,
        };

        let mut pool: Vec<Candidate> = inputs
            .catalog
            .iter()
            .filter(|e| is_strength(e))
            .filter_map(|e| {
                let bonus = variability_bonus(settings.variability, inputs.used_exercises, e);
                constraints.admit(e, bonus)
            })
            .collect();
        pool.sort_by(|a, b| rank(settings.goal, a, b));

        debug!(
            pool_size = pool.len(),
            catalog_size = inputs.catalog.len(),
            exercises_per_day = targets.exercises_per_day,
            sets_per_exercise = targets.sets_per_exercise,
            "Filtered exercise pool"
        );

        let mut week_usage: BTreeMap<&str, usize> = BTreeMap::new();
        let mut missing: Vec<String> = Vec::new();
        let mut workout_days = Vec::with_capacity(focuses.len());

        for (index, focus) in focuses.iter().enumerate() {
            let eligible: Vec<&Candidate> = pool
                .iter()
                .filter(|c| focus.muscle_groups.iter().any(|g| c.exercise.trains(g)))
                .collect();

            for group in &focus.muscle_groups {
                let covered = eligible.iter().any(|c| c.exercise.trains(group));
                if !covered && !missing.iter().any(|m| m.eq_ignore_ascii_case(group)) {
                    missing.push(group.clone());
                }
            }

            let picked = select_for_day(
                &eligible,
                &focus.muscle_groups,
                targets.exercises_per_day,
                &week_usage,
            );
            for candidate in &picked {
                *week_usage.entry(candidate.exercise.id.as_str()).or_insert(0) += 1;
            }

            let mut exercises: Vec<PlannedExercise> = picked
                .iter()
                .map(|c| self.plan_exercise(c, targets.sets_per_exercise, unit, inputs.baselines))
                .collect();

            if !exercises.is_empty() {
                let add_on = |category| self.add_on(&constraints, inputs, category, index, unit);
                if settings.cardio {
                    exercises.extend(add_on(CARDIO_CATEGORY));
                }
                if settings.stretching {
                    exercises.extend(add_on(STRETCHING_CATEGORY));
                }
            }

            debug!(
                day = index,
                name = %focus.name,
                exercises = exercises.len(),
                "Assembled workout day"
            );

            workout_days.push(WorkoutDay {
                day_number: index as u8,
                day_name: focus.name.clone(),
                focus: focus.muscle_groups.clone(),
                exercises,
            });
        }

        let alternative_exercises = self.alternatives(inputs, profile, &missing);
        if !missing.is_empty() {
            warn!(
                missing = ?missing,
                alternatives = alternative_exercises.len(),
                "Plan has uncovered muscle groups"
            );
        }

        let plan = GeneratedPlan {
            name: format!(
                "{} - {} days per week",
                split_label(settings.split),
                settings.workouts_per_week
            ),
            created_at: now,
            workout_days,
            missing_muscle_groups: missing,
            alternative_exercises,
        };

        info!(
            name = %plan.name,
            days = plan.workout_days.len(),
            degenerate = plan.is_degenerate(),
            "Generated training plan"
        );
        Ok(plan)
    }

    /// Target load for the next session
    ///
    /// With a baseline the target steps up from whichever is heavier, the
    /// catalog default or the last session, so it never goes down. The
    /// baseline is in kilograms and is converted into `unit` first.
    pub fn target_weight(
        &self,
        exercise: &Exercise,
        baseline: Option<&OverloadBaseline>,
        unit: WeightUnit,
    ) -> f64 {
        let default = exercise
            .weight_unit
            .convert(exercise.default_weight.max(0.0), unit);
        let default = round_load(default);
        match baseline {
            Some(b) if b.last_weight_kg > 0.0 || default > 0.0 => {
                let last = WeightUnit::Kg.convert(b.last_weight_kg, unit);
                round_load(default.max(last) + self.config.progression_step(unit))
            }
            _ => default,
        }
    }

    fn plan_exercise(
        &self,
        candidate: &Candidate<'_>,
        sets: u32,
        unit: WeightUnit,
        baselines: &BTreeMap<String, OverloadBaseline>,
    ) -> PlannedExercise {
        let exercise = candidate.exercise;
        let baseline = baselines.get(&exercise.id);
        PlannedExercise {
            exercise: exercise.clone(),
            sets,
            reps: exercise.default_reps,
            weight: self.target_weight(exercise, baseline, unit),
            weight_unit: unit,
            estimated_one_rep_max: baseline
                .map(|b| WeightUnit::Kg.convert(b.best_one_rep_max_kg, unit))
                .filter(|one_rm| *one_rm > 0.0),
            caution: candidate.caution.clone(),
        }
    }

    /// Cardio or stretching item appended after the strength work, rotated
    /// by day so the week is not repetitive
    fn add_on(
        &self,
        constraints: &Constraints<'_>,
        inputs: &PlanInputs<'_>,
        category: &str,
        day_index: usize,
        unit: WeightUnit,
    ) -> Option<PlannedExercise> {
        let mut options: Vec<Candidate> = inputs
            .catalog
            .iter()
            .filter(|e| e.is_category(category))
            .filter_map(|e| constraints.admit(e, 0))
            .collect();
        if options.is_empty() {
            return None;
        }
        options.sort_by(|a, b| rank(inputs.settings.goal, a, b));
        let choice = &options[day_index % options.len()];
        Some(PlannedExercise {
            exercise: choice.exercise.clone(),
            sets: choice.exercise.default_sets,
            reps: choice.exercise.default_reps,
            weight: round_load(
                choice
                    .exercise
                    .weight_unit
                    .convert(choice.exercise.default_weight.max(0.0), unit),
            ),
            weight_unit: unit,
            estimated_one_rep_max: None,
            caution: choice.caution.clone(),
        })
    }

    /// Substitutes for uncovered groups, searched without the equipment filter
    fn alternatives(
        &self,
        inputs: &PlanInputs<'_>,
        profile: &UserProfile,
        missing: &[String],
    ) -> Vec<AlternativeExercise> {
        if missing.is_empty() {
            return Vec::new();
        }

        let open = Constraints {
            access: EquipmentAccess::Any,
            profile,
        };
        let mut unrestricted: Vec<Candidate> = inputs
            .catalog
            .iter()
            .filter(|e| is_strength(e))
            .filter_map(|e| open.admit(e, 0))
            .collect();
        unrestricted.sort_by(|a, b| rank(inputs.settings.goal, a, b));
        let pool: Vec<&Exercise> = unrestricted.iter().map(|c| c.exercise).collect();

        let mut alternatives = Vec::new();
        for group in missing {
            let Some(ideal) = pool.iter().copied().find(|e| e.trains(group)) else {
                continue;
            };

            let ideal_entry = AlternativeExercise {
                muscle_group: group.clone(),
                exercise_id: ideal.id.clone(),
                name: ideal.name.clone(),
                equipment: ideal.equipment.clone(),
                score: score_similarity(ideal, ideal).score,
            };
            let similar = suggested_replacements(
                pool.iter().copied(),
                ideal,
                self.config.suggested_replacement_cap,
            )
            .into_iter()
            .filter(|s| s.exercise.trains(group))
            .map(|s| AlternativeExercise {
                muscle_group: group.clone(),
                exercise_id: s.exercise.id,
                name: s.exercise.name,
                equipment: s.exercise.equipment,
                score: s.score,
            });

            alternatives.extend(
                std::iter::once(ideal_entry)
                    .chain(similar)
                    .take(self.config.alternatives_per_missing_group),
            );
        }
        alternatives
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BodyRegion, Difficulty, Gender, InjuryRestriction, MovementCategory, PainStatus,
    };
    use crate::units::{HeightUnit, UnitSystem};
    use chrono::{NaiveDate, TimeZone};
    use proptest::prelude::*;
    use rstest::rstest;

    fn exercise(id: &str, muscles: &[&str], equipment: &str, category: &str) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: id.replace('-', " "),
            muscle_groups: muscles.iter().map(|m| m.to_string()).collect(),
            equipment: equipment.to_string(),
            category: category.to_string(),
            difficulty: Difficulty::Beginner,
            default_sets: 3,
            default_reps: 10,
            default_weight: if equipment == "none" { 0.0 } else { 20.0 },
            weight_unit: WeightUnit::Kg,
            back_restrictions: vec![],
            back_friendly: true,
            description: None,
            instructions: vec![],
            video_url: None,
        }
    }

    fn catalog() -> Vec<Exercise> {
        vec![
            exercise("bench-press", &["chest", "triceps"], "barbell", "push"),
            exercise("dumbbell-press", &["chest", "triceps"], "dumbbells", "push"),
            exercise("push-up", &["chest", "triceps"], "none", "push"),
            exercise("overhead-press", &["shoulders", "triceps"], "barbell", "overhead"),
            exercise("lateral-raise", &["shoulders"], "dumbbells", "isolation"),
            exercise("tricep-dip", &["triceps", "chest"], "none", "push"),
            exercise("pull-up", &["back", "biceps"], "pull-up bar", "pull"),
            exercise("barbell-row", &["back", "biceps"], "barbell", "pull"),
            exercise("dumbbell-curl", &["biceps"], "dumbbells", "isolation"),
            exercise("back-squat", &["quadriceps", "glutes"], "barbell", "squat"),
            exercise("romanian-deadlift", &["hamstrings", "glutes"], "barbell", "hinge"),
            exercise("calf-raise", &["calves"], "none", "isolation"),
            exercise("plank", &["core"], "none", "rotation"),
            exercise("treadmill-walk", &["cardio"], "treadmill", "cardio"),
            exercise("hamstring-stretch", &["hamstrings"], "none", "stretching"),
        ]
    }

    fn profile() -> UserProfile {
        UserProfile {
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 4).unwrap(),
            height: 168.0,
            height_unit: HeightUnit::Cm,
            weight: 64.0,
            weight_unit: WeightUnit::Kg,
            experience: ExperienceLevel::Intermediate,
            pain_status: PainStatus::NoPain,
            pain_locations: BTreeSet::new(),
            pain_level: 0,
            pain_triggers: BTreeSet::new(),
            squat_comfort: SquatComfort::Yes,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()
    }

    struct Fixture {
        catalog: Vec<Exercise>,
        settings: PlanSettings,
        profile: Option<UserProfile>,
        equipment: EquipmentInventory,
        baselines: BTreeMap<String, OverloadBaseline>,
        used: BTreeSet<String>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                catalog: catalog(),
                settings: PlanSettings::default(),
                profile: Some(profile()),
                equipment: EquipmentInventory::default(),
                baselines: BTreeMap::new(),
                used: BTreeSet::new(),
            }
        }

        fn generate(&self) -> Result<GeneratedPlan, PlanError> {
            let inputs = PlanInputs {
                catalog: &self.catalog,
                settings: &self.settings,
                profile: self.profile.as_ref(),
                equipment: &self.equipment,
                baselines: &self.baselines,
                used_exercises: &self.used,
            };
            PlanGenerator::default().generate(&inputs, now())
        }
    }

    fn ids(day: &WorkoutDay) -> Vec<&str> {
        day.exercises.iter().map(|p| p.exercise.id.as_str()).collect()
    }

    #[rstest]
    #[case(SessionDuration::Minutes30, 3, ExperienceLevel::Beginner, 4, 2)]
    #[case(SessionDuration::Minutes30, 3, ExperienceLevel::Advanced, 4, 3)]
    #[case(SessionDuration::Minutes60, 3, ExperienceLevel::Intermediate, 6, 3)]
    #[case(SessionDuration::Minutes60, 6, ExperienceLevel::Intermediate, 5, 3)]
    #[case(SessionDuration::Minutes90, 2, ExperienceLevel::Advanced, 9, 4)]
    #[case(SessionDuration::Minutes30, 7, ExperienceLevel::Beginner, 3, 2)]
    fn test_volume_targets(
        #[case] duration: SessionDuration,
        #[case] workouts_per_week: u8,
        #[case] experience: ExperienceLevel,
        #[case] exercises: usize,
        #[case] sets: u32,
    ) {
        let settings = PlanSettings {
            duration,
            workouts_per_week,
            experience,
            ..PlanSettings::default()
        };
        let targets = volume_targets(&settings);
        assert_eq!(targets.exercises_per_day, exercises);
        assert_eq!(targets.sets_per_exercise, sets);
    }

    #[test]
    fn test_push_pull_legs_wraps_with_suffixes() {
        let names: Vec<String> = day_focuses(TrainingSplit::PushPullLegs, 4)
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Push A", "Pull", "Legs", "Push B"]);
    }

    #[test]
    fn test_full_body_days_are_lettered() {
        let names: Vec<String> = day_focuses(TrainingSplit::FullBody, 3)
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Full Body A", "Full Body B", "Full Body C"]);
    }

    #[test]
    fn test_fresh_groups_never_repeat_on_consecutive_days() {
        let focuses = day_focuses(TrainingSplit::FreshMuscleGroups, 7);
        for pair in focuses.windows(2) {
            let shared = pair[0]
                .muscle_groups
                .iter()
                .any(|g| pair[1].muscle_groups.contains(g));
            assert!(!shared, "{:?} and {:?} share a group", pair[0].name, pair[1].name);
        }
    }

    #[test]
    fn test_missing_profile_is_refused() {
        let mut fixture = Fixture::new();
        fixture.profile = None;
        assert_eq!(fixture.generate(), Err(PlanError::MissingProfile));
    }

    #[rstest]
    #[case(0)]
    #[case(8)]
    fn test_out_of_range_frequency_is_refused(#[case] workouts_per_week: u8) {
        let mut fixture = Fixture::new();
        fixture.settings.workouts_per_week = workouts_per_week;
        assert!(matches!(fixture.generate(), Err(PlanError::InvalidSettings(_))));
    }

    #[test]
    fn test_three_day_split_covers_focus() {
        let plan = Fixture::new().generate().unwrap();
        assert_eq!(plan.workout_days.len(), 3);
        assert_eq!(plan.created_at, now());
        assert!(plan.missing_muscle_groups.is_empty());
        assert!(plan.alternative_exercises.is_empty());

        for (index, day) in plan.workout_days.iter().enumerate() {
            assert_eq!(day.day_number as usize, index);
            assert!(!day.exercises.is_empty());
            assert!(day.exercises.len() <= 6);
            for planned in &day.exercises {
                assert!(day.focus.iter().any(|g| planned.exercise.trains(g)));
                assert_eq!(planned.sets, 2);
            }
            for group in &day.focus {
                assert!(day.exercises.iter().any(|p| p.exercise.trains(group)));
            }
        }
    }

    #[test]
    fn test_no_exercise_repeats_within_a_day() {
        let mut fixture = Fixture::new();
        fixture.settings.split = TrainingSplit::FullBody;
        fixture.settings.duration = SessionDuration::Minutes90;
        let plan = fixture.generate().unwrap();
        for day in &plan.workout_days {
            let unique: BTreeSet<&str> = ids(day).into_iter().collect();
            assert_eq!(unique.len(), day.exercises.len());
        }
    }

    #[test]
    fn test_cardio_and_stretching_are_not_strength_work() {
        let mut fixture = Fixture::new();
        fixture.settings.split = TrainingSplit::FullBody;
        fixture.settings.duration = SessionDuration::Minutes90;
        let plan = fixture.generate().unwrap();
        for day in &plan.workout_days {
            assert!(!day.contains_exercise("treadmill-walk"));
            assert!(!day.contains_exercise("hamstring-stretch"));
        }

        fixture.settings.cardio = true;
        fixture.settings.stretching = true;
        let plan = fixture.generate().unwrap();
        for day in &plan.workout_days {
            let ids = ids(day);
            assert_eq!(ids[ids.len() - 2], "treadmill-walk");
            assert_eq!(ids[ids.len() - 1], "hamstring-stretch");
        }
    }

    #[test]
    fn test_equipment_inventory_limits_pool() {
        let mut fixture = Fixture::new();
        fixture.equipment.free_weights.insert("Dumbbells".to_string());
        let plan = fixture.generate().unwrap();

        for day in &plan.workout_days {
            for planned in &day.exercises {
                let equipment = planned.exercise.equipment.as_str();
                assert!(equipment == "dumbbells" || equipment == "none", "{}", equipment);
            }
        }
        assert!(plan.missing_muscle_groups.contains(&"back".to_string()));
        assert!(plan.missing_muscle_groups.contains(&"quadriceps".to_string()));
        assert!(plan.missing_muscle_groups.contains(&"hamstrings".to_string()));
    }

    #[test]
    fn test_bodyweight_only_leaves_legs_empty_but_plan_well_formed() {
        let mut fixture = Fixture::new();
        fixture.catalog.retain(|e| e.id != "calf-raise");
        fixture.equipment.bodyweight_only = true;
        let plan = fixture.generate().unwrap();

        assert_eq!(plan.workout_days.len(), 3);
        let legs = &plan.workout_days[2];
        assert_eq!(legs.day_name, "Legs");
        assert!(legs.exercises.is_empty());
        for group in ["quadriceps", "hamstrings", "glutes", "calves"] {
            assert!(plan.missing_muscle_groups.contains(&group.to_string()), "{}", group);
        }

        let quad_alternatives: Vec<&AlternativeExercise> = plan
            .alternative_exercises
            .iter()
            .filter(|a| a.muscle_group == "quadriceps")
            .collect();
        assert_eq!(quad_alternatives[0].exercise_id, "back-squat");
        assert!(plan.is_degenerate());
    }

    #[test]
    fn test_empty_catalog_produces_degenerate_plan() {
        let mut fixture = Fixture::new();
        fixture.catalog.clear();
        let plan = fixture.generate().unwrap();

        assert_eq!(plan.workout_days.len(), 3);
        assert!(plan.workout_days.iter().all(|d| d.exercises.is_empty()));
        let expected: Vec<String> = day_focuses(TrainingSplit::PushPullLegs, 3)
            .into_iter()
            .flat_map(|f| f.muscle_groups)
            .collect();
        assert_eq!(plan.missing_muscle_groups, expected);
        assert!(plan.alternative_exercises.is_empty());
    }

    #[test]
    fn test_avoid_restriction_excludes_and_caution_ranks_last() {
        let mut fixture = Fixture::new();
        fixture.catalog = vec![
            exercise("back-squat", &["quadriceps", "glutes"], "barbell", "squat"),
            exercise("leg-press", &["quadriceps", "glutes"], "machine", "squat"),
            exercise("goblet-squat", &["quadriceps", "glutes"], "dumbbells", "squat"),
        ];
        fixture.catalog[0].back_restrictions.push(InjuryRestriction {
            issue: BodyRegion::LowerBack,
            level: RestrictionLevel::Avoid,
            recommendation: "Spinal loading".to_string(),
        });
        fixture.catalog[1].back_restrictions.push(InjuryRestriction {
            issue: BodyRegion::LowerBack,
            level: RestrictionLevel::Caution,
            recommendation: "Keep hips on the pad".to_string(),
        });
        fixture.profile.as_mut().unwrap().pain_locations.insert(BodyRegion::LowerBack);
        fixture.settings.split = TrainingSplit::UpperLower;
        fixture.settings.workouts_per_week = 2;

        let plan = fixture.generate().unwrap();
        let lower = &plan.workout_days[1];
        assert_eq!(ids(lower), vec!["goblet-squat", "leg-press"]);
        assert_eq!(lower.exercises[0].caution, None);
        assert_eq!(lower.exercises[1].caution.as_deref(), Some("Keep hips on the pad"));
    }

    #[test]
    fn test_pain_in_two_regions_applies_each_restriction() {
        let mut fixture = Fixture::new();
        let restrict = |exercise: &mut Exercise, issue, level, note: &str| {
            exercise.back_restrictions.push(InjuryRestriction {
                issue,
                level,
                recommendation: note.to_string(),
            });
        };
        // bench-press: caution for shoulders but avoid for the lower back
        restrict(&mut fixture.catalog[0], BodyRegion::Shoulders, RestrictionLevel::Caution, "");
        restrict(&mut fixture.catalog[0], BodyRegion::LowerBack, RestrictionLevel::Avoid, "");
        restrict(
            &mut fixture.catalog[3],
            BodyRegion::Shoulders,
            RestrictionLevel::Caution,
            "Press below shoulder height",
        );
        restrict(&mut fixture.catalog[4], BodyRegion::LowerBack, RestrictionLevel::Avoid, "");
        let locations = &mut fixture.profile.as_mut().unwrap().pain_locations;
        locations.insert(BodyRegion::Shoulders);
        locations.insert(BodyRegion::LowerBack);
        fixture.settings.split = TrainingSplit::PushPullLegs;

        let plan = fixture.generate().unwrap();
        let push = &plan.workout_days[0];
        assert!(!push.contains_exercise("bench-press"));
        assert!(!push.contains_exercise("lateral-raise"));
        let press = push
            .exercises
            .iter()
            .find(|p| p.exercise.id == "overhead-press")
            .unwrap();
        assert_eq!(press.caution.as_deref(), Some("Press below shoulder height"));
    }

    #[test]
    fn test_fresh_cycle_trains_glutes_on_one_day() {
        let focuses = day_focuses(TrainingSplit::FreshMuscleGroups, 5);
        let glute_days: Vec<&str> = focuses
            .iter()
            .filter(|f| f.muscle_groups.iter().any(|g| g == "glutes"))
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(glute_days, vec!["Hamstrings & Glutes"]);
    }

    #[test]
    fn test_restrictions_for_other_regions_do_not_apply() {
        let mut fixture = Fixture::new();
        fixture.catalog[0].back_restrictions.push(InjuryRestriction {
            issue: BodyRegion::Shoulders,
            level: RestrictionLevel::Avoid,
            recommendation: String::new(),
        });
        fixture.profile.as_mut().unwrap().pain_locations.insert(BodyRegion::Knees);
        let plan = fixture.generate().unwrap();
        assert!(plan.workout_days[0].contains_exercise("bench-press"));
    }

    #[test]
    fn test_pain_trigger_and_squat_comfort_demote() {
        let mut fixture = Fixture::new();
        {
            let profile = fixture.profile.as_mut().unwrap();
            profile.pain_status = PainStatus::Occasional;
            profile.pain_triggers.insert(MovementCategory::Hinge);
            profile.squat_comfort = SquatComfort::No;
        }
        let plan = fixture.generate().unwrap();
        let legs = &plan.workout_days[2];
        let squat = legs
            .exercises
            .iter()
            .find(|p| p.exercise.id == "back-squat")
            .unwrap();
        assert!(squat.caution.is_some());
        let hinge = legs
            .exercises
            .iter()
            .find(|p| p.exercise.id == "romanian-deadlift")
            .unwrap();
        assert!(hinge.caution.as_deref().unwrap().contains("hinge"));
    }

    #[test]
    fn test_variability_preference() {
        let mut fixture = Fixture::new();
        fixture.catalog = vec![
            exercise("cable-row", &["back"], "cable", "pull"),
            exercise("machine-row", &["back"], "machine", "pull"),
        ];
        fixture.settings.split = TrainingSplit::PushPullLegs;
        fixture.settings.workouts_per_week = 2;
        fixture.used.insert("machine-row".to_string());

        fixture.settings.variability = ExerciseVariability::MoreConsistent;
        let plan = fixture.generate().unwrap();
        assert_eq!(ids(&plan.workout_days[1])[0], "machine-row");

        fixture.settings.variability = ExerciseVariability::MoreVariable;
        let plan = fixture.generate().unwrap();
        assert_eq!(ids(&plan.workout_days[1])[0], "cable-row");

        fixture.settings.variability = ExerciseVariability::Balanced;
        let plan = fixture.generate().unwrap();
        assert_eq!(ids(&plan.workout_days[1])[0], "cable-row");
    }

    #[test]
    fn test_week_prefers_unused_exercises() {
        let mut fixture = Fixture::new();
        fixture.catalog = vec![
            exercise("a-press", &["chest"], "barbell", "push"),
            exercise("b-press", &["chest"], "barbell", "push"),
            exercise("c-press", &["chest"], "barbell", "push"),
            exercise("d-press", &["chest"], "barbell", "push"),
        ];
        fixture.settings.split = TrainingSplit::FullBody;
        fixture.settings.workouts_per_week = 2;
        fixture.settings.duration = SessionDuration::Minutes30;
        let plan = fixture.generate().unwrap();

        // 30 minutes at two days a week targets five, but only four exist.
        assert_eq!(ids(&plan.workout_days[0]), vec!["a-press", "b-press", "c-press", "d-press"]);
        assert_eq!(ids(&plan.workout_days[1]), vec!["a-press", "b-press", "c-press", "d-press"]);
    }

    #[test]
    fn test_week_spreads_exercises_when_pool_allows() {
        let mut fixture = Fixture::new();
        fixture.catalog = (0..6)
            .map(|i| exercise(&format!("press-{}", i), &["chest"], "barbell", "push"))
            .collect();
        fixture.settings.split = TrainingSplit::FullBody;
        fixture.settings.workouts_per_week = 2;
        fixture.settings.duration = SessionDuration::Minutes30;
        fixture.settings.experience = ExperienceLevel::Beginner;
        let plan = fixture.generate().unwrap();
        let first = ids(&plan.workout_days[0]);
        let second = ids(&plan.workout_days[1]);
        assert_eq!(first, vec!["press-0", "press-1", "press-2", "press-3", "press-4"]);
        assert_eq!(second[0], "press-5");
    }

    #[test]
    fn test_progressive_overload_steps_up_from_history() {
        let generator = PlanGenerator::default();
        let squat = exercise("back-squat", &["quadriceps"], "barbell", "squat");

        assert_eq!(generator.target_weight(&squat, None, WeightUnit::Kg), 20.0);

        let baseline = OverloadBaseline {
            best_one_rep_max_kg: 70.0,
            last_weight_kg: 60.0,
        };
        assert_eq!(generator.target_weight(&squat, Some(&baseline), WeightUnit::Kg), 62.5);

        let light = OverloadBaseline {
            best_one_rep_max_kg: 12.0,
            last_weight_kg: 10.0,
        };
        assert_eq!(generator.target_weight(&squat, Some(&light), WeightUnit::Kg), 22.5);

        let push_up = exercise("push-up", &["chest"], "none", "push");
        assert_eq!(
            generator.target_weight(
                &push_up,
                Some(&OverloadBaseline {
                    best_one_rep_max_kg: 0.0,
                    last_weight_kg: 0.0
                }),
                WeightUnit::Kg
            ),
            0.0
        );
    }

    #[test]
    fn test_imperial_plan_converts_and_steps_in_pounds() {
        let generator = PlanGenerator::default();
        let press = exercise("bench-press", &["chest"], "barbell", "push");
        assert_eq!(generator.target_weight(&press, None, WeightUnit::Lbs), 44.0);

        let baseline = OverloadBaseline {
            best_one_rep_max_kg: WeightUnit::Lbs.to_kg(150.0),
            last_weight_kg: WeightUnit::Lbs.to_kg(135.0),
        };
        assert_eq!(generator.target_weight(&press, Some(&baseline), WeightUnit::Lbs), 140.0);
    }

    #[test]
    fn test_switching_to_imperial_never_lowers_the_load() {
        let generator = PlanGenerator::default();
        let press = exercise("bench-press", &["chest"], "barbell", "push");
        let baseline = OverloadBaseline {
            best_one_rep_max_kg: 112.5,
            last_weight_kg: 100.0,
        };

        let metric = generator.target_weight(&press, Some(&baseline), WeightUnit::Kg);
        assert_eq!(metric, 102.5);

        let imperial = generator.target_weight(&press, Some(&baseline), WeightUnit::Lbs);
        assert!(WeightUnit::Lbs.to_kg(imperial) > 100.0);
        assert_eq!(imperial, round_load(WeightUnit::Kg.convert(100.0, WeightUnit::Lbs) + 5.0));
    }

    #[test]
    fn test_plan_targets_use_baselines() {
        let mut fixture = Fixture::new();
        fixture.settings.unit_system = UnitSystem::Metric;
        fixture.baselines.insert(
            "bench-press".to_string(),
            OverloadBaseline {
                best_one_rep_max_kg: 90.0,
                last_weight_kg: 80.0,
            },
        );
        let plan = fixture.generate().unwrap();
        let bench = plan.workout_days[0]
            .exercises
            .iter()
            .find(|p| p.exercise.id == "bench-press")
            .unwrap();
        assert_eq!(bench.weight, 82.5);
        assert_eq!(bench.estimated_one_rep_max, Some(90.0));
        assert_eq!(bench.reps, 10);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn prop_day_count_matches_frequency(workouts in 1u8..=7, split in 0usize..4) {
            let mut fixture = Fixture::new();
            fixture.settings.workouts_per_week = workouts;
            fixture.settings.split = [
                TrainingSplit::PushPullLegs,
                TrainingSplit::UpperLower,
                TrainingSplit::FullBody,
                TrainingSplit::FreshMuscleGroups,
            ][split];
            let plan = fixture.generate().unwrap();
            prop_assert_eq!(plan.workout_days.len(), workouts as usize);

            let keys: BTreeSet<_> = plan.workout_days.iter().map(|d| d.key()).collect();
            prop_assert_eq!(keys.len(), workouts as usize);
            for (index, day) in plan.workout_days.iter().enumerate() {
                prop_assert_eq!(day.day_number as usize, index);
            }
        }
    }
}
