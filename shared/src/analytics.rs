//! Progress analytics over finished-workout history
//!
//! Every function here is a pure view over the history slice. Nothing is
//! cached or persisted; callers re-derive on demand.
//!
//! Loads and volumes in every output are kilograms, whatever unit each
//! workout was logged in.

use crate::models::FinishedWorkoutSummary;
use crate::strength::best_estimated_one_rep_max;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Default number of workouts in the trend series
pub const DEFAULT_SERIES_LEN: usize = 10;

// ============================================================================
// Output Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalStats {
    pub total_workouts: usize,
    pub total_volume: f64,
    pub total_calories: f64,
    /// Consecutive training days ending today or yesterday
    pub current_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    /// Short weekday label ("Mon")
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub total_volume: f64,
    /// Short date label ("Mar 1")
    pub label: String,
}

/// Personal record for one exercise across all sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub exercise_id: String,
    pub exercise_name: String,
    pub estimated_one_rep_max: f64,
    /// Date of the session that produced the best 1RM
    pub achieved_on: NaiveDate,
    pub best_volume: f64,
    pub best_weight: f64,
    pub best_reps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub workout_id: String,
    pub finished_on: NaiveDate,
    pub value: f64,
}

/// Workout-level records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecords {
    pub best_volume: Option<WorkoutRecord>,
    pub most_exercises: Option<WorkoutRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionBest {
    pub date: NaiveDate,
    pub best_one_rep_max: f64,
}

/// Per-session 1RM trend for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProgress {
    pub exercise_id: String,
    pub exercise_name: String,
    pub sessions: Vec<SessionBest>,
    pub last_performed: Option<NaiveDate>,
    pub current_best: f64,
    /// Latest session beat the first one
    pub improving: bool,
}

/// Inputs the plan generator needs for progressive overload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverloadBaseline {
    pub best_one_rep_max_kg: f64,
    /// Heaviest completed weight in the most recent session with this exercise
    pub last_weight_kg: f64,
}

/// Everything the progress screen shows, derived in one pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub totals: TotalStats,
    pub weekly_activity: Vec<DayActivity>,
    pub series: Vec<ProgressPoint>,
    pub exercise_records: Vec<ExerciseRecord>,
    pub workout_records: WorkoutRecords,
}

impl ProgressReport {
    pub fn build(history: &[FinishedWorkoutSummary], today: NaiveDate, series_len: usize) -> Self {
        Self {
            totals: total_stats(history, today),
            weekly_activity: weekly_activity(history, today),
            series: progress_series(history, series_len),
            exercise_records: exercise_records(history),
            workout_records: workout_records(history),
        }
    }
}

// ============================================================================
// Aggregations
// ============================================================================

fn chronological(history: &[FinishedWorkoutSummary]) -> Vec<&FinishedWorkoutSummary> {
    let mut ordered: Vec<&FinishedWorkoutSummary> = history.iter().collect();
    ordered.sort_by_key(|w| w.finished_at);
    ordered
}

pub fn total_stats(history: &[FinishedWorkoutSummary], today: NaiveDate) -> TotalStats {
    TotalStats {
        total_workouts: history.len(),
        total_volume: history.iter().map(FinishedWorkoutSummary::volume_kg).sum(),
        total_calories: history.iter().map(|w| w.calories).sum(),
        current_streak: current_streak(history, today),
    }
}

/// Count of consecutive calendar days with a workout
///
/// The run must end today or yesterday, otherwise the streak is broken.
pub fn current_streak(history: &[FinishedWorkoutSummary], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = history
        .iter()
        .map(FinishedWorkoutSummary::finished_on)
        .filter(|day| *day <= today)
        .collect();

    let Some(&latest) = days.iter().next_back() else {
        return 0;
    };
    if latest < today - Duration::days(1) {
        return 0;
    }

    let mut streak = 0;
    let mut cursor = latest;
    while days.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

/// Activity flags for the trailing seven days, oldest first
pub fn weekly_activity(history: &[FinishedWorkoutSummary], today: NaiveDate) -> Vec<DayActivity> {
    let days: BTreeSet<NaiveDate> = history
        .iter()
        .map(FinishedWorkoutSummary::finished_on)
        .collect();

    (0..7)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            DayActivity {
                date,
                label: date.format("%a").to_string(),
                active: days.contains(&date),
            }
        })
        .collect()
}

/// Volume of the last `limit` workouts in chronological order
pub fn progress_series(history: &[FinishedWorkoutSummary], limit: usize) -> Vec<ProgressPoint> {
    let ordered = chronological(history);
    let skip = ordered.len().saturating_sub(limit);
    ordered
        .into_iter()
        .skip(skip)
        .map(|w| {
            let date = w.finished_on();
            ProgressPoint {
                date,
                total_volume: w.volume_kg(),
                label: date.format("%b %-d").to_string(),
            }
        })
        .collect()
}

fn exercise_name(workout: &FinishedWorkoutSummary, exercise_id: &str) -> Option<String> {
    workout
        .exercises
        .iter()
        .find(|e| e.id == exercise_id)
        .map(|e| e.name.clone())
}

/// Exercise-level personal records, best estimated 1RM first
pub fn exercise_records(history: &[FinishedWorkoutSummary]) -> Vec<ExerciseRecord> {
    let mut records: BTreeMap<&str, ExerciseRecord> = BTreeMap::new();

    for workout in chronological(history) {
        for exercise_id in workout.sets.keys() {
            let rows = workout.rows_in_kg(exercise_id);
            let completed: Vec<_> = rows.iter().filter(|r| r.completed).collect();
            if completed.is_empty() {
                continue;
            }

            let one_rm = best_estimated_one_rep_max(&rows);
            let volume: f64 = completed.iter().map(|r| r.volume()).sum();
            let weight = completed.iter().map(|r| r.weight).fold(0.0, f64::max);
            let reps = completed.iter().map(|r| r.reps).max().unwrap_or(0);
            let name = exercise_name(workout, exercise_id).unwrap_or_else(|| exercise_id.clone());

            let record = records
                .entry(exercise_id.as_str())
                .or_insert_with(|| ExerciseRecord {
                    exercise_id: exercise_id.clone(),
                    exercise_name: name.clone(),
                    estimated_one_rep_max: one_rm,
                    achieved_on: workout.finished_on(),
                    best_volume: volume,
                    best_weight: weight,
                    best_reps: reps,
                });

            if one_rm > record.estimated_one_rep_max {
                record.estimated_one_rep_max = one_rm;
                record.achieved_on = workout.finished_on();
            }
            record.best_volume = record.best_volume.max(volume);
            record.best_weight = record.best_weight.max(weight);
            record.best_reps = record.best_reps.max(reps);
            record.exercise_name = name;
        }
    }

    let mut records: Vec<ExerciseRecord> = records.into_values().collect();
    records.sort_by(|a, b| {
        b.estimated_one_rep_max
            .total_cmp(&a.estimated_one_rep_max)
            .then_with(|| a.exercise_id.cmp(&b.exercise_id))
    });
    records
}

/// Best single-workout volume and most exercises in one workout
///
/// Ties keep the earliest workout.
pub fn workout_records(history: &[FinishedWorkoutSummary]) -> WorkoutRecords {
    let mut records = WorkoutRecords::default();

    for workout in chronological(history) {
        let beats = |current: &Option<WorkoutRecord>, value: f64| {
            current.as_ref().map_or(true, |r| value > r.value)
        };

        let volume = workout.volume_kg();
        if beats(&records.best_volume, volume) {
            records.best_volume = Some(WorkoutRecord {
                workout_id: workout.id.to_string(),
                finished_on: workout.finished_on(),
                value: volume,
            });
        }

        let exercise_count = workout.exercise_count as f64;
        if beats(&records.most_exercises, exercise_count) {
            records.most_exercises = Some(WorkoutRecord {
                workout_id: workout.id.to_string(),
                finished_on: workout.finished_on(),
                value: exercise_count,
            });
        }
    }

    records
}

/// Chronological best-1RM series for one exercise
pub fn exercise_progress(
    history: &[FinishedWorkoutSummary],
    exercise_id: &str,
) -> ExerciseProgress {
    let mut sessions = Vec::new();
    let mut name = exercise_id.to_string();

    for workout in chronological(history) {
        let rows = workout.rows_in_kg(exercise_id);
        if !rows.iter().any(|r| r.completed) {
            continue;
        }
        if let Some(snapshot_name) = exercise_name(workout, exercise_id) {
            name = snapshot_name;
        }
        sessions.push(SessionBest {
            date: workout.finished_on(),
            best_one_rep_max: best_estimated_one_rep_max(&rows),
        });
    }

    let current_best = sessions
        .iter()
        .map(|s| s.best_one_rep_max)
        .fold(0.0, f64::max);
    let improving = match (sessions.first(), sessions.last()) {
        (Some(first), Some(last)) if sessions.len() > 1 => {
            last.best_one_rep_max > first.best_one_rep_max
        }
        _ => false,
    };

    ExerciseProgress {
        exercise_id: exercise_id.to_string(),
        exercise_name: name,
        last_performed: sessions.last().map(|s| s.date),
        sessions,
        current_best,
        improving,
    }
}

/// Per-exercise baselines for the plan generator's overload step
pub fn overload_baselines(
    history: &[FinishedWorkoutSummary],
) -> BTreeMap<String, OverloadBaseline> {
    let mut baselines: BTreeMap<String, OverloadBaseline> = BTreeMap::new();

    for workout in chronological(history) {
        for exercise_id in workout.sets.keys() {
            let rows = workout.rows_in_kg(exercise_id);
            let completed: Vec<_> = rows.iter().filter(|r| r.completed).collect();
            if completed.is_empty() {
                continue;
            }
            let one_rm = best_estimated_one_rep_max(&rows);
            let heaviest = completed.iter().map(|r| r.weight).fold(0.0, f64::max);

            baselines
                .entry(exercise_id.clone())
                .and_modify(|b| {
                    b.best_one_rep_max_kg = b.best_one_rep_max_kg.max(one_rm);
                    b.last_weight_kg = heaviest;
                })
                .or_insert(OverloadBaseline {
                    best_one_rep_max_kg: one_rm,
                    last_weight_kg: heaviest,
                });
        }
    }

    baselines
}

/// Every exercise id that appears anywhere in the history
pub fn used_exercise_ids(history: &[FinishedWorkoutSummary]) -> BTreeSet<String> {
    history
        .iter()
        .flat_map(|w| w.exercise_ids().map(str::to_string).chain(w.sets.keys().cloned()))
        .collect()
}
