//! Liftwise WASM Module
//!
//! This crate provides WebAssembly bindings for the calculations the
//! workout screen runs on every keystroke, so they can run in the browser
//! without a round trip.

use liftwise_shared::matcher;
use liftwise_shared::{round_load, strength, Exercise, ExerciseSetRow, WeightUnit};
use wasm_bindgen::prelude::*;

/// Estimated one-rep max for a single set
#[wasm_bindgen]
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> f64 {
    strength::estimate_one_rep_max(weight, reps)
}

/// Best estimated one-rep max over the completed sets of one exercise
///
/// The three slices are parallel columns of the set table; `completed` is
/// 0 or 1 per row. Rows beyond the shortest column are ignored.
#[wasm_bindgen]
pub fn best_estimated_one_rep_max(weights: &[f64], reps: &[u32], completed: &[u8]) -> f64 {
    let rows: Vec<ExerciseSetRow> = weights
        .iter()
        .zip(reps)
        .zip(completed)
        .map(|((&weight, &reps), &done)| ExerciseSetRow {
            weight,
            reps,
            completed: done != 0,
        })
        .collect();
    strength::best_estimated_one_rep_max(&rows)
}

/// Load expected for `reps` given a one-rep max, used to prefill set rows
#[wasm_bindgen]
pub fn working_weight(one_rep_max: f64, reps: u32) -> f64 {
    round_load(strength::working_weight_for(one_rep_max, reps))
}

/// Convert a load between units, rounded to the nearest plate step
#[wasm_bindgen]
pub fn convert_load(value: f64, to_lbs: bool) -> f64 {
    let (from, to) = if to_lbs {
        (WeightUnit::Kg, WeightUnit::Lbs)
    } else {
        (WeightUnit::Lbs, WeightUnit::Kg)
    };
    round_load(from.convert(value, to))
}

/// Similarity score between two catalog entries given as JSON
///
/// Returns `None` when either entry does not parse or the pair is not a
/// usable replacement.
#[wasm_bindgen]
pub fn score_similarity(candidate_json: &str, target_json: &str) -> Option<u32> {
    let candidate: Exercise = serde_json::from_str(candidate_json).ok()?;
    let target: Exercise = serde_json::from_str(target_json).ok()?;
    let similarity = matcher::score_similarity(&candidate, &target);
    similarity.is_match.then_some(similarity.score)
}
