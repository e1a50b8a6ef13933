//! Strength estimation
//!
//! Converts a completed set into an estimated one-repetition maximum. Low
//! rep sets use the Brzycki relation, higher rep sets use Epley, since
//! Brzycki diverges as reps approach 37.

use crate::models::ExerciseSetRow;

/// Upper rep bound (inclusive) for the Brzycki band
pub const BRZYCKI_MAX_REPS: u32 = 10;

/// Estimate 1RM from a single set
///
/// Returns 0 for non-positive weight or zero reps so a blank set never
/// inflates aggregate statistics.
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> f64 {
    if !(weight > 0.0) || reps == 0 {
        return 0.0;
    }
    match reps {
        1 => weight,
        2..=BRZYCKI_MAX_REPS => brzycki(weight, reps),
        _ => epley(weight, reps),
    }
}

fn brzycki(weight: f64, reps: u32) -> f64 {
    if reps >= 37 {
        return weight;
    }
    weight * 36.0 / (37.0 - reps as f64)
}

fn epley(weight: f64, reps: u32) -> f64 {
    weight * (1.0 + reps as f64 / 30.0)
}

/// Best 1RM estimate over the completed sets of one exercise in one session
pub fn best_estimated_one_rep_max(rows: &[ExerciseSetRow]) -> f64 {
    rows.iter()
        .filter(|row| row.completed)
        .map(|row| estimate_one_rep_max(row.weight, row.reps))
        .fold(0.0, f64::max)
}

/// Weight expected to be liftable for `reps` given a 1RM, inverting the
/// banded estimate
pub fn working_weight_for(one_rep_max: f64, reps: u32) -> f64 {
    if !(one_rep_max > 0.0) || reps == 0 {
        return 0.0;
    }
    one_rep_max / estimate_one_rep_max(1.0, reps)
}
