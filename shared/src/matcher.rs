//! Exercise similarity scoring
//!
//! Used for "suggested alternative" lists, for the free-text "replace
//! exercise" picker, and by the plan generator to propose substitutes for
//! muscle groups the user's equipment cannot cover.

use crate::models::Exercise;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const SUGGESTED_REPLACEMENT_CAP: usize = 20;
pub const ALL_REPLACEMENT_CAP: usize = 60;

const MUSCLE_OVERLAP_WEIGHT: u32 = 10;
const SAME_CATEGORY_BONUS: u32 = 4;
const SAME_EQUIPMENT_BONUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Similarity {
    pub is_match: bool,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredExercise {
    pub exercise: Exercise,
    pub score: u32,
}

fn muscle_set(exercise: &Exercise) -> BTreeSet<String> {
    exercise
        .muscle_groups
        .iter()
        .map(|group| group.trim().to_lowercase())
        .collect()
}

/// Score how well `candidate` stands in for `target`
///
/// One shared muscle group is not enough on its own: it needs a second
/// shared group, the same category, or the same equipment.
pub fn score_similarity(candidate: &Exercise, target: &Exercise) -> Similarity {
    let overlap = muscle_set(candidate)
        .intersection(&muscle_set(target))
        .count() as u32;
    let same_equipment = candidate.equipment.eq_ignore_ascii_case(&target.equipment);
    let same_category = candidate.category.eq_ignore_ascii_case(&target.category);

    let is_match = overlap >= 1 && (overlap >= 2 || same_category || same_equipment);
    let score = overlap * MUSCLE_OVERLAP_WEIGHT
        + if same_category { SAME_CATEGORY_BONUS } else { 0 }
        + if same_equipment { SAME_EQUIPMENT_BONUS } else { 0 };

    Similarity { is_match, score }
}

/// Closest matches to `target`, best first
pub fn suggested_replacements<'a>(
    pool: impl IntoIterator<Item = &'a Exercise>,
    target: &Exercise,
    limit: usize,
) -> Vec<ScoredExercise> {
    let mut matches: Vec<ScoredExercise> = pool
        .into_iter()
        .filter(|candidate| candidate.id != target.id)
        .filter_map(|candidate| {
            let similarity = score_similarity(candidate, target);
            similarity.is_match.then(|| ScoredExercise {
                exercise: candidate.clone(),
                score: similarity.score,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.exercise.id.cmp(&b.exercise.id))
    });
    matches.truncate(limit);
    matches
}

/// Free-text replacement search for one slot of a workout
///
/// Skips the exercise being replaced and anything already elsewhere in the
/// same workout, so a day never trains the same movement twice.
pub fn all_replacements<'a>(
    pool: impl IntoIterator<Item = &'a Exercise>,
    target: &Exercise,
    query: &str,
    current_workout_ids: &[&str],
    limit: usize,
) -> Vec<Exercise> {
    let needle = query.trim().to_lowercase();
    pool.into_iter()
        .filter(|candidate| candidate.id != target.id)
        .filter(|candidate| !current_workout_ids.contains(&candidate.id.as_str()))
        .filter(|candidate| needle.is_empty() || candidate.name.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}
