//! Exercise catalog: loading, search and replacement lookups

use crate::error::ApiError;
use anyhow::{Context, Result};
use liftwise_shared::matcher::{all_replacements, suggested_replacements, ScoredExercise};
use liftwise_shared::{EngineConfig, Exercise, GeneratedPlan};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

/// Catalog shipped with the binary
const BUNDLED_CATALOG: &str = include_str!("../../data/exercises.json");

pub struct CatalogService;

impl CatalogService {
    /// Load the catalog from `path`, or the bundled copy when no path is set
    pub fn load(path: Option<&Path>) -> Result<Vec<Exercise>> {
        let catalog = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("reading catalog {}", path.display()))?;
                Self::parse(&contents)
                    .with_context(|| format!("parsing catalog {}", path.display()))?
            }
            None => Self::parse(BUNDLED_CATALOG).context("parsing bundled catalog")?,
        };

        info!(exercises = catalog.len(), "Loaded exercise catalog");
        Ok(catalog)
    }

    /// Parse a catalog, dropping entries whose id repeats
    pub fn parse(contents: &str) -> Result<Vec<Exercise>> {
        let exercises: Vec<Exercise> = serde_json::from_str(contents)?;
        let mut seen = BTreeSet::new();
        let mut catalog = Vec::with_capacity(exercises.len());
        for exercise in exercises {
            if seen.insert(exercise.id.clone()) {
                catalog.push(exercise);
            } else {
                warn!(id = %exercise.id, "Duplicate exercise id in catalog");
            }
        }
        Ok(catalog)
    }

    pub fn find<'a>(catalog: &'a [Exercise], id: &str) -> Result<&'a Exercise, ApiError> {
        catalog
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Exercise {} not found", id)))
    }

    /// Name search; an empty query lists everything
    pub fn search<'a>(catalog: &'a [Exercise], query: Option<&str>) -> Vec<&'a Exercise> {
        let needle = query.unwrap_or("").trim().to_lowercase();
        catalog
            .iter()
            .filter(|e| {
                needle.is_empty()
                    || e.name.to_lowercase().contains(&needle)
                    || e.muscle_groups.iter().any(|g| g.eq_ignore_ascii_case(&needle))
            })
            .collect()
    }

    pub fn suggestions(
        catalog: &[Exercise],
        id: &str,
        config: &EngineConfig,
    ) -> Result<Vec<ScoredExercise>, ApiError> {
        let target = Self::find(catalog, id)?;
        Ok(suggested_replacements(
            catalog,
            target,
            config.suggested_replacement_cap,
        ))
    }

    /// Free-text replacements for one slot of a plan day
    ///
    /// When a day is given its other exercises are excluded, and the plan
    /// must have that day.
    pub fn replacements(
        catalog: &[Exercise],
        id: &str,
        query: Option<&str>,
        plan: Option<&GeneratedPlan>,
        day_number: Option<u8>,
        config: &EngineConfig,
    ) -> Result<Vec<Exercise>, ApiError> {
        let target = Self::find(catalog, id)?;
        let current: Vec<&str> = match day_number {
            Some(n) => {
                let day = plan.and_then(|plan| plan.day_by_number(n)).ok_or_else(|| {
                    ApiError::BadRequest(format!("Current plan has no day {}", n))
                })?;
                day.exercises.iter().map(|p| p.exercise.id.as_str()).collect()
            }
            None => Vec::new(),
        };

        Ok(all_replacements(
            catalog,
            target,
            query.unwrap_or(""),
            &current,
            config.all_replacement_cap,
        ))
    }
}
