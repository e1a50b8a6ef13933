//! Liftwise shared library
//!
//! The training engine: data model, units, validation, strength estimation,
//! progress analytics, exercise matching, plan generation and workout
//! rotation. Everything here is synchronous and free of I/O; hosts persist
//! records through [`store::TrainingStore`].

pub mod analytics;
pub mod config;
pub mod errors;
pub mod matcher;
pub mod models;
pub mod planner;
pub mod rotation;
pub mod store;
pub mod strength;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use config::EngineConfig;
pub use errors::*;
pub use models::*;
pub use planner::{PlanGenerator, PlanInputs};
pub use rotation::{next_available_workout, RotationProgress};
pub use store::{StoreResult, TrainingStore};
pub use strength::{best_estimated_one_rep_max, estimate_one_rep_max};
pub use types::*;
pub use units::*;
