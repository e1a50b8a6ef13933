//! Error types for the training engine

use thiserror::Error;

/// Message shown when a plan is requested before onboarding is finished
pub const ONBOARDING_REQUIRED_MESSAGE: &str = "Complete onboarding first";

/// Message shown when a plan is requested before settings are chosen
pub const SETTINGS_REQUIRED_MESSAGE: &str = "Choose your plan settings first";

/// Plan generation precondition failures
///
/// Degenerate coverage (no exercise for a muscle group) is not an error; it
/// is reported inside the generated plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Cannot generate plan: {}", ONBOARDING_REQUIRED_MESSAGE)]
    MissingProfile,

    #[error("Cannot generate plan: {}", SETTINGS_REQUIRED_MESSAGE)]
    MissingSettings,

    #[error("Cannot generate plan: invalid settings: {0}")]
    InvalidSettings(String),
}

/// Persistence port failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
