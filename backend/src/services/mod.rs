//! Business logic services
//!
//! Services load records through the store, run the engine and persist
//! what it produces. Handlers own locking; services are synchronous.

pub mod catalog;
pub mod plan;
pub mod profile;
pub mod progress;
pub mod workout;

pub use catalog::CatalogService;
pub use plan::PlanService;
pub use profile::ProfileService;
pub use progress::ProgressService;
pub use workout::WorkoutService;
