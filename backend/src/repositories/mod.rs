//! Record stores
//!
//! Implementations of the engine's persistence port.

pub mod file_store;
pub mod memory;

pub use file_store::JsonFileStore;
pub use memory::MemoryStore;
