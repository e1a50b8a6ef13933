//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! All fields are cheap to clone: the store, catalog and config are behind
//! `Arc`, and the write lock is a shared `Arc<Mutex<()>>`.
//!
//! Store implementations do blocking file I/O, so handlers reach the store
//! through [`AppState::run_blocking`].

use crate::config::AppConfig;
use crate::error::ApiError;
use liftwise_shared::{Exercise, TrainingStore};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Persistence port implementation
    pub store: Arc<dyn TrainingStore>,
    /// Read-only exercise catalog
    pub catalog: Arc<Vec<Exercise>>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Serializes plan generation and workout finalization
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: Arc<dyn TrainingStore>, catalog: Vec<Exercise>, config: AppConfig) -> Self {
        Self {
            store,
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    #[inline]
    pub fn store(&self) -> &dyn TrainingStore {
        self.store.as_ref()
    }

    #[inline]
    pub fn catalog(&self) -> &[Exercise] {
        &self.catalog
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Exclusive section for operations that read, run the engine and write
    ///
    /// Plan generation and workout recording both rewrite derived state, so
    /// they must never interleave.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Run store-touching work on the blocking thread pool
    pub async fn run_blocking<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&AppState) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || f(&state))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
