//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks. The dataset
//! is read-only after startup, so handlers never take a lock; everything a
//! request derives from it (selection, aggregates, figures) is local to
//! that request.

use crate::config::ServerConfig;
use crate::dashboard::Dataset;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded table and colour assignment
    pub dataset: Arc<Dataset>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dataset: Dataset, config: ServerConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
