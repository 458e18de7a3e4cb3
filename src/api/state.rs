//! Application state for the salary engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, PoisonError, RwLock};

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded rate tables as one immutable snapshot. Handlers take
/// the snapshot once per request, so a calculation never sees a mix of
/// old and new tables; [`AppState::reload`] swaps the whole snapshot.
#[derive(Clone)]
pub struct AppState {
    config: Arc<RwLock<Arc<ConfigLoader>>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// Returns the current configuration snapshot.
    pub fn config(&self) -> Arc<ConfigLoader> {
        let guard = self.config.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the configuration with a freshly loaded one.
    ///
    /// Calculations already holding the previous snapshot finish with it.
    pub fn reload(&self, config: ConfigLoader) {
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(config);
    }
}
