//! Application state for the Salary Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ScheduleLoader;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// such as the loaded schedule and solver settings.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ScheduleLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ScheduleLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ScheduleLoader {
        &self.config
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ScheduleLoader::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_same_config() {
        let state = AppState::default();
        let clone = state.clone();
        assert!(std::ptr::eq(state.config(), clone.config()));
    }
}
