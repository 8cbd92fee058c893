//! Application state for the web layer.

use std::sync::Arc;

use crate::store::{FixtureConnector, StoreHandle};

/// Shared application state.
///
/// Holds the lazily connected schedule store used by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handle through which requests reach the schedule store
    pub store: Arc<StoreHandle<FixtureConnector>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: StoreHandle<FixtureConnector>) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
