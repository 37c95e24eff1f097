//! Shared application state.

use std::sync::Arc;

use gradplan_storage::JsonStorage;

/// State handed to every handler.
pub struct AppState {
    /// The document store
    pub storage: Arc<JsonStorage>,
}

impl AppState {
    /// Wrap the store for sharing across handlers.
    pub fn new(storage: Arc<JsonStorage>) -> Arc<Self> {
        Arc::new(Self { storage })
    }
}
