//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use orchestrator::Dispatcher;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection, for health probes.
    pub db: Database,
    /// Conversation dispatcher.
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, dispatcher: Dispatcher) -> Self {
        Self {
            db,
            dispatcher: Arc::new(dispatcher),
        }
    }
}
