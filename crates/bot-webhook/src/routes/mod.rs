//! Route handlers for the webhook server.

pub mod health;
pub mod webhook;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router(webhook_path: &str) -> Router<AppState> {
    Router::new()
        // Platform updates
        .route(webhook_path, post(webhook::receive_update))
        // Health check
        .route("/health", get(health::health))
}
