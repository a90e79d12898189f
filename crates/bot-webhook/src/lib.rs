//! Webhook server for the Bale assistant bot.
//!
//! Receives platform updates over HTTP, hands each text message to the
//! [`orchestrator::Dispatcher`], and maps the outcome to a status code.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::WebhookError;
pub use state::AppState;

use axum::Router;

/// Build the application router for the given webhook path.
pub fn app(state: AppState, webhook_path: &str) -> Router {
    routes::router(webhook_path).with_state(state)
}

/// Initialise logging: `RUST_LOG` if set, `info` otherwise.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
