//! Platform update endpoint.
//!
//! Status mapping: 200 for handled, ignored, or malformed updates; 400 when a
//! chat-side precondition failed; 500 on storage faults.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use bale_client::Update;
use orchestrator::DispatchStatus;
use tracing::debug;

use crate::error::Result;
use crate::state::AppState;

/// Receive one update.
///
/// The body is parsed by hand so a payload the platform shapes differently
/// degrades to a no-op instead of a 4xx from the extractor.
pub async fn receive_update(State(state): State<AppState>, body: Bytes) -> Result<StatusCode> {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            debug!(error = %e, "Ignoring unparsable update");
            return Ok(StatusCode::OK);
        }
    };

    let Some((chat_id, text)) = update.text_message() else {
        debug!(update_id = ?update.update_id, "Ignoring update without text");
        return Ok(StatusCode::OK);
    };

    // Run on its own task: the platform hanging up must not cancel a turn halfway.
    let dispatcher = Arc::clone(&state.dispatcher);
    let text = text.to_string();
    let outcome =
        tokio::spawn(async move { dispatcher.dispatch(&chat_id, &text).await }).await??;

    Ok(match outcome.status {
        DispatchStatus::Handled | DispatchStatus::Ignored => StatusCode::OK,
        DispatchStatus::PreconditionFailed => StatusCode::BAD_REQUEST,
    })
}
