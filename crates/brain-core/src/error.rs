//! Error types for brain setup.

use thiserror::Error;

/// Errors that can occur while building a brain.
///
/// Completion calls themselves never fail with this type; they report
/// provider problems as [`crate::Completion::Failed`].
#[derive(Debug, Error)]
pub enum BrainError {
    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The brain is temporarily unavailable.
    #[error("brain unavailable: {0}")]
    Unavailable(String),
}
