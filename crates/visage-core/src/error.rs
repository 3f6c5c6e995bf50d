//! Error types for the visage engine

use thiserror::Error;

/// Core visage errors.
///
/// These are internal plumbing: at the session boundary every error is
/// caught, the offending payload is dropped, and the face keeps
/// animating. Nothing here is fatal to a running avatar.
#[derive(Error, Debug)]
pub enum VisageError {
    // Payload errors
    #[error("Malformed session message: {0}")]
    MalformedMessage(String),

    #[error("Alignment payload missing field: {0}")]
    MissingField(&'static str),

    #[error("Alignment arrays disagree: {chars} chars, {starts} starts, {durations} durations")]
    LengthMismatch {
        chars: usize,
        starts: usize,
        durations: usize,
    },
}

/// Result type for visage operations
pub type VisageResult<T> = Result<T, VisageError>;
