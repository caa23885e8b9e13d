// src/error.rs

use thiserror::Error;

/// Failure taxonomy for the engine. Nothing else escapes the public API.
///
/// `MalformedLevel` and `LoadFailure` are fatal for the affected load;
/// `InvalidPlacement`/`InvalidRemoval` reject a user intent without any
/// state change; `SaveFailure` is logged and swallowed by the progression
/// machine (progress saves are best-effort).
#[derive(Debug, Error)]
pub enum GameError {
    #[error("malformed level: {0}")]
    MalformedLevel(String),

    #[error("invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("invalid removal: {0}")]
    InvalidRemoval(String),

    #[error("failed to load game data: {0}")]
    LoadFailure(String),

    #[error("failed to save progress: {0}")]
    SaveFailure(String),
}
