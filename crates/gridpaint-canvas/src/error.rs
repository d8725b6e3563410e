//! Errors surfaced by the canvas layer.

use gridpaint_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    /// A graph operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An action script could not be decoded.
    #[error("invalid action script: {0}")]
    Script(#[from] serde_json::Error),
}
