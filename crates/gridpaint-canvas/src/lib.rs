//! Application layer for the gridpaint drawing surface.
//!
//! Holds the UI state (tool, color, brush) explicitly in [`AppState`] and
//! translates pointer [`Action`]s into [`gridpaint_core::Graph`] calls. The
//! graph itself never sees which tool is active.

pub mod action;
pub mod canvas;
pub mod error;
pub mod snapshot;
pub mod state;

pub use action::Action;
pub use canvas::Canvas;
pub use error::CanvasError;
pub use snapshot::GridSnapshot;
pub use state::{AbortHandle, AppState, Tool};
