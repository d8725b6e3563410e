//! Core error types for gridpaint-core.
//!
//! Uses `thiserror` for structured, matchable error variants. Structural
//! no-ops (duplicate nodes, duplicate or self edges) are not errors and never
//! appear here.

use crate::grid::BrushSize;
use crate::id::NodeId;
use thiserror::Error;

/// Core errors produced by the gridpaint-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A node id was not found in the graph.
    #[error("node not found: NodeId({id})", id = id.0)]
    NodeNotFound { id: NodeId },

    /// A multi-cell brush was used on a graph built without a grid layout.
    #[error("brush '{brush}' needs a grid layout")]
    BrushRequiresLayout { brush: BrushSize },

    /// A color string could not be parsed.
    #[error("invalid color '{input}': {reason}")]
    InvalidColor { input: String, reason: String },

    /// Grid dimensions were zero or overflowed the id space.
    #[error("invalid grid size: {width}x{height}")]
    InvalidGridSize { width: u32, height: u32 },
}
