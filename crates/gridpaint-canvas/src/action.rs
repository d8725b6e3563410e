//! Input actions the canvas understands.

use gridpaint_core::{BrushSize, Color, NodeId};
use serde::{Deserialize, Serialize};

use crate::error::CanvasError;
use crate::state::Tool;

/// One user input, already resolved from screen coordinates to a cell id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SelectTool { tool: Tool },
    SelectColor { color: Color },
    SelectBrush { brush: BrushSize },
    /// Pointer pressed on a cell.
    Press { id: NodeId },
    /// Pointer moved onto a cell while pressed.
    Drag { id: NodeId },
}

impl Action {
    /// Decodes a JSON array of actions.
    pub fn parse_script(json: &str) -> Result<Vec<Action>, CanvasError> {
        Ok(serde_json::from_str(json)?)
    }
}
