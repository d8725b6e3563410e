//! Explicit UI state: which tool, color and brush the next action uses.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gridpaint_core::{BrushSize, Color};
use serde::{Deserialize, Serialize};

/// The active drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Paint with the selected color.
    #[default]
    Color,
    /// Flood fill the clicked region.
    Fill,
    /// Paint white.
    Eraser,
    /// Paint a fresh random color on every stamp.
    Rainbow,
    /// Clear the canvas and stop any running fill.
    EraseAll,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Color => "color",
            Tool::Fill => "fill",
            Tool::Eraser => "eraser",
            Tool::Rainbow => "rainbow",
            Tool::EraseAll => "erase_all",
        };
        f.write_str(name)
    }
}

/// Current tool, color and brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub tool: Tool,
    pub color: Color,
    pub brush: BrushSize,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            tool: Tool::Color,
            color: Color::BLACK,
            brush: BrushSize::Small,
        }
    }
}

/// Shared "abort all" flag sampled by running fills.
///
/// Clones share the same flag, so a handle given to another task can stop a
/// paced fill at its next iteration.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
}

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
