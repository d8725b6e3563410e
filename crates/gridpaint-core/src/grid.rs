//! Row/column mapping for the 1-D id space and brush geometry.
//!
//! Cell `(row, col)` of a `width x height` grid has id `row * width + col + 1`.
//! All neighbor and brush computations go through [`GridLayout::offset`], which
//! works on coordinates and returns `None` for anything off the grid. A brush
//! stamp at the right edge of one row therefore never bleeds into the next.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::NodeId;

/// Side length of the default square canvas.
pub const DEFAULT_GRID_SIZE: u32 = 100;

/// The 8-neighbor ring, as `(d_row, d_col)`.
const RING: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Second-ring cells not reached by doubling [`RING`].
const OUTER_FILL: [(i64, i64); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Named brush footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushSize {
    /// The target cell only.
    #[default]
    Small,
    /// Target plus its 8 neighbors (3x3).
    Medium,
    /// Target plus every cell within two steps in both axes (5x5).
    Big,
}

impl fmt::Display for BrushSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BrushSize::Small => "small",
            BrushSize::Medium => "medium",
            BrushSize::Big => "big",
        };
        f.write_str(name)
    }
}

/// Dimensions of a row-major, 1-based grid.
///
/// Deserialization goes through [`GridLayout::new`], so a decoded layout is
/// always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridDims")]
pub struct GridLayout {
    width: u32,
    height: u32,
}

/// Unchecked wire form of [`GridLayout`].
#[derive(Deserialize)]
struct GridDims {
    width: u32,
    height: u32,
}

impl TryFrom<GridDims> for GridLayout {
    type Error = CoreError;

    fn try_from(dims: GridDims) -> Result<Self, Self::Error> {
        GridLayout::new(dims.width, dims.height)
    }
}

impl GridLayout {
    /// Both sides must be at least 1 and the cell count must fit in a `u32`.
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        match width.checked_mul(height) {
            Some(cells) if cells > 0 => Ok(GridLayout { width, height }),
            _ => Err(CoreError::InvalidGridSize { width, height }),
        }
    }

    pub fn square(size: u32) -> Result<Self, CoreError> {
        Self::new(size, size)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// All ids in row-major order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (1..=self.width * self.height).map(NodeId)
    }

    /// Id of the cell at `(row, col)`, or `None` outside the grid.
    pub fn id_at(&self, row: i64, col: i64) -> Option<NodeId> {
        if row < 0 || col < 0 || row >= self.height as i64 || col >= self.width as i64 {
            return None;
        }
        Some(NodeId((row * self.width as i64 + col + 1) as u32))
    }

    /// `(row, col)` of `id`, or `None` if the id is not a cell of this grid.
    pub fn position(&self, id: NodeId) -> Option<(i64, i64)> {
        let index = id.0.checked_sub(1)?;
        let row = index.checked_div(self.width)?;
        if row >= self.height {
            return None;
        }
        let col = index.checked_rem(self.width)?;
        Some((row as i64, col as i64))
    }

    /// The cell `d_row` rows and `d_col` columns away from `id`.
    pub fn offset(&self, id: NodeId, d_row: i64, d_col: i64) -> Option<NodeId> {
        let (row, col) = self.position(id)?;
        self.id_at(row + d_row, col + d_col)
    }

    /// Up, right, down, left neighbors that exist.
    pub fn neighbors4(&self, id: NodeId) -> Vec<NodeId> {
        [(-1, 0), (0, 1), (1, 0), (0, -1)]
            .into_iter()
            .filter_map(|(dr, dc)| self.offset(id, dr, dc))
            .collect()
    }

    /// Cells covered by a `brush` stamp centered on `id`, center first.
    ///
    /// Off-grid offsets are dropped. Returns `None` if `id` itself is not a
    /// cell of this grid.
    pub fn brush_cells(&self, id: NodeId, brush: BrushSize) -> Option<Vec<NodeId>> {
        self.position(id)?;
        let mut cells = vec![id];
        let mut push = |d_row: i64, d_col: i64| {
            if let Some(cell) = self.offset(id, d_row, d_col) {
                cells.push(cell);
            }
        };
        match brush {
            BrushSize::Small => {}
            BrushSize::Medium => {
                for (dr, dc) in RING {
                    push(dr, dc);
                }
            }
            BrushSize::Big => {
                for (dr, dc) in RING {
                    push(dr, dc);
                    push(2 * dr, 2 * dc);
                }
                for (dr, dc) in OUTER_FILL {
                    push(dr, dc);
                }
            }
        }
        Some(cells)
    }
}
