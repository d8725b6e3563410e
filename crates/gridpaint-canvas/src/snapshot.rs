//! Row-major copy of the grid's colors for output.

use std::fmt;

use gridpaint_core::{Color, Graph, GridLayout};
use serde::{Deserialize, Serialize};

/// Text glyphs for well-known colors. Anything else renders as `*`.
const PALETTE: [(Color, char); 5] = [
    (Color::WHITE, '.'),
    (Color::BLACK, '#'),
    (Color::RED, 'R'),
    (Color::GREEN, 'G'),
    (Color::BLUE, 'B'),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: u32,
    pub height: u32,
    /// Colors in id order: index `i` holds node `i + 1`.
    pub cells: Vec<Color>,
}

impl GridSnapshot {
    /// Reads every cell of `layout` from `graph`. Cells missing from the
    /// graph are reported as white.
    pub fn capture(graph: &Graph, layout: GridLayout) -> Self {
        let cells = layout
            .ids()
            .map(|id| graph.color_of(id).unwrap_or(Color::WHITE))
            .collect();
        GridSnapshot {
            width: layout.width(),
            height: layout.height(),
            cells,
        }
    }

    pub fn glyph(color: Color) -> char {
        PALETTE
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, g)| *g)
            .unwrap_or('*')
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.width.max(1) as usize;
        for row in self.cells.chunks(width) {
            let line: String = row.iter().map(|c| Self::glyph(*c)).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
