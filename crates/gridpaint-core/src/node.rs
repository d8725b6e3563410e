//! Grid cell node.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::id::NodeId;

/// One addressable grid cell.
///
/// The id is fixed at construction. The color is the only state that changes
/// afterwards, and only through [`Graph`](crate::graph::Graph) methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    color: Color,
}

impl Node {
    pub fn new(id: NodeId, color: Color) -> Self {
        Node { id, color }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
