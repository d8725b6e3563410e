//! The paint collaborator.
//!
//! The graph never touches rendering state. Whenever it changes a node's
//! color it resolves that node on a [`Surface`] and tells it to draw.

use crate::color::Color;
use crate::id::NodeId;

/// Something that can show a cell in a given color.
pub trait Surface {
    /// Renders cell `id` in `color`.
    fn paint(&mut self, id: NodeId, color: Color);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn paint(&mut self, id: NodeId, color: Color) {
        (**self).paint(id, color);
    }
}

/// Discards every paint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn paint(&mut self, _id: NodeId, _color: Color) {}
}

/// Keeps every paint in call order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub paints: Vec<(NodeId, Color)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids in the order they were painted.
    pub fn painted_ids(&self) -> Vec<NodeId> {
        self.paints.iter().map(|(id, _)| *id).collect()
    }
}

impl Surface for RecordingSurface {
    fn paint(&mut self, id: NodeId, color: Color) {
        self.paints.push((id, color));
    }
}
