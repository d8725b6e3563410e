//! Directed adjacency record.
//!
//! The graph keeps an append-only history of [`Edge`]s in creation order. An
//! undirected connection is two edges, one per direction, with equal weight.

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// Weight given to grid adjacencies. Traversals ignore it.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A directed edge `source -> target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId, weight: f64) -> Self {
        Edge {
            source,
            target,
            weight,
        }
    }

    /// The same connection pointing the other way.
    pub fn reversed(&self) -> Self {
        Edge {
            source: self.target,
            target: self.source,
            weight: self.weight,
        }
    }
}
