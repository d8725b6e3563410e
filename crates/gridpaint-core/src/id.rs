//! Canonical node identifier.
//!
//! Grid cells are addressed by a single `NodeId` newtype over `u32`. Ids are
//! positive, 1-based and row-major when produced by a [`GridLayout`]. Every
//! map, set and comparison in the crate uses this type, so there is exactly one
//! notion of "the same node".
//!
//! [`GridLayout`]: crate::grid::GridLayout

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        NodeId(raw)
    }
}
