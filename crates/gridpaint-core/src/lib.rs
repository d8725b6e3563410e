pub mod color;
pub mod id;
pub mod node;
pub mod edge;
pub mod queue;
pub mod error;
pub mod grid;
pub mod surface;
pub mod graph;
pub mod fill;

// Re-export commonly used types
pub use color::Color;
pub use id::NodeId;
pub use node::Node;
pub use edge::{Edge, DEFAULT_WEIGHT};
pub use queue::Queue;
pub use error::CoreError;
pub use grid::{BrushSize, GridLayout, DEFAULT_GRID_SIZE};
pub use surface::{NullSurface, RecordingSurface, Surface};
pub use graph::Graph;
pub use fill::{FloodFill, DEFAULT_STEP_DELAY};
