//! Graph: the adjacency-list container behind the drawing grid.
//!
//! [`Graph`] owns every [`Node`], the adjacency relation between them and the
//! append-only history of [`Edge`]s. Nodes and edges are only ever added; the
//! color of a node is the one piece of state that changes after construction.
//!
//! Adjacency lists keep edge-creation order, and nodes keep insertion order,
//! so traversals and component counts are deterministic for a given build
//! sequence.
//!
//! Flood fill lives in [`crate::fill`].

use indexmap::{IndexMap, IndexSet};
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::color::Color;
use crate::edge::{Edge, DEFAULT_WEIGHT};
use crate::error::CoreError;
use crate::grid::{BrushSize, GridLayout};
use crate::id::NodeId;
use crate::node::Node;
use crate::surface::Surface;

/// Neighbor list. Grid cells have at most four.
pub type Neighbors = SmallVec<[NodeId; 4]>;

/// Adjacency-list graph of grid cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Fixed at construction.
    directed: bool,
    nodes: IndexMap<NodeId, Node>,
    /// Every key here is also a key of `nodes`.
    adjacency: IndexMap<NodeId, Neighbors>,
    edges: Vec<Edge>,
    /// Present when the graph was built by [`Graph::grid`].
    layout: Option<GridLayout>,
}

impl Graph {
    /// Creates a graph holding `nodes`. Duplicate ids keep the first node.
    pub fn new(nodes: impl IntoIterator<Item = Node>, directed: bool) -> Self {
        let mut graph = Graph {
            directed,
            nodes: IndexMap::new(),
            adjacency: IndexMap::new(),
            edges: Vec::new(),
            layout: None,
        };
        for node in nodes {
            graph.add_node(node);
        }
        graph
    }

    /// Builds the undirected 4-neighbor grid for `layout`, every cell colored
    /// `color`.
    ///
    /// Each cell is joined to its up- and right-neighbor; mirroring supplies
    /// down and left.
    pub fn grid(layout: GridLayout, color: Color) -> Self {
        let mut graph = Graph::new(layout.ids().map(|id| Node::new(id, color)), false);
        for id in layout.ids() {
            let node = Node::new(id, color);
            for (d_row, d_col) in [(-1, 0), (0, 1)] {
                if let Some(other) = layout.offset(id, d_row, d_col) {
                    graph.create_adjacency(node, Node::new(other, color), DEFAULT_WEIGHT);
                }
            }
        }
        graph.layout = Some(layout);
        graph
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn nodes(&self) -> &IndexMap<NodeId, Node> {
        &self.nodes
    }

    pub fn adjacency(&self) -> &IndexMap<NodeId, Neighbors> {
        &self.adjacency
    }

    /// Edge history in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn layout(&self) -> Option<GridLayout> {
        self.layout
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn color_of(&self, id: NodeId) -> Result<Color, CoreError> {
        self.nodes
            .get(&id)
            .map(Node::color)
            .ok_or(CoreError::NodeNotFound { id })
    }

    /// Outgoing neighbors of `id` in edge-creation order.
    pub fn neighbors(&self, id: NodeId) -> Result<&[NodeId], CoreError> {
        self.adjacency
            .get(&id)
            .map(|n| n.as_slice())
            .ok_or(CoreError::NodeNotFound { id })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    /// Inserts `node` with an empty adjacency list. Returns `false` and
    /// changes nothing if the id is already present.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.node_exists(node.id()) {
            return false;
        }
        self.nodes.insert(node.id(), node);
        self.adjacency.insert(node.id(), Neighbors::new());
        true
    }

    pub fn node_exists(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// `true` iff `b` is in `a`'s adjacency list. An unknown `a` is `false`.
    pub fn adjacency_exists(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency
            .get(&a)
            .is_some_and(|neighbors| neighbors.contains(&b))
    }

    /// Adds the directed edge `a -> b`, inserting either node if new.
    ///
    /// Self edges and edges that already exist are ignored. Direction is
    /// always `a -> b`, whatever [`Graph::is_directed`] says; use
    /// [`Graph::create_adjacency`] to respect it. Returns whether an edge was
    /// added.
    pub fn add_edge(&mut self, a: Node, b: Node, weight: f64) -> bool {
        if a.id() == b.id() || self.adjacency_exists(a.id(), b.id()) {
            return false;
        }
        self.add_node(a);
        self.add_node(b);
        if let Some(neighbors) = self.adjacency.get_mut(&a.id()) {
            neighbors.push(b.id());
        }
        self.edges.push(Edge::new(a.id(), b.id(), weight));
        true
    }

    /// Connects `a -> b`, and `b -> a` as well when the graph is undirected.
    pub fn create_adjacency(&mut self, a: Node, b: Node, weight: f64) {
        self.add_edge(a, b, weight);
        if !self.directed {
            self.add_edge(b, a, weight);
        }
    }

    // -----------------------------------------------------------------------
    // Traversal
    // -----------------------------------------------------------------------

    /// Depth-first pre-order from `root`. The returned set is in visit order.
    pub fn depth_first_search(&self, root: NodeId) -> Result<IndexSet<NodeId>, CoreError> {
        let mut visited = IndexSet::new();
        self.depth_first_search_into(root, &mut visited)?;
        Ok(visited)
    }

    /// Depth-first pre-order from `root`, skipping anything already in
    /// `visited` and adding every newly reached node to it.
    ///
    /// Uses an explicit stack of `(node, next neighbor index)` frames so the
    /// visit order matches the recursive formulation without being bounded by
    /// the thread's stack on large grids.
    pub fn depth_first_search_into(
        &self,
        root: NodeId,
        visited: &mut IndexSet<NodeId>,
    ) -> Result<(), CoreError> {
        if !self.node_exists(root) {
            return Err(CoreError::NodeNotFound { id: root });
        }
        visited.insert(root);
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let (id, cursor) = *frame;
            let neighbors = self.neighbors(id)?;
            match neighbors.get(cursor) {
                Some(&next) => {
                    frame.1 += 1;
                    if visited.insert(next) {
                        stack.push((next, 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
        Ok(())
    }

    /// Number of fresh depth-first traversals needed to cover every node,
    /// starting from nodes in insertion order.
    ///
    /// Fails with `NodeNotFound` if a node has no adjacency entry, which only
    /// a hand-edited serialized graph can produce.
    pub fn count_connected_components(&self) -> Result<usize, CoreError> {
        let mut visited = IndexSet::with_capacity(self.nodes.len());
        let mut components = 0;
        for &id in self.nodes.keys() {
            if visited.contains(&id) {
                continue;
            }
            self.depth_first_search_into(id, &mut visited)?;
            components += 1;
        }
        Ok(components)
    }

    // -----------------------------------------------------------------------
    // Color
    // -----------------------------------------------------------------------

    /// Ids a `brush` stamp at `id` would recolor.
    ///
    /// `Small` works on any graph. Larger brushes need the grid layout; cells
    /// past the grid edge are clipped. Every returned id exists in the graph.
    pub fn brush_cells(&self, id: NodeId, brush: BrushSize) -> Result<Vec<NodeId>, CoreError> {
        if !self.node_exists(id) {
            return Err(CoreError::NodeNotFound { id });
        }
        let cells = match (brush, self.layout) {
            (BrushSize::Small, _) => vec![id],
            (_, Some(layout)) => layout
                .brush_cells(id, brush)
                .ok_or(CoreError::NodeNotFound { id })?,
            (_, None) => return Err(CoreError::BrushRequiresLayout { brush }),
        };
        if let Some(&missing) = cells.iter().find(|cell| !self.node_exists(**cell)) {
            return Err(CoreError::NodeNotFound { id: missing });
        }
        Ok(cells)
    }

    /// Sets the color of `id` and, depending on `brush`, of the cells around
    /// it, painting each on `surface`.
    ///
    /// Every target is validated before anything is written, so a failure
    /// leaves the graph untouched.
    pub fn update_node_color<S: Surface + ?Sized>(
        &mut self,
        id: NodeId,
        color: Color,
        brush: BrushSize,
        surface: &mut S,
    ) -> Result<(), CoreError> {
        let cells = self.brush_cells(id, brush)?;
        for cell in cells {
            if let Some(node) = self.nodes.get_mut(&cell) {
                node.set_color(color);
                surface.paint(cell, color);
            }
        }
        Ok(())
    }

    /// Repaints every node in insertion order.
    pub fn set_all_colors<S: Surface + ?Sized>(&mut self, color: Color, surface: &mut S) {
        for (&id, node) in self.nodes.iter_mut() {
            node.set_color(color);
            surface.paint(id, color);
        }
    }

    // -----------------------------------------------------------------------
    // Interop
    // -----------------------------------------------------------------------

    /// Exports the structure as a petgraph `DiGraphMap` weighted by edge
    /// weight. Mirrored edges of an undirected graph appear in both
    /// directions.
    pub fn to_petgraph(&self) -> DiGraphMap<NodeId, f64> {
        let mut out = DiGraphMap::with_capacity(self.nodes.len(), self.edges.len());
        for &id in self.nodes.keys() {
            out.add_node(id);
        }
        for edge in &self.edges {
            out.add_edge(edge.source, edge.target, edge.weight);
        }
        out
    }
}
