//! Breadth-first, color-gated flood fill.
//!
//! [`FloodFill`] holds the frontier of one fill and advances one dequeue at a
//! time, so a UI can drive it from a timer. [`Graph::breadth_first_search`]
//! runs it to completion, and [`Graph::breadth_first_search_paced`] awaits a
//! short sleep between steps to animate the fill.
//!
//! A node enters the queue at most once: membership in the visited set is
//! checked when a neighbor is enqueued, and the color test uses the color the
//! neighbor has at that moment. Each dequeued node is recolored exactly once
//! unless the fill is aborted. Nothing skips nodes that already have the new
//! color; the region is defined by reachability through `starting_color`.
//!
//! Abort is cooperative. The caller's predicate is sampled at the top of each
//! iteration and once more right before the recolor, never in the middle of
//! one.

use std::time::Duration;

use indexmap::IndexSet;

use crate::color::Color;
use crate::error::CoreError;
use crate::graph::Graph;
use crate::grid::BrushSize;
use crate::id::NodeId;
use crate::queue::Queue;
use crate::surface::Surface;

/// Pause between paced fill steps.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(2);

/// State of one flood fill in progress.
#[derive(Debug, Clone)]
pub struct FloodFill {
    queue: Queue<NodeId>,
    visited: IndexSet<NodeId>,
    starting_color: Color,
    new_color: Color,
}

impl FloodFill {
    /// Seeds a fill at `start`. Fails if `start` is not in `graph`.
    pub fn new(
        graph: &Graph,
        start: NodeId,
        starting_color: Color,
        new_color: Color,
    ) -> Result<Self, CoreError> {
        Self::with_visited(graph, start, starting_color, new_color, IndexSet::new())
    }

    /// Like [`FloodFill::new`], treating every id in `visited` as already
    /// handled.
    pub fn with_visited(
        graph: &Graph,
        start: NodeId,
        starting_color: Color,
        new_color: Color,
        mut visited: IndexSet<NodeId>,
    ) -> Result<Self, CoreError> {
        if !graph.node_exists(start) {
            return Err(CoreError::NodeNotFound { id: start });
        }
        let mut queue = Queue::new();
        queue.enqueue(start);
        visited.insert(start);
        Ok(FloodFill {
            queue,
            visited,
            starting_color,
            new_color,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Ids enqueued so far, in enqueue order.
    pub fn visited(&self) -> &IndexSet<NodeId> {
        &self.visited
    }

    pub fn into_visited(self) -> IndexSet<NodeId> {
        self.visited
    }

    /// Removes the next node from the frontier.
    pub fn next_node(&mut self) -> Option<NodeId> {
        self.queue.dequeue()
    }

    /// Recolors a dequeued node (unless `aborted`) and enqueues its unvisited
    /// neighbors whose current color is the starting color.
    pub fn settle<S: Surface + ?Sized>(
        &mut self,
        graph: &mut Graph,
        id: NodeId,
        surface: &mut S,
        aborted: bool,
    ) -> Result<(), CoreError> {
        if !aborted {
            graph.update_node_color(id, self.new_color, BrushSize::Small, surface)?;
        }
        for &next in graph.neighbors(id)? {
            if self.visited.contains(&next) {
                continue;
            }
            if graph.color_of(next)? == self.starting_color {
                self.queue.enqueue(next);
                self.visited.insert(next);
            }
        }
        Ok(())
    }

    /// Dequeues and settles one node. Returns `None` once the fill is done.
    pub fn step<S: Surface + ?Sized>(
        &mut self,
        graph: &mut Graph,
        surface: &mut S,
    ) -> Result<Option<NodeId>, CoreError> {
        let Some(id) = self.next_node() else {
            return Ok(None);
        };
        self.settle(graph, id, surface, false)?;
        Ok(Some(id))
    }
}

impl Graph {
    /// Flood fills from `start` with `new_color`, spreading through neighbors
    /// whose color equals `starting_color`. Returns the visited ids.
    pub fn breadth_first_search<S, A>(
        &mut self,
        start: NodeId,
        starting_color: Color,
        new_color: Color,
        surface: &mut S,
        abort: A,
    ) -> Result<IndexSet<NodeId>, CoreError>
    where
        S: Surface + ?Sized,
        A: Fn() -> bool,
    {
        self.breadth_first_search_with_visited(
            start,
            starting_color,
            new_color,
            IndexSet::new(),
            surface,
            abort,
        )
    }

    /// [`Graph::breadth_first_search`] that never enters the ids already in
    /// `visited`. The returned set extends `visited`.
    pub fn breadth_first_search_with_visited<S, A>(
        &mut self,
        start: NodeId,
        starting_color: Color,
        new_color: Color,
        visited: IndexSet<NodeId>,
        surface: &mut S,
        abort: A,
    ) -> Result<IndexSet<NodeId>, CoreError>
    where
        S: Surface + ?Sized,
        A: Fn() -> bool,
    {
        let mut fill = FloodFill::with_visited(self, start, starting_color, new_color, visited)?;
        while !fill.is_finished() && !abort() {
            let Some(id) = fill.next_node() else {
                break;
            };
            fill.settle(self, id, surface, abort())?;
        }
        Ok(fill.into_visited())
    }

    /// Same as [`Graph::breadth_first_search`], but sleeps for `delay` after
    /// each dequeue so every step yields to the runtime.
    pub async fn breadth_first_search_paced<S, A>(
        &mut self,
        start: NodeId,
        starting_color: Color,
        new_color: Color,
        delay: Duration,
        surface: &mut S,
        abort: A,
    ) -> Result<IndexSet<NodeId>, CoreError>
    where
        S: Surface + ?Sized,
        A: Fn() -> bool,
    {
        self.breadth_first_search_paced_with_visited(
            start,
            starting_color,
            new_color,
            IndexSet::new(),
            delay,
            surface,
            abort,
        )
        .await
    }

    /// Paced form of [`Graph::breadth_first_search_with_visited`].
    #[allow(clippy::too_many_arguments)]
    pub async fn breadth_first_search_paced_with_visited<S, A>(
        &mut self,
        start: NodeId,
        starting_color: Color,
        new_color: Color,
        visited: IndexSet<NodeId>,
        delay: Duration,
        surface: &mut S,
        abort: A,
    ) -> Result<IndexSet<NodeId>, CoreError>
    where
        S: Surface + ?Sized,
        A: Fn() -> bool,
    {
        let mut fill = FloodFill::with_visited(self, start, starting_color, new_color, visited)?;
        while !fill.is_finished() && !abort() {
            let Some(id) = fill.next_node() else {
                break;
            };
            tokio::time::sleep(delay).await;
            tracing::trace!(node = %id, "flood fill step");
            fill.settle(self, id, surface, abort())?;
        }
        Ok(fill.into_visited())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::DEFAULT_WEIGHT;
    use crate::grid::GridLayout;
    use crate::node::Node;
    use crate::surface::{NullSurface, RecordingSurface};
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn grid3() -> Graph {
        Graph::grid(GridLayout::square(3).unwrap(), Color::WHITE)
    }

    fn never() -> bool {
        false
    }

    fn colors(g: &Graph) -> Vec<Color> {
        g.nodes().values().map(|n| n.color()).collect()
    }

    #[test]
    fn fills_monochrome_grid_then_refills() {
        let mut g = grid3();
        let visited = g
            .breadth_first_search(NodeId(5), Color::WHITE, Color::RED, &mut NullSurface, never)
            .unwrap();
        assert_eq!(visited.len(), 9);
        assert!(colors(&g).iter().all(|c| *c == Color::RED));

        g.breadth_first_search(NodeId(5), Color::RED, Color::BLUE, &mut NullSurface, never)
            .unwrap();
        assert!(colors(&g).iter().all(|c| *c == Color::BLUE));
    }

    #[test]
    fn stops_at_color_boundary() {
        let mut g = grid3();
        g.update_node_color(NodeId(1), Color::BLACK, BrushSize::Small, &mut NullSurface)
            .unwrap();
        let mut surface = RecordingSurface::new();
        let visited = g
            .breadth_first_search(NodeId(5), Color::WHITE, Color::RED, &mut surface, never)
            .unwrap();

        assert_eq!(visited.len(), 8);
        assert!(!visited.contains(&NodeId(1)));
        assert_eq!(g.color_of(NodeId(1)).unwrap(), Color::BLACK);
        for id in 2..=9 {
            assert_eq!(g.color_of(NodeId(id)).unwrap(), Color::RED);
        }
        assert_eq!(surface.paints.len(), 8);
    }

    #[test]
    fn enclosed_region_is_not_reached() {
        // Column 1 of a 3x3 grid is a black wall separating column 0 from 2.
        let mut g = grid3();
        for id in [2, 5, 8] {
            g.update_node_color(NodeId(id), Color::BLACK, BrushSize::Small, &mut NullSurface)
                .unwrap();
        }
        g.breadth_first_search(NodeId(1), Color::WHITE, Color::GREEN, &mut NullSurface, never)
            .unwrap();
        for id in [1, 4, 7] {
            assert_eq!(g.color_of(NodeId(id)).unwrap(), Color::GREEN);
        }
        for id in [3, 6, 9] {
            assert_eq!(g.color_of(NodeId(id)).unwrap(), Color::WHITE);
        }
    }

    #[test]
    fn visit_order_is_breadth_first() {
        let mut g = Graph::grid(GridLayout::new(5, 1).unwrap(), Color::WHITE);
        let mut surface = RecordingSurface::new();
        g.breadth_first_search(NodeId(3), Color::WHITE, Color::RED, &mut surface, never)
            .unwrap();
        let order = surface.painted_ids();
        assert_eq!(order[0], NodeId(3));
        let pos = |id: u32| order.iter().position(|n| *n == NodeId(id)).unwrap();
        assert!(pos(2) < pos(1));
        assert!(pos(4) < pos(5));
    }

    #[test]
    fn same_start_and_new_color_repaints_region() {
        let mut g = grid3();
        let mut surface = RecordingSurface::new();
        let visited = g
            .breadth_first_search(NodeId(1), Color::WHITE, Color::WHITE, &mut surface, never)
            .unwrap();
        assert_eq!(visited.len(), 9);
        assert_eq!(surface.paints.len(), 9);
        assert!(colors(&g).iter().all(|c| *c == Color::WHITE));
    }

    #[test]
    fn each_node_is_painted_once() {
        let mut g = Graph::grid(GridLayout::square(6).unwrap(), Color::WHITE);
        let mut surface = RecordingSurface::new();
        g.breadth_first_search(NodeId(14), Color::WHITE, Color::RED, &mut surface, never)
            .unwrap();
        let mut ids = surface.painted_ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), surface.paints.len());
        assert_eq!(ids.len(), 36);
    }

    #[test]
    fn seed_is_painted_even_if_off_color() {
        let mut g = grid3();
        g.update_node_color(NodeId(5), Color::BLACK, BrushSize::Small, &mut NullSurface)
            .unwrap();
        g.breadth_first_search(NodeId(5), Color::WHITE, Color::RED, &mut NullSurface, never)
            .unwrap();
        assert!(colors(&g).iter().all(|c| *c == Color::RED));
    }

    #[test]
    fn unknown_start_errors() {
        let mut g = grid3();
        let result =
            g.breadth_first_search(NodeId(42), Color::WHITE, Color::RED, &mut NullSurface, never);
        assert!(matches!(result, Err(CoreError::NodeNotFound { id }) if id == NodeId(42)));
    }

    #[test]
    fn abort_before_first_iteration_paints_nothing() {
        let mut g = grid3();
        let mut surface = RecordingSurface::new();
        let visited = g
            .breadth_first_search(NodeId(5), Color::WHITE, Color::RED, &mut surface, || true)
            .unwrap();
        assert_eq!(visited.len(), 1);
        assert!(surface.paints.is_empty());
    }

    #[test]
    fn abort_after_first_paint_leaves_rest_untouched() {
        // Loop check, recolor check, then the second loop check sees the abort.
        let calls = Cell::new(0);
        let abort = || {
            calls.set(calls.get() + 1);
            calls.get() > 2
        };
        let mut g = grid3();
        let mut surface = RecordingSurface::new();
        g.breadth_first_search(NodeId(5), Color::WHITE, Color::RED, &mut surface, abort)
            .unwrap();
        assert_eq!(surface.paints, vec![(NodeId(5), Color::RED)]);
        let red = colors(&g).iter().filter(|c| **c == Color::RED).count();
        assert_eq!(red, 1);
    }

    #[test]
    fn step_drives_fill_to_completion() {
        let mut g = grid3();
        let mut fill = FloodFill::new(&g, NodeId(1), Color::WHITE, Color::BLUE).unwrap();
        let mut steps = 0;
        while fill.step(&mut g, &mut NullSurface).unwrap().is_some() {
            steps += 1;
        }
        assert_eq!(steps, 9);
        assert!(fill.is_finished());
        assert_eq!(fill.step(&mut g, &mut NullSurface).unwrap(), None);
        assert!(colors(&g).iter().all(|c| *c == Color::BLUE));
    }

    #[test]
    fn with_visited_respects_prior_visits() {
        let mut g = grid3();
        let blocked: IndexSet<NodeId> = [NodeId(2), NodeId(4)].into_iter().collect();
        let mut fill =
            FloodFill::with_visited(&g, NodeId(1), Color::WHITE, Color::RED, blocked).unwrap();
        while fill.step(&mut g, &mut NullSurface).unwrap().is_some() {}
        // Node 1's only neighbors were pre-visited, so nothing else was reached.
        assert_eq!(g.color_of(NodeId(1)).unwrap(), Color::RED);
        assert_eq!(g.color_of(NodeId(5)).unwrap(), Color::WHITE);
        assert_eq!(fill.visited().len(), 3);
    }

    /// Pre-visits column 1 of a 3x3 grid, leaving it white but out of reach.
    fn middle_column_visited() -> IndexSet<NodeId> {
        [NodeId(2), NodeId(5), NodeId(8)].into_iter().collect()
    }

    fn assert_left_column_only(g: &Graph, visited: &IndexSet<NodeId>) {
        for id in [1, 4, 7] {
            assert_eq!(g.color_of(NodeId(id)).unwrap(), Color::RED);
        }
        for id in [2, 3, 5, 6, 8, 9] {
            assert_eq!(g.color_of(NodeId(id)).unwrap(), Color::WHITE);
        }
        assert_eq!(visited.len(), 6);
        assert!(visited.contains(&NodeId(5)));
    }

    #[test]
    fn seeded_visited_set_blocks_immediate_fill() {
        let mut g = grid3();
        let visited = g
            .breadth_first_search_with_visited(
                NodeId(1),
                Color::WHITE,
                Color::RED,
                middle_column_visited(),
                &mut NullSurface,
                never,
            )
            .unwrap();
        assert_left_column_only(&g, &visited);
    }

    #[tokio::test]
    async fn seeded_visited_set_blocks_paced_fill() {
        let mut g = grid3();
        let visited = g
            .breadth_first_search_paced_with_visited(
                NodeId(1),
                Color::WHITE,
                Color::RED,
                middle_column_visited(),
                Duration::from_millis(1),
                &mut NullSurface,
                never,
            )
            .await
            .unwrap();
        assert_left_column_only(&g, &visited);
    }

    #[test]
    fn directed_fill_follows_edge_direction() {
        let white = |id| Node::new(NodeId(id), Color::WHITE);
        let mut g = Graph::new(Vec::new(), true);
        g.create_adjacency(white(1), white(2), DEFAULT_WEIGHT);
        g.create_adjacency(white(3), white(2), DEFAULT_WEIGHT);
        g.breadth_first_search(NodeId(1), Color::WHITE, Color::RED, &mut NullSurface, never)
            .unwrap();
        assert_eq!(g.color_of(NodeId(2)).unwrap(), Color::RED);
        assert_eq!(g.color_of(NodeId(3)).unwrap(), Color::WHITE);
    }

    #[tokio::test]
    async fn paced_fill_matches_immediate_fill() {
        let mut g = grid3();
        g.update_node_color(NodeId(1), Color::BLACK, BrushSize::Small, &mut NullSurface)
            .unwrap();
        let visited = g
            .breadth_first_search_paced(
                NodeId(5),
                Color::WHITE,
                Color::RED,
                Duration::from_millis(1),
                &mut NullSurface,
                never,
            )
            .await
            .unwrap();
        assert_eq!(visited.len(), 8);
        assert_eq!(g.color_of(NodeId(1)).unwrap(), Color::BLACK);
    }

    /// Surface that raises the abort flag as soon as anything is painted.
    struct AbortOnPaint {
        flag: Arc<AtomicBool>,
        inner: RecordingSurface,
    }

    impl Surface for AbortOnPaint {
        fn paint(&mut self, id: NodeId, color: Color) {
            self.inner.paint(id, color);
            self.flag.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn paced_fill_observes_abort_before_second_dequeue() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut surface = AbortOnPaint {
            flag: Arc::clone(&flag),
            inner: RecordingSurface::new(),
        };
        let mut g = grid3();
        g.breadth_first_search_paced(
            NodeId(5),
            Color::WHITE,
            Color::RED,
            DEFAULT_STEP_DELAY,
            &mut surface,
            || flag.load(Ordering::SeqCst),
        )
        .await
        .unwrap();

        assert_eq!(surface.inner.paints, vec![(NodeId(5), Color::RED)]);
        for id in (1..=9).filter(|id| *id != 5) {
            assert_eq!(g.color_of(NodeId(id)).unwrap(), Color::WHITE);
        }
    }

    #[tokio::test]
    async fn paced_fill_yields_to_concurrent_abort() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut g = Graph::grid(GridLayout::square(20).unwrap(), Color::WHITE);
        let mut surface = RecordingSurface::new();

        let fill = g.breadth_first_search_paced(
            NodeId(1),
            Color::WHITE,
            Color::RED,
            Duration::from_millis(5),
            &mut surface,
            || flag.load(Ordering::SeqCst),
        );
        let trigger = async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            flag.store(true, Ordering::SeqCst);
        };
        let (result, ()) = tokio::join!(fill, trigger);
        result.unwrap();

        assert!(!surface.paints.is_empty());
        assert!(surface.paints.len() < 400);
    }

    proptest! {
        #[test]
        fn fill_recolors_exactly_the_reachable_same_colored_region(
            w in 1u32..8,
            h in 1u32..8,
            walls in prop::collection::vec(any::<bool>(), 64),
            seed in 0usize..64,
        ) {
            let layout = GridLayout::new(w, h).unwrap();
            let mut g = Graph::grid(layout, Color::WHITE);
            for (i, id) in layout.ids().enumerate() {
                if walls[i] {
                    g.update_node_color(id, Color::BLACK, BrushSize::Small, &mut NullSurface).unwrap();
                }
            }
            let start = NodeId((seed % layout.cell_count()) as u32 + 1);
            let start_color = g.color_of(start).unwrap();
            let before = g.clone();

            let visited = g
                .breadth_first_search(start, start_color, Color::RED, &mut NullSurface, never)
                .unwrap();

            // Reference region: DFS over the subgraph of start-colored cells.
            let mut region = IndexSet::new();
            let mut stack = vec![start];
            region.insert(start);
            while let Some(id) = stack.pop() {
                for &n in before.neighbors(id).unwrap() {
                    if before.color_of(n).unwrap() == start_color && region.insert(n) {
                        stack.push(n);
                    }
                }
            }

            prop_assert_eq!(visited.len(), region.len());
            for id in layout.ids() {
                let expected = if region.contains(&id) { Color::RED } else { before.color_of(id).unwrap() };
                prop_assert_eq!(g.color_of(id).unwrap(), expected);
            }
        }
    }
}
