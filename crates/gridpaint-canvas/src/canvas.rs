//! Canvas: the input-handling layer on top of the grid graph.
//!
//! [`Canvas`] owns the [`Graph`], the [`AppState`] and the [`Surface`], and
//! turns each [`Action`] into at most one graph operation. Fills sample the
//! shared [`AbortHandle`] once per iteration. Selecting the erase-all tool
//! raises it, selecting any other tool lowers it, and a fill lowers it again
//! once it returns, so a stop request only ends the fill it interrupted.

use std::time::Duration;

use gridpaint_core::{Color, Graph, GridLayout, NodeId, NullSurface, Surface};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::action::Action;
use crate::error::CanvasError;
use crate::snapshot::GridSnapshot;
use crate::state::{AbortHandle, AppState, Tool};

/// Seed for the rainbow tool unless one is given.
const DEFAULT_RAINBOW_SEED: u64 = 0x9e37_79b9;

/// A drawing surface backed by a grid graph.
pub struct Canvas<S = NullSurface> {
    graph: Graph,
    layout: GridLayout,
    state: AppState,
    surface: S,
    abort: AbortHandle,
    rng: ChaCha8Rng,
}

impl Canvas<NullSurface> {
    /// A white canvas that renders nowhere.
    pub fn headless(layout: GridLayout) -> Self {
        Self::new(layout, NullSurface)
    }
}

impl<S: Surface> Canvas<S> {
    /// Builds a white `layout` grid and paints it once on `surface`.
    pub fn new(layout: GridLayout, mut surface: S) -> Self {
        let mut graph = Graph::grid(layout, Color::WHITE);
        graph.set_all_colors(Color::WHITE, &mut surface);
        Canvas {
            graph,
            layout,
            state: AppState::default(),
            surface,
            abort: AbortHandle::new(),
            rng: ChaCha8Rng::seed_from_u64(DEFAULT_RAINBOW_SEED),
        }
    }

    /// Reseeds the rainbow tool.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// A handle sharing this canvas's abort flag.
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.graph, self.layout)
    }

    /// Applies one action, running any fill to completion immediately.
    pub fn apply(&mut self, action: Action) -> Result<(), CanvasError> {
        if let Action::Press { id } = action {
            if self.state.tool == Tool::Fill {
                return self.fill(id);
            }
        }
        self.apply_non_fill(action)
    }

    /// Applies one action, animating fills with `delay` between steps.
    pub async fn apply_paced(&mut self, action: Action, delay: Duration) -> Result<(), CanvasError> {
        if let Action::Press { id } = action {
            if self.state.tool == Tool::Fill {
                return self.fill_paced(id, delay).await;
            }
        }
        self.apply_non_fill(action)
    }

    /// Applies every action in order, stopping at the first error.
    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = Action>) -> Result<(), CanvasError> {
        for action in actions {
            self.apply(action)?;
        }
        Ok(())
    }

    pub async fn apply_all_paced(
        &mut self,
        actions: impl IntoIterator<Item = Action>,
        delay: Duration,
    ) -> Result<(), CanvasError> {
        for action in actions {
            self.apply_paced(action, delay).await?;
        }
        Ok(())
    }

    fn apply_non_fill(&mut self, action: Action) -> Result<(), CanvasError> {
        debug!(?action, tool = %self.state.tool, "apply");
        match action {
            Action::SelectTool { tool } => self.select_tool(tool),
            Action::SelectColor { color } => self.state.color = color,
            Action::SelectBrush { brush } => self.state.brush = brush,
            Action::Press { id } | Action::Drag { id } => self.stroke(id)?,
        }
        Ok(())
    }

    fn select_tool(&mut self, tool: Tool) {
        self.state.tool = tool;
        if tool == Tool::EraseAll {
            self.abort.request();
            self.graph.set_all_colors(Color::WHITE, &mut self.surface);
            info!(cells = self.graph.node_count(), "canvas erased");
        } else {
            self.abort.clear();
        }
    }

    /// One brush stamp with the current tool. Fill drags and erase-all are
    /// ignored.
    fn stroke(&mut self, id: NodeId) -> Result<(), CanvasError> {
        let color = match self.state.tool {
            Tool::Color => self.state.color,
            Tool::Eraser => Color::WHITE,
            Tool::Rainbow => Color::random(&mut self.rng),
            Tool::Fill | Tool::EraseAll => return Ok(()),
        };
        self.graph
            .update_node_color(id, color, self.state.brush, &mut self.surface)?;
        Ok(())
    }

    /// The color a fill at `id` would replace, or `None` when the region
    /// already has the selected color.
    fn fill_target(&self, id: NodeId) -> Result<Option<Color>, CanvasError> {
        let starting = self.graph.color_of(id)?;
        if starting == self.state.color {
            debug!(node = %id, "fill skipped, region already has the color");
            return Ok(None);
        }
        Ok(Some(starting))
    }

    fn fill(&mut self, id: NodeId) -> Result<(), CanvasError> {
        let Some(starting) = self.fill_target(id)? else {
            return Ok(());
        };
        let abort = self.abort.clone();
        let result = self.graph.breadth_first_search(
            id,
            starting,
            self.state.color,
            &mut self.surface,
            || abort.is_requested(),
        );
        let aborted = self.finish_fill();
        let visited = result?;
        info!(node = %id, visited = visited.len(), aborted, "fill finished");
        Ok(())
    }

    async fn fill_paced(&mut self, id: NodeId, delay: Duration) -> Result<(), CanvasError> {
        let Some(starting) = self.fill_target(id)? else {
            return Ok(());
        };
        let abort = self.abort.clone();
        let result = self
            .graph
            .breadth_first_search_paced(
                id,
                starting,
                self.state.color,
                delay,
                &mut self.surface,
                || abort.is_requested(),
            )
            .await;
        let aborted = self.finish_fill();
        let visited = result?;
        info!(node = %id, visited = visited.len(), aborted, "paced fill finished");
        Ok(())
    }

    /// Lowers an abort raised while a fill ran, unless erase-all is still the
    /// active tool. Returns whether the fill was aborted.
    fn finish_fill(&mut self) -> bool {
        let aborted = self.abort.is_requested();
        if aborted && self.state.tool != Tool::EraseAll {
            self.abort.clear();
        }
        aborted
    }
}
