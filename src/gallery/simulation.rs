use eframe::egui::Vec2;
use rand::Rng;
use tracing::{debug, warn};

use super::cursor::CursorField;
use super::edges::build_edges;
use super::layout::{DEFAULT_ASPECT_RATIO, LayoutResult, item_size, solve};
use super::nodes::{Node, build_nodes};
use super::physics::{TickInput, step_nodes};
use crate::config::GridConfig;

/// Owns everything one animated tile grid needs between frames.
///
/// The render driver resizes it, forwards pointer events and calls
/// [`Simulation::step`] once per frame; reads in between see a complete
/// layout, node store and edge set.
pub struct Simulation<R> {
    config: GridConfig,
    viewport: Vec2,
    layout: LayoutResult,
    nodes: Vec<Node>,
    edges: Vec<(usize, usize)>,
    cursor: CursorField,
    clock: f64,
    tile_aspects: Vec<f32>,
    rng: R,
}

impl<R: Rng> Simulation<R> {
    /// Starts with a zero viewport, so the grid stays empty until the first
    /// [`Simulation::resize`].
    pub fn new(config: GridConfig, rng: R) -> Self {
        let viewport = Vec2::ZERO;
        let layout = solve(config.total_items, config.columns_min, viewport, &config);
        let tile_aspects = vec![DEFAULT_ASPECT_RATIO; config.total_items];
        Self {
            config,
            viewport,
            layout,
            nodes: Vec::new(),
            edges: Vec::new(),
            cursor: CursorField::default(),
            clock: 0.0,
            tile_aspects,
            rng,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn cursor(&self) -> CursorField {
        self.cursor
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Rebuilds the grid when the viewport size changed. Returns whether it did.
    pub fn resize(&mut self, viewport: Vec2) -> bool {
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        self.rebuild();
        true
    }

    /// Replaces the tunables and rebuilds when anything that shapes the grid
    /// changed. Force-only changes apply on the next step without a rebuild.
    pub fn set_config(&mut self, config: GridConfig) {
        let relayout = config.total_items != self.config.total_items
            || config.columns_min != self.config.columns_min
            || config.gaps() != self.config.gaps()
            || config.target_area != self.config.target_area
            || config.bounds_padding != self.config.bounds_padding
            || config.drift_freq != self.config.drift_freq
            || config.fixed_cols() != self.config.fixed_cols()
            || config.fixed_rows() != self.config.fixed_rows();

        self.tile_aspects
            .resize(config.total_items, DEFAULT_ASPECT_RATIO);
        self.config = config;
        if relayout {
            self.rebuild();
        }
    }

    /// Recomputes layout, anchors and edges from scratch. Phases are re-rolled.
    pub fn rebuild(&mut self) {
        self.layout = solve(
            self.config.total_items,
            self.config.columns_min,
            self.viewport,
            &self.config,
        );
        self.nodes = build_nodes(
            &self.layout,
            self.config.total_items,
            &self.config,
            &mut self.rng,
        );
        self.edges = build_edges(&self.layout, self.nodes.len());
        debug!(
            columns = self.layout.columns,
            rows = self.layout.rows,
            scale = self.layout.scale,
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "rebuilt tile grid"
        );
    }

    pub fn cursor_moved(&mut self, position: Vec2) {
        self.cursor.moved(position);
    }

    pub fn cursor_left(&mut self) {
        self.cursor.left();
    }

    /// Advances the drift clock by `elapsed_seconds` and runs one tick.
    ///
    /// Integration itself always uses the nominal tick; the elapsed time only
    /// moves the drift oscillators.
    pub fn step(&mut self, elapsed_seconds: f32) {
        if elapsed_seconds.is_finite() && elapsed_seconds > 0.0 {
            self.clock += f64::from(elapsed_seconds);
        }

        let input = TickInput {
            clock: self.clock,
            cursor: self.cursor,
            viewport: self.viewport,
        };
        step_nodes(&mut self.nodes, &self.config, input, &mut self.rng);
    }

    /// Records the real width/height ratio of a tile's image.
    ///
    /// Only the rendered size changes; anchors keep the estimated 3:4 step.
    pub fn set_tile_aspect(&mut self, index: usize, aspect_ratio: f32) {
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            warn!(index, aspect_ratio, "ignoring invalid tile aspect ratio");
            return;
        }
        if let Some(slot) = self.tile_aspects.get_mut(index) {
            *slot = aspect_ratio;
        }
    }

    /// Rendered tile size at layout scale, before the node's own scale.
    pub fn tile_size(&self, index: usize) -> Vec2 {
        let aspect = self
            .tile_aspects
            .get(index)
            .copied()
            .unwrap_or(DEFAULT_ASPECT_RATIO);
        item_size(self.config.target_area, aspect) * self.layout.scale
    }
}
