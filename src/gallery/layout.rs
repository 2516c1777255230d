use eframe::egui::{Vec2, vec2};
use serde::Serialize;
use tracing::debug;

use crate::config::GridConfig;

/// Width/height ratio used to size the grid before real image ratios are known.
pub const DEFAULT_ASPECT_RATIO: f32 = 3.0 / 4.0;

const MIN_SCALE: f32 = 0.35;
const MAX_SCALE: f32 = 1.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutResult {
    pub columns: usize,
    pub rows: usize,
    pub scale: f32,
    pub step_x: f32,
    pub step_y: f32,
    /// Anchor of the top-left cell, relative to the viewport center.
    pub origin_x: f32,
    pub origin_y: f32,
    /// Estimated tile size at scale 1.
    pub item_width: f32,
    pub item_height: f32,
}

impl LayoutResult {
    fn empty(item_size: Vec2) -> Self {
        Self {
            columns: 0,
            rows: 0,
            scale: MAX_SCALE,
            step_x: 0.0,
            step_y: 0.0,
            origin_x: 0.0,
            origin_y: 0.0,
            item_width: item_size.x,
            item_height: item_size.y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    pub fn step(&self) -> Vec2 {
        vec2(self.step_x, self.step_y)
    }

    pub fn origin(&self) -> Vec2 {
        vec2(self.origin_x, self.origin_y)
    }

    /// Grid cell of the item at `index`, as `(column, row)`.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        if self.columns == 0 {
            return (0, 0);
        }
        (index % self.columns, index / self.columns)
    }

    pub fn anchor(&self, index: usize) -> Vec2 {
        let (column, row) = self.cell(index);
        self.origin() + self.step() * vec2(column as f32, row as f32)
    }
}

/// Tile size at scale 1 for a width/height ratio, keeping `target_area`.
pub fn item_size(target_area: f32, aspect_ratio: f32) -> Vec2 {
    vec2(
        (target_area * aspect_ratio).sqrt(),
        (target_area / aspect_ratio).sqrt(),
    )
}

pub fn solve(
    total_items: usize,
    columns_min: usize,
    viewport: Vec2,
    config: &GridConfig,
) -> LayoutResult {
    let item = item_size(config.target_area, DEFAULT_ASPECT_RATIO);
    let viewport_usable = viewport.x.is_finite()
        && viewport.y.is_finite()
        && viewport.x > 0.0
        && viewport.y > 0.0;
    if total_items == 0 || !viewport_usable {
        debug!(total_items, ?viewport, "degenerate layout input");
        return LayoutResult::empty(item);
    }

    let columns_min = columns_min.max(1);
    let gaps = config.gaps();
    let padding = config.bounds_padding;
    let available_height = viewport.y - padding * 2.0;
    let grid_height =
        |rows: usize| rows as f32 * (item.y + gaps.y) - gaps.y;

    let fitting_cols = ((viewport.x - padding * 2.0 + gaps.x) / (item.x + gaps.x)).floor();
    let max_cols = columns_min.max(fitting_cols.max(0.0) as usize);

    let columns = match config.fixed_cols() {
        Some(cols) => cols,
        None => (columns_min..=max_cols)
            .rev()
            .find(|&cols| grid_height(total_items.div_ceil(cols)) <= available_height)
            .unwrap_or(max_cols),
    };
    let rows = config
        .fixed_rows()
        .unwrap_or_else(|| total_items.div_ceil(columns));

    let mut scale = MAX_SCALE;
    if grid_height(rows) > available_height {
        scale = ((available_height + gaps.y) / (rows as f32 * (item.y + gaps.y)))
            .clamp(MIN_SCALE, MAX_SCALE);
        debug!(rows, available_height, scale, "grid exceeds viewport height, shrinking");
    }

    let step = (item + gaps) * scale;
    let origin = -vec2(
        (columns - 1) as f32 * step.x,
        (rows - 1) as f32 * step.y,
    ) / 2.0;

    debug!(columns, rows, scale, "solved grid layout");

    LayoutResult {
        columns,
        rows,
        scale,
        step_x: step.x,
        step_y: step.y,
        origin_x: origin.x,
        origin_y: origin.y,
        item_width: item.x,
        item_height: item.y,
    }
}
