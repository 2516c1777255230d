use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, StrokeKind, Ui, vec2};

use super::TileMeshApp;
use super::render_utils::{
    draw_background, lighten, screen_to_world, segment_visible, tile_color, world_to_screen,
};

// white at 35% opacity
const EDGE_COLOR: Color32 = Color32::from_rgba_premultiplied(89, 89, 89, 89);
const EDGE_WIDTH: f32 = 1.25;
const TILE_ROUNDING: f32 = 6.0;

impl TileMeshApp {
    pub(in crate::app) fn draw_gallery(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        self.simulation.resize(rect.size());

        let pointer = response.hover_pos();
        match pointer {
            Some(pointer) => self.simulation.cursor_moved(screen_to_world(rect, pointer)),
            None => self.simulation.cursor_left(),
        }

        if self.live_physics {
            let elapsed = ui.input(|input| input.stable_dt);
            self.simulation.step(elapsed);
            ui.ctx().request_repaint();
        }

        let nodes = self.simulation.nodes();

        if self.show_edges {
            let stroke = Stroke::new(EDGE_WIDTH, EDGE_COLOR);
            for &(from, to) in self.simulation.edges() {
                let (Some(a), Some(b)) = (nodes.get(from), nodes.get(to)) else {
                    continue;
                };
                let start = world_to_screen(rect, a.position);
                let end = world_to_screen(rect, b.position);
                if segment_visible(rect, start, end, EDGE_WIDTH) {
                    painter.line_segment([start, end], stroke);
                }
            }
        }

        // swollen tiles paint last so they sit above their neighbors
        self.draw_order.clear();
        self.draw_order.extend(0..nodes.len());
        self.draw_order
            .sort_by(|&a, &b| nodes[a].scale.total_cmp(&nodes[b].scale));

        let mut hovered = None;
        for &index in &self.draw_order {
            let node = &nodes[index];
            let size = self.simulation.tile_size(index) * node.scale;
            let tile = Rect::from_center_size(world_to_screen(rect, node.position), size);
            if !rect.intersects(tile) {
                continue;
            }

            if pointer.is_some_and(|pointer| tile.contains(pointer)) {
                hovered = Some(index);
            }

            let fill = tile_color(node.id);
            painter.rect_filled(tile, TILE_ROUNDING, fill);
            painter.rect_stroke(
                tile,
                TILE_ROUNDING,
                Stroke::new(1.0, lighten(fill, 0.45)),
                StrokeKind::Inside,
            );
            if size.y > 28.0 {
                painter.text(
                    tile.center_bottom() - vec2(0.0, 6.0),
                    Align2::CENTER_BOTTOM,
                    node.id.to_string(),
                    FontId::proportional((size.y * 0.08).clamp(9.0, 16.0)),
                    Color32::from_white_alpha(200),
                );
            }
        }

        // the topmost tile under the pointer wins; it painted last
        if let Some(index) = hovered {
            let node = &nodes[index];
            let size = self.simulation.tile_size(index) * node.scale;
            let tile = Rect::from_center_size(world_to_screen(rect, node.position), size);
            painter.rect_stroke(
                tile,
                TILE_ROUNDING,
                Stroke::new(2.0, Color32::from_rgb(245, 206, 93)),
                StrokeKind::Outside,
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!(
                    "tile {}  |  cell {}, {}  |  scale {:.2}",
                    node.id, node.column, node.row, node.scale
                ),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }
        self.hovered_tile = hovered;

        if nodes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No tiles fit this viewport.",
                FontId::proportional(14.0),
                Color32::from_gray(200),
            );
        }
    }
}
