use eframe::egui::ecolor::Hsva;
use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2};

use crate::util::stable_pair;

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(11, 14, 24));
}

/// Simulation space is centered on the canvas, one unit per point.
pub(super) fn world_to_screen(rect: Rect, world: Vec2) -> Pos2 {
    rect.center() + world
}

pub(super) fn screen_to_world(rect: Rect, screen: Pos2) -> Vec2 {
    screen - rect.center()
}

pub(super) fn segment_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let bounds = Rect::from_two_pos(start, end).expand(padding);
    rect.intersects(bounds)
}

pub(super) fn tile_color(tile_id: usize) -> Color32 {
    let (hue, tone) = stable_pair(&tile_id);
    let hue = (hue + 1.0) * 0.5;
    let value = 0.55 + (tone + 1.0) * 0.1;
    Color32::from(Hsva::new(hue, 0.42, value, 1.0))
}

pub(super) fn lighten(color: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let lift = |channel: u8| channel as f32 + (255.0 - channel as f32) * amount;
    Color32::from_rgba_unmultiplied(
        lift(color.r()) as u8,
        lift(color.g()) as u8,
        lift(color.b()) as u8,
        color.a(),
    )
}
