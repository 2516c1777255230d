use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};
use rand::Rng;

use super::layout::LayoutResult;
use crate::config::GridConfig;

/// Half-width of the cosmetic scatter applied to fresh positions, in px.
const INITIAL_SCATTER_PX: f32 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// 1-based tile number.
    pub id: usize,
    pub column: usize,
    pub row: usize,
    pub anchor: Vec2,
    pub position: Vec2,
    pub velocity: Vec2,
    pub scale: f32,
    /// Drift oscillator phase per axis, in radians.
    pub phase: Vec2,
    /// Drift angular speed per axis, in rad/s.
    pub speed: Vec2,
}

impl Node {
    /// Anchor displaced by this node's drift oscillation at `clock` seconds.
    pub fn drift_target(&self, drift_amp: f32, clock: f64) -> Vec2 {
        self.anchor
            + vec2(
                drift_angle(self.phase.x, self.speed.x, clock).sin(),
                drift_angle(self.phase.y, self.speed.y, clock).cos(),
            ) * drift_amp
    }
}

/// Oscillator angle reduced to `[0, TAU)` before narrowing, so long-running
/// clocks keep their sub-second resolution.
fn drift_angle(phase: f32, speed: f32, clock: f64) -> f32 {
    (f64::from(phase) + f64::from(speed) * clock).rem_euclid(std::f64::consts::TAU) as f32
}

pub(super) fn build_nodes<R: Rng>(
    layout: &LayoutResult,
    total_items: usize,
    config: &GridConfig,
    rng: &mut R,
) -> Vec<Node> {
    if layout.is_empty() {
        return Vec::new();
    }

    let angular_base = config.drift_freq * TAU;
    (0..total_items)
        .map(|index| {
            let (column, row) = layout.cell(index);
            let anchor = layout.anchor(index);
            let scatter = vec2(
                rng.random_range(-INITIAL_SCATTER_PX..=INITIAL_SCATTER_PX),
                rng.random_range(-INITIAL_SCATTER_PX..=INITIAL_SCATTER_PX),
            );
            let phase = vec2(rng.random_range(0.0..TAU), rng.random_range(0.0..TAU));
            let speed = vec2(
                rng.random_range(0.5..1.5) * angular_base,
                rng.random_range(0.5..1.5) * angular_base,
            );

            Node {
                id: index + 1,
                column,
                row,
                anchor,
                position: anchor + scatter,
                velocity: Vec2::ZERO,
                scale: config.base_scale,
                phase,
                speed,
            }
        })
        .collect()
}
