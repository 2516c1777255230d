mod forces;

use eframe::egui::Vec2;
use rand::Rng;

use super::cursor::CursorField;
use super::nodes::Node;
use crate::config::GridConfig;
use forces::{cursor_influence, jitter_accel, spring_accel};

/// Timestep used to integrate acceleration on every tick, regardless of the
/// real frame time. Position advances by one velocity unit per tick, so the
/// visual speed follows the call cadence.
pub const NOMINAL_TICK_SECS: f32 = 0.016;

/// Per-tick inputs shared by every node.
#[derive(Clone, Copy, Debug)]
pub(super) struct TickInput {
    /// Monotonic clock driving the drift oscillators, in seconds.
    pub(super) clock: f64,
    pub(super) cursor: CursorField,
    pub(super) viewport: Vec2,
}

pub(super) fn step_nodes<R: Rng>(
    nodes: &mut [Node],
    config: &GridConfig,
    input: TickInput,
    rng: &mut R,
) {
    let half = input.viewport / 2.0;
    let padding = config.bounds_padding;
    let retain = 1.0 - config.damping;

    for node in nodes.iter_mut() {
        let target = node.drift_target(config.drift_amp, input.clock);
        let spring = spring_accel(target, node.position, config.spring_k);
        let jitter = jitter_accel(rng, config.jitter_accel);

        let (cursor, scale) = if input.cursor.inside {
            let influence = cursor_influence(node.position, input.cursor.position, spring, config);
            (influence.accel, influence.scale)
        } else {
            (Vec2::ZERO, config.base_scale)
        };

        let accel = spring + jitter + cursor;
        node.velocity = (node.velocity + accel * NOMINAL_TICK_SECS) * retain;
        node.position += node.velocity;

        // max/min instead of clamp: a viewport thinner than twice the padding
        // pins nodes to the low edge rather than panicking
        node.position.x = node.position.x.min(half.x - padding).max(-half.x + padding);
        node.position.y = node.position.y.min(half.y - padding).max(-half.y + padding);
        node.scale = scale;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::super::layout::solve;
    use super::super::nodes::build_nodes;
    use super::*;

    fn grid(config: &GridConfig, viewport: Vec2, seed: u64) -> Vec<Node> {
        let layout = solve(config.total_items, config.columns_min, viewport, config);
        build_nodes(&layout, config.total_items, config, &mut SmallRng::seed_from_u64(seed))
    }

    fn still_config() -> GridConfig {
        GridConfig {
            total_items: 9,
            columns_min: 3,
            jitter_accel: 0.0,
            drift_amp: 0.0,
            ..GridConfig::default()
        }
    }

    #[test]
    fn node_at_rest_on_anchor_stays_put() {
        let config = still_config();
        let viewport = vec2(1400.0, 1400.0);
        let mut nodes = grid(&config, viewport, 2);
        for node in &mut nodes {
            node.position = node.anchor;
        }
        let anchors = nodes.iter().map(|node| node.anchor).collect::<Vec<_>>();

        let mut rng = SmallRng::seed_from_u64(2);
        for tick in 0..600 {
            let input = TickInput {
                clock: f64::from(tick as f32 * NOMINAL_TICK_SECS),
                cursor: CursorField::default(),
                viewport,
            };
            step_nodes(&mut nodes, &config, input, &mut rng);
        }

        for (node, anchor) in nodes.iter().zip(anchors) {
            assert_eq!(node.position, anchor);
            assert_eq!(node.velocity, Vec2::ZERO);
            assert_eq!(node.scale, config.base_scale);
        }
    }

    #[test]
    fn displaced_node_settles_back_to_anchor() {
        let config = still_config();
        let viewport = vec2(1400.0, 1400.0);
        let mut nodes = grid(&config, viewport, 4);
        nodes[0].position = nodes[0].anchor + vec2(30.0, -20.0);

        let mut rng = SmallRng::seed_from_u64(4);
        for tick in 0..20_000 {
            let input = TickInput {
                clock: f64::from(tick as f32 * NOMINAL_TICK_SECS),
                cursor: CursorField::default(),
                viewport,
            };
            step_nodes(&mut nodes, &config, input, &mut rng);
        }

        let offset = nodes[0].position - nodes[0].anchor;
        assert!(offset.length() < 1.0, "still {offset:?} away from anchor");
    }

    #[test]
    fn velocity_keeps_growing_while_pinned_at_boundary() {
        let config = GridConfig {
            drift_amp: 0.0,
            jitter_accel: 0.0,
            bounds_padding: 10.0,
            ..GridConfig::default()
        };
        let viewport = vec2(200.0, 200.0);
        let mut node = Node {
            id: 1,
            column: 0,
            row: 0,
            anchor: vec2(500.0, 0.0),
            position: vec2(90.0, 0.0),
            velocity: Vec2::ZERO,
            scale: config.base_scale,
            phase: Vec2::ZERO,
            speed: Vec2::ZERO,
        };

        let mut rng = SmallRng::seed_from_u64(8);
        let mut previous = 0.0;
        for tick in 0..5 {
            let input = TickInput {
                clock: tick as f64,
                cursor: CursorField::default(),
                viewport,
            };
            step_nodes(std::slice::from_mut(&mut node), &config, input, &mut rng);
            assert_eq!(node.position.x, 90.0);
            assert!(node.velocity.x > previous);
            previous = node.velocity.x;
        }
    }

    #[test]
    fn cursor_inside_swells_and_outside_resets_scale() {
        let config = still_config();
        let viewport = vec2(1400.0, 1400.0);
        let mut nodes = grid(&config, viewport, 6);
        let mut rng = SmallRng::seed_from_u64(6);
        let mut cursor = CursorField::default();
        cursor.moved(nodes[4].position);

        let input = TickInput { clock: 0.0, cursor, viewport };
        step_nodes(&mut nodes, &config, input, &mut rng);
        assert!(nodes[4].scale > config.base_scale);

        cursor.left();
        let input = TickInput { clock: 0.016, cursor, viewport };
        step_nodes(&mut nodes, &config, input, &mut rng);
        assert!(nodes.iter().all(|node| node.scale == config.base_scale));
    }

    #[test]
    fn padding_wider_than_viewport_pins_to_low_edge() {
        let config = GridConfig {
            total_items: 6,
            columns_min: 2,
            bounds_padding: 40.0,
            ..GridConfig::default()
        };
        // 2·padding exceeds the width, so the x bounds invert
        let viewport = vec2(50.0, 1400.0);
        let mut nodes = grid(&config, viewport, 12);
        assert!(!nodes.is_empty());
        let mut rng = SmallRng::seed_from_u64(12);
        let mut cursor = CursorField::default();
        cursor.moved(vec2(5.0, 0.0));

        let low_edge = -viewport.x / 2.0 + config.bounds_padding;
        for tick in 0..30 {
            let input = TickInput {
                clock: f64::from(tick as f32 * NOMINAL_TICK_SECS),
                cursor,
                viewport,
            };
            step_nodes(&mut nodes, &config, input, &mut rng);
            for node in &nodes {
                assert_eq!(node.position.x, low_edge);
                assert!(node.position.y.abs() <= viewport.y / 2.0 - config.bounds_padding);
            }
        }
    }

    #[test]
    fn same_seed_gives_same_trajectory() {
        let config = GridConfig {
            total_items: 20,
            columns_min: 5,
            ..GridConfig::default()
        };
        let viewport = vec2(1600.0, 1200.0);
        let run = || {
            let mut nodes = grid(&config, viewport, 77);
            let mut rng = SmallRng::seed_from_u64(78);
            let mut cursor = CursorField::default();
            cursor.moved(vec2(40.0, -30.0));
            for tick in 0..240 {
                let input = TickInput {
                    clock: tick as f64 / 60.0,
                    cursor,
                    viewport,
                };
                step_nodes(&mut nodes, &config, input, &mut rng);
            }
            nodes
        };

        assert_eq!(run(), run());
    }

    proptest! {
        #[test]
        fn positions_never_leave_padded_viewport(
            seed in any::<u64>(),
            width in 200.0f32..2400.0,
            height in 200.0f32..1600.0,
            items in 1usize..60,
            cursor_x in -1500.0f32..1500.0,
            cursor_y in -1000.0f32..1000.0,
            jitter in 0.0f32..40.0,
            ticks in 1usize..200,
        ) {
            let config = GridConfig {
                total_items: items,
                columns_min: 3,
                jitter_accel: jitter,
                ..GridConfig::default()
            };
            let viewport = vec2(width, height);
            let mut nodes = grid(&config, viewport, seed);
            let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);
            let mut cursor = CursorField::default();
            cursor.moved(vec2(cursor_x, cursor_y));

            let half = viewport / 2.0;
            let padding = config.bounds_padding;
            for tick in 0..ticks {
                let input = TickInput {
                    clock: f64::from(tick as f32 * NOMINAL_TICK_SECS),
                    cursor,
                    viewport,
                };
                step_nodes(&mut nodes, &config, input, &mut rng);
                for node in &nodes {
                    prop_assert!(node.position.x.abs() <= half.x - padding);
                    prop_assert!(node.position.y.abs() <= half.y - padding);
                }
            }
        }
    }
}
