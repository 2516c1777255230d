use eframe::egui::{Vec2, vec2};
use rand::Rng;

use crate::config::GridConfig;

/// Floor added to cursor distances so the direction never divides by zero.
const DISTANCE_EPSILON: f32 = 1e-6;
/// Share of the spring pull the cursor force may reach on each axis.
const CURSOR_SPRING_LIMIT: f32 = 0.9;

pub(super) fn spring_accel(target: Vec2, position: Vec2, spring_k: f32) -> Vec2 {
    (target - position) * spring_k / 1000.0
}

pub(super) fn jitter_accel<R: Rng>(rng: &mut R, jitter: f32) -> Vec2 {
    vec2(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * jitter
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct CursorInfluence {
    pub(super) accel: Vec2,
    pub(super) scale: f32,
}

/// Near/far Gaussian kernels around the cursor.
///
/// The near kernel swells the tile and pulls it in; the far kernel, measured
/// past a plateau of `mouse_sigma`, pushes it away. The resulting force is
/// clamped per axis against `spring` so the grid pull always dominates.
pub(super) fn cursor_influence(
    position: Vec2,
    cursor: Vec2,
    spring: Vec2,
    config: &GridConfig,
) -> CursorInfluence {
    let offset = position - cursor;
    let distance_sq = offset.length_sq();
    let distance = distance_sq.sqrt() + DISTANCE_EPSILON;

    let sigma = config.mouse_sigma;
    let far_sigma = config.mouse_far_sigma;
    let near = (-distance_sq / (2.0 * sigma * sigma)).exp();
    let far_term = (distance - sigma).max(0.0);
    let far = (-(far_term * far_term) / (2.0 * far_sigma * far_sigma)).exp();

    let direction = (cursor - position) / distance;
    let magnitude = config.mouse_attract_k * near - config.mouse_repel_k * far;
    let force = direction * magnitude;

    let limit = spring.abs() * CURSOR_SPRING_LIMIT;
    CursorInfluence {
        accel: vec2(
            force.x.clamp(-limit.x, limit.x),
            force.y.clamp(-limit.y, limit.y),
        ),
        scale: config.base_scale * (1.0 + config.mouse_amp * near),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn scale_config() -> GridConfig {
        GridConfig {
            mouse_sigma: 140.0,
            mouse_amp: 0.6,
            base_scale: 0.9,
            ..GridConfig::default()
        }
    }

    #[test]
    fn tile_under_cursor_swells_fully() {
        let config = scale_config();
        let influence = cursor_influence(Vec2::ZERO, Vec2::ZERO, vec2(1.0, 1.0), &config);
        assert!((influence.scale - 1.44).abs() < 1.44 * 0.01);
    }

    #[test]
    fn tile_one_sigma_away_follows_gaussian() {
        let config = scale_config();
        let influence =
            cursor_influence(vec2(140.0, 0.0), Vec2::ZERO, vec2(1.0, 1.0), &config);
        let expected = 0.9 * (1.0 + 0.6 * (-0.5_f32).exp());
        assert!((influence.scale - expected).abs() < expected * 0.01);
        assert!((influence.scale - 1.227).abs() < 1.227 * 0.01);
    }

    #[test]
    fn cursor_force_never_exceeds_spring_share() {
        let config = GridConfig::default();
        let spring = vec2(0.4, -0.05);
        for cursor in [vec2(30.0, 10.0), vec2(-500.0, 300.0), vec2(0.0, 2000.0)] {
            let influence = cursor_influence(Vec2::ZERO, cursor, spring, &config);
            assert!(influence.accel.x.abs() <= spring.x.abs() * CURSOR_SPRING_LIMIT + 1e-6);
            assert!(influence.accel.y.abs() <= spring.y.abs() * CURSOR_SPRING_LIMIT + 1e-6);
        }
    }

    #[test]
    fn zero_spring_means_zero_cursor_force() {
        let config = GridConfig::default();
        let influence = cursor_influence(vec2(10.0, 10.0), Vec2::ZERO, Vec2::ZERO, &config);
        assert_eq!(influence.accel, Vec2::ZERO);
    }

    #[test]
    fn close_cursor_attracts_and_distant_cursor_repels() {
        let config = GridConfig {
            mouse_attract_k: 400.0,
            mouse_repel_k: 1000.0,
            ..GridConfig::default()
        };
        let generous = vec2(1e6, 1e6);

        // near: attract term is weaker than the plateaued repel term
        let near = cursor_influence(vec2(-20.0, 0.0), Vec2::ZERO, generous, &config);
        assert!(near.accel.x < 0.0);

        let attract_only = GridConfig {
            mouse_repel_k: 0.0,
            ..config.clone()
        };
        let pulled = cursor_influence(vec2(-20.0, 0.0), Vec2::ZERO, generous, &attract_only);
        assert!(pulled.accel.x > 0.0);

        let far = cursor_influence(vec2(-900.0, 0.0), Vec2::ZERO, generous, &config);
        assert!(far.accel.x < 0.0);
    }

    #[test]
    fn jitter_stays_within_half_amplitude() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..1000 {
            let jitter = jitter_accel(&mut rng, 2.0);
            assert!(jitter.x.abs() <= 1.0 && jitter.y.abs() <= 1.0);
        }
        assert_eq!(jitter_accel(&mut rng, 0.0), Vec2::ZERO);
    }

    #[test]
    fn spring_points_at_target() {
        let accel = spring_accel(vec2(100.0, -50.0), Vec2::ZERO, 4.0);
        assert_eq!(accel, vec2(0.4, -0.2));
    }
}
