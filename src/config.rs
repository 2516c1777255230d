use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use eframe::egui::{Vec2, vec2};
use serde::{Deserialize, Serialize};

/// Tunables for the tile grid and its motion model.
///
/// Field names double as the keys of the JSON config file. Missing keys keep
/// their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub total_items: usize,
    pub columns_min: usize,
    /// Shared spacing used when `gap_x`/`gap_y` are not set.
    pub gap: f32,
    pub gap_x: Option<f32>,
    pub gap_y: Option<f32>,
    /// Rendered area of a tile at scale 1, in px².
    pub target_area: f32,
    pub base_scale: f32,
    pub mouse_sigma: f32,
    pub mouse_amp: f32,
    pub mouse_attract_k: f32,
    pub mouse_repel_k: f32,
    pub mouse_far_sigma: f32,
    pub spring_k: f32,
    pub damping: f32,
    pub jitter_accel: f32,
    pub bounds_padding: f32,
    pub drift_amp: f32,
    /// Drift frequency in Hz.
    pub drift_freq: f32,
    pub fixed_cols: Option<usize>,
    pub fixed_rows: Option<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            total_items: 136,
            columns_min: 17,
            gap: 72.0,
            gap_x: None,
            gap_y: None,
            target_area: 240.0 * 240.0,
            base_scale: 0.9,
            mouse_sigma: 140.0,
            mouse_amp: 0.6,
            mouse_attract_k: 400.0,
            mouse_repel_k: 1000.0,
            mouse_far_sigma: 700.0,
            spring_k: 4.0,
            damping: 0.2,
            jitter_accel: 1.0,
            bounds_padding: 40.0,
            drift_amp: 25.0,
            drift_freq: 0.08,
            fixed_cols: None,
            fixed_rows: None,
        }
    }
}

impl GridConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_json(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("invalid JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns_min == 0 {
            bail!("columns_min must be at least 1");
        }

        let finite = [
            ("gap", self.gap),
            ("gap_x", self.gap_x.unwrap_or(0.0)),
            ("gap_y", self.gap_y.unwrap_or(0.0)),
            ("target_area", self.target_area),
            ("base_scale", self.base_scale),
            ("mouse_sigma", self.mouse_sigma),
            ("mouse_amp", self.mouse_amp),
            ("mouse_attract_k", self.mouse_attract_k),
            ("mouse_repel_k", self.mouse_repel_k),
            ("mouse_far_sigma", self.mouse_far_sigma),
            ("spring_k", self.spring_k),
            ("damping", self.damping),
            ("jitter_accel", self.jitter_accel),
            ("bounds_padding", self.bounds_padding),
            ("drift_amp", self.drift_amp),
            ("drift_freq", self.drift_freq),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                bail!("{name} must be a finite number, got {value}");
            }
        }

        for (name, value) in [
            ("target_area", self.target_area),
            ("mouse_sigma", self.mouse_sigma),
            ("mouse_far_sigma", self.mouse_far_sigma),
        ] {
            if value <= 0.0 {
                bail!("{name} must be positive, got {value}");
            }
        }

        let gaps = self.gaps();
        for (name, value) in [
            ("gap_x", gaps.x),
            ("gap_y", gaps.y),
            ("jitter_accel", self.jitter_accel),
            ("bounds_padding", self.bounds_padding),
            ("drift_amp", self.drift_amp),
            ("drift_freq", self.drift_freq),
        ] {
            if value < 0.0 {
                bail!("{name} must not be negative, got {value}");
            }
        }

        if !(0.0..1.0).contains(&self.damping) {
            bail!("damping must be in [0, 1), got {}", self.damping);
        }

        Ok(())
    }

    /// Horizontal and vertical spacing, falling back to the shared `gap`.
    pub fn gaps(&self) -> Vec2 {
        vec2(
            self.gap_x.unwrap_or(self.gap),
            self.gap_y.unwrap_or(self.gap),
        )
    }

    pub fn fixed_cols(&self) -> Option<usize> {
        self.fixed_cols.filter(|&cols| cols > 0)
    }

    pub fn fixed_rows(&self) -> Option<usize> {
        self.fixed_rows.filter(|&rows| rows > 0)
    }
}
