use std::collections::VecDeque;

use eframe::egui::{self, Context};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;

use crate::config::GridConfig;
use crate::gallery::Simulation;
use crate::util::placeholder_aspect;

mod render_utils;
mod ui;
mod view;

pub struct TileMeshApp {
    simulation: Simulation<SmallRng>,
    /// Slider-edited copy of the tunables, pushed into the simulation on change.
    draft: GridConfig,
    initial_config: GridConfig,
    live_physics: bool,
    show_edges: bool,
    show_fps_bar: bool,
    fps_show_average: bool,
    fps_show_frame_time: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
    hovered_tile: Option<usize>,
    draw_order: Vec<usize>,
}

impl TileMeshApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: GridConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                info!(seed, "using fixed random seed");
                SmallRng::seed_from_u64(seed)
            }
            None => SmallRng::from_os_rng(),
        };

        let mut app = Self {
            simulation: Simulation::new(config.clone(), rng),
            draft: config.clone(),
            initial_config: config,
            live_physics: true,
            show_edges: true,
            show_fps_bar: true,
            fps_show_average: true,
            fps_show_frame_time: false,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
            hovered_tile: None,
            draw_order: Vec::new(),
        };
        app.assign_placeholder_aspects();
        app
    }

    /// Gives every tile a stable photo-like ratio, standing in for the
    /// ratios real images would report once decoded.
    fn assign_placeholder_aspects(&mut self) {
        for index in 0..self.simulation.config().total_items {
            self.simulation
                .set_tile_aspect(index, placeholder_aspect(index + 1));
        }
    }

    fn apply_draft(&mut self) {
        let grew = self.draft.total_items > self.simulation.config().total_items;
        self.simulation.set_config(self.draft.clone());
        if grew {
            self.assign_placeholder_aspects();
        }
    }
}

impl eframe::App for TileMeshApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| self.draw_header(ui));

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.draw_controls(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| self.draw_gallery(ui));
    }
}
