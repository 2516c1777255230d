use eframe::egui::Context;

use super::super::TileMeshApp;

const FPS_SAMPLE_WINDOW: usize = 180;

impl TileMeshApp {
    pub(in crate::app) fn update_fps_counter(&mut self, ctx: &Context) {
        let dt = ctx.input(|input| input.stable_dt);
        if dt <= f32::EPSILON {
            return;
        }

        self.fps_current = (1.0 / dt).clamp(0.0, 1000.0);
        self.fps_samples.push_back(self.fps_current);
        while self.fps_samples.len() > FPS_SAMPLE_WINDOW {
            self.fps_samples.pop_front();
        }
    }

    pub(in crate::app) fn fps_display_text(&self) -> Option<String> {
        if !self.show_fps_bar {
            return None;
        }

        let mut parts = vec![format!("FPS {:.0}", self.fps_current)];

        if self.fps_show_average && !self.fps_samples.is_empty() {
            let avg = self.fps_samples.iter().sum::<f32>() / self.fps_samples.len() as f32;
            parts.push(format!("avg {avg:.1}"));
        }

        if self.fps_show_frame_time && self.fps_current > f32::EPSILON {
            parts.push(format!("{:.1} ms", 1000.0 / self.fps_current));
        }

        Some(parts.join(" | "))
    }

    pub(in crate::app) fn grid_summary_text(&self) -> String {
        let layout = self.simulation.layout();
        let mut text = format!(
            "grid {}×{}  |  scale {:.2}  |  {} tiles / {} edges",
            layout.columns,
            layout.rows,
            layout.scale,
            self.simulation.nodes().len(),
            self.simulation.edges().len()
        );
        if let Some(index) = self.hovered_tile
            && let Some(node) = self.simulation.nodes().get(index)
        {
            text.push_str(&format!("  |  hover #{}", node.id));
        }
        text
    }
}
