use eframe::egui::{Align, Layout, Ui};

use super::super::TileMeshApp;

impl TileMeshApp {
    pub(in crate::app) fn draw_header(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("tile-mesh");
            ui.separator();
            ui.label(self.grid_summary_text());

            let viewport = self.simulation.viewport();
            ui.label(format!(
                "viewport {:.0}×{:.0}  |  t {:.1}s",
                viewport.x,
                viewport.y,
                self.simulation.clock()
            ));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if let Some(fps_text) = self.fps_display_text() {
                    ui.label(fps_text);
                }
                let cursor = self.simulation.cursor();
                if cursor.inside {
                    ui.label(format!(
                        "cursor {:.0}, {:.0}",
                        cursor.position.x, cursor.position.y
                    ));
                }
            });
        });
    }
}
