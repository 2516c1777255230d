use std::ops::RangeInclusive;

use eframe::egui::{self, Key, Response, Ui};

use super::super::TileMeshApp;

const SLIDER_KEY_BASE_RATE: f32 = 10.0;
const SLIDER_KEY_ACCEL_PER_SEC: f32 = 9.0;
const SLIDER_KEY_ACCEL_MAX: f32 = 40.0;

#[derive(Clone, Copy, Default)]
struct SliderKeyHoldState {
    positive_secs: f32,
    negative_secs: f32,
}

fn slider_key_accel_multiplier(hold_secs: f32) -> f32 {
    let ramp = hold_secs * SLIDER_KEY_ACCEL_PER_SEC;
    (1.0 + ramp + ramp * ramp * 0.15).min(SLIDER_KEY_ACCEL_MAX)
}

fn default_slider_key_step(min: f32, max: f32) -> f32 {
    ((max - min) / 200.0).max(0.0005)
}

/// Advances the hold timers for a focused slider and returns the signed
/// distance the value should travel this frame, in units of `step`.
fn slider_key_travel(ui: &Ui, response: &Response, step: f32) -> Option<f32> {
    let state_id = response.id.with("arrow_key_hold_state");
    let mut hold_state = ui.ctx().data(|data| {
        data.get_temp::<SliderKeyHoldState>(state_id)
            .unwrap_or_default()
    });

    if !response.has_focus() {
        ui.ctx()
            .data_mut(|data| data.insert_temp(state_id, SliderKeyHoldState::default()));
        return None;
    }

    let (delta_time, increase_down, decrease_down) = ui.input(|input| {
        (
            input.stable_dt.min(0.1),
            input.key_down(Key::ArrowRight) || input.key_down(Key::ArrowUp),
            input.key_down(Key::ArrowLeft) || input.key_down(Key::ArrowDown),
        )
    });

    hold_state.positive_secs = if increase_down {
        hold_state.positive_secs + delta_time
    } else {
        0.0
    };
    hold_state.negative_secs = if decrease_down {
        hold_state.negative_secs + delta_time
    } else {
        0.0
    };

    let direction = (increase_down as i8) - (decrease_down as i8);
    let travel = if direction == 0 {
        None
    } else {
        let hold_secs = if direction > 0 {
            hold_state.positive_secs
        } else {
            hold_state.negative_secs
        };
        let speed = SLIDER_KEY_BASE_RATE * slider_key_accel_multiplier(hold_secs);
        ui.ctx().request_repaint();
        Some(direction as f32 * step * speed * delta_time)
    };

    ui.ctx()
        .data_mut(|data| data.insert_temp(state_id, hold_state));
    travel
}

fn apply_slider_arrow_acceleration_usize(
    ui: &Ui,
    response: &Response,
    value: &mut usize,
    range: RangeInclusive<usize>,
) -> bool {
    let carry_id = response.id.with("arrow_key_integer_carry");
    let Some(travel) = slider_key_travel(ui, response, 1.0) else {
        ui.ctx().data_mut(|data| data.remove::<f32>(carry_id));
        return false;
    };

    let mut carry = ui.ctx().data(|data| data.get_temp::<f32>(carry_id)).unwrap_or(0.0) + travel;
    let whole_delta = carry.trunc() as isize;
    carry -= whole_delta as f32;
    ui.ctx().data_mut(|data| data.insert_temp(carry_id, carry));

    let old_value = *value;
    if whole_delta != 0 {
        *value = (*value as isize + whole_delta)
            .clamp(*range.start() as isize, *range.end() as isize) as usize;
    }
    *value != old_value
}

fn tunable_slider(
    ui: &mut Ui,
    value: &mut f32,
    range: RangeInclusive<f32>,
    text: &str,
    hover: &str,
) -> bool {
    let (min, max) = (*range.start(), *range.end());
    let response = ui
        .add(
            egui::Slider::new(value, range)
                .text(text)
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text(hover);
    if response.hovered() {
        response.request_focus();
    }

    let mut changed = response.changed();
    if let Some(travel) = slider_key_travel(ui, &response, default_slider_key_step(min, max)) {
        let old_value = *value;
        *value = (*value + travel).clamp(min, max);
        changed |= (*value - old_value).abs() > f32::EPSILON;
    }
    changed
}

fn count_slider(
    ui: &mut Ui,
    value: &mut usize,
    range: RangeInclusive<usize>,
    text: &str,
    hover: &str,
) -> bool {
    let response = ui
        .add(egui::Slider::new(value, range.clone()).text(text))
        .on_hover_text(hover);
    if response.hovered() {
        response.request_focus();
    }
    let changed = response.changed();
    changed | apply_slider_arrow_acceleration_usize(ui, &response, value, range)
}

impl TileMeshApp {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Grid Controls");
        ui.separator();
        ui.add_space(4.0);

        let mut changed = false;

        ui.collapsing("Layout", |ui| {
            changed |= count_slider(
                ui,
                &mut self.draft.total_items,
                1..=400,
                "Tiles",
                "Number of tiles laid out on the grid.",
            );
            changed |= count_slider(
                ui,
                &mut self.draft.columns_min,
                1..=40,
                "Minimum columns",
                "Fewest columns the solver may choose.",
            );
            changed |= tunable_slider(
                ui,
                &mut self.draft.gap,
                0.0..=240.0,
                "Gap",
                "Spacing between neighboring cells before scaling.",
            );

            let mut tile_side = self.draft.target_area.sqrt();
            if tunable_slider(
                ui,
                &mut tile_side,
                40.0..=480.0,
                "Tile size",
                "Side of a square tile with the target area.",
            ) {
                self.draft.target_area = tile_side * tile_side;
                changed = true;
            }

            changed |= tunable_slider(
                ui,
                &mut self.draft.bounds_padding,
                0.0..=200.0,
                "Edge padding",
                "How far from the viewport edge tile centers are held.",
            );
        })
        .header_response
        .on_hover_text("Changing these rebuilds the grid.");

        ui.collapsing("Motion", |ui| {
            changed |= tunable_slider(
                ui,
                &mut self.draft.base_scale,
                0.3..=1.5,
                "Base scale",
                "Tile scale away from the cursor.",
            );
            changed |= tunable_slider(
                ui,
                &mut self.draft.spring_k,
                0.0..=10.0,
                "Spring",
                "Pull toward each tile's drifting target.",
            );
            changed |= tunable_slider(
                ui,
                &mut self.draft.damping,
                0.0..=0.95,
                "Damping",
                "Fraction of velocity lost per nominal frame.",
            );
            changed |= tunable_slider(
                ui,
                &mut self.draft.jitter_accel,
                0.0..=200.0,
                "Jitter",
                "Strength of the random nudges.",
            );
            changed |= tunable_slider(
                ui,
                &mut self.draft.drift_amp,
                0.0..=120.0,
                "Drift amplitude",
                "Radius of the slow wander around each anchor.",
            );
            changed |= tunable_slider(
                ui,
                &mut self.draft.drift_freq,
                0.0..=1.0,
                "Drift frequency",
                "Mean wander speed in cycles per second.",
            );
        });

        ui.collapsing("Cursor", |ui| {
            changed |= tunable_slider(
                ui,
                &mut self.draft.mouse_sigma,
                10.0..=600.0,
                "Swell radius",
                "Falloff of the scale boost around the cursor.",
            );
            changed |= tunable_slider(
                ui,
                &mut self.draft.mouse_amp,
                0.0..=2.0,
                "Swell amount",
                "Extra scale for the tile right under the cursor.",
            );
            changed |= tunable_slider(
                ui,
                &mut self.draft.mouse_attract_k,
                0.0..=3000.0,
                "Attract",
                "Pull toward the cursor on tiles inside the swell radius.",
            );
            changed |= tunable_slider(
                ui,
                &mut self.draft.mouse_repel_k,
                0.0..=3000.0,
                "Repel",
                "Push away from the cursor, fading past the swell radius.",
            );
            changed |= tunable_slider(
                ui,
                &mut self.draft.mouse_far_sigma,
                50.0..=2000.0,
                "Repel radius",
                "Falloff of the repulsion beyond the swell radius.",
            );
        });

        if changed {
            self.apply_draft();
        }

        ui.separator();

        ui.checkbox(&mut self.live_physics, "Live physics simulation")
            .on_hover_text("Advance the simulation every frame.");
        ui.checkbox(&mut self.show_edges, "Show edges")
            .on_hover_text("Draw the links between neighboring tiles.");
        ui.checkbox(&mut self.show_fps_bar, "FPS Display")
            .on_hover_text("Show a live FPS readout in the header.");

        ui.collapsing("FPS Display tuning", |ui| {
            ui.add_enabled_ui(self.show_fps_bar, |ui| {
                ui.checkbox(&mut self.fps_show_average, "Show average FPS")
                    .on_hover_text("Display the running average FPS over recent samples.");
                ui.checkbox(&mut self.fps_show_frame_time, "Show frame time")
                    .on_hover_text("Display frame duration in milliseconds.");
            });
        });

        ui.separator();

        ui.horizontal(|ui| {
            if ui
                .button("Rebuild grid")
                .on_hover_text("Re-solve the layout and re-seed every tile.")
                .clicked()
            {
                self.simulation.rebuild();
            }
            if ui
                .button("Reset tunables")
                .on_hover_text("Restore the values the app started with.")
                .clicked()
            {
                self.draft = self.initial_config.clone();
                self.apply_draft();
            }
        });
    }
}
