//! Bottom bar with the primary controls.
//!
//! Left to right: play/pause, scene switch, then either the tour speed dots
//! with the trail toggle or the asteroid sliders, and rewind on the far right.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::approach::{
    ImpactControls, MAX_DIAMETER_M, MAX_SPEED_KM_S, MIN_DIAMETER_M, MIN_SPEED_KM_S, RewindEvent,
};
use crate::render::OrbitTrailSettings;
use crate::types::{SimulationTime, ViewMode};
use crate::ui::icons;

/// Colors for the dock UI.
pub(super) mod colors {
    use bevy_egui::egui::Color32;

    pub const DOCK_BG: Color32 = Color32::from_rgba_premultiplied(26, 26, 36, 240);
    pub const ACTIVE: Color32 = Color32::from_rgb(85, 221, 136);
    pub const INACTIVE: Color32 = Color32::from_rgb(120, 120, 130);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}

const DOCK_HEIGHT: f32 = 56.0;

/// Tour time scales offered as speed dots.
pub(super) const TOUR_SPEEDS: [f64; 4] = [1.0, 5.0, 20.0, 100.0];

pub fn dock_system(
    mut contexts: EguiContexts,
    mut sim_time: ResMut<SimulationTime>,
    mut mode: ResMut<ViewMode>,
    mut controls: ResMut<ImpactControls>,
    mut trails: ResMut<OrbitTrailSettings>,
    mut rewind_events: MessageWriter<RewindEvent>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("dock")
        .exact_height(DOCK_HEIGHT)
        .frame(
            egui::Frame::new()
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::symmetric(20, 10)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 16.0;

                render_play_pause(ui, &mut sim_time);
                ui.separator();

                if let Some(next) = render_view_switch(ui, *mode) {
                    super::switch_view(next, &mut mode, &mut sim_time, &mut rewind_events);
                }
                ui.separator();

                match *mode {
                    ViewMode::Tour => {
                        render_speed_dots(ui, &mut sim_time);
                        render_trail_toggle(ui, &mut trails);
                    }
                    ViewMode::Impact => render_impact_sliders(ui, &mut controls),
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if render_rewind_button(ui) {
                        rewind_events.write(RewindEvent);
                    }
                    ui.label(
                        egui::RichText::new(format!("t = {:.1}", sim_time.elapsed()))
                            .monospace()
                            .size(14.0)
                            .color(colors::TEXT),
                    );
                });
            });
        });
}

fn render_play_pause(ui: &mut egui::Ui, sim_time: &mut SimulationTime) {
    let (icon, color, tooltip) = if sim_time.paused {
        (icons::PLAY, colors::PLAY_ICON, "Play (Space)")
    } else {
        (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)")
    };

    let button = egui::Button::new(egui::RichText::new(icon).size(22.0).color(color))
        .min_size(egui::vec2(40.0, 36.0));

    if ui.add(button).on_hover_text(tooltip).clicked() {
        sim_time.paused = !sim_time.paused;
    }
}

/// Returns the newly picked view, if the user switched.
fn render_view_switch(ui: &mut egui::Ui, current: ViewMode) -> Option<ViewMode> {
    let mut picked = None;
    for (view, icon) in [(ViewMode::Tour, icons::SUN), (ViewMode::Impact, icons::ASTEROID)] {
        let active = view == current;
        let color = if active { colors::ACTIVE } else { colors::INACTIVE };
        let text = egui::RichText::new(format!("{icon} {}", view.label()))
            .size(14.0)
            .color(color);

        if ui
            .add(egui::Button::new(text).frame(active))
            .on_hover_text("Switch scene (Tab)")
            .clicked()
            && !active
        {
            picked = Some(view);
        }
    }
    picked
}

fn render_speed_dots(ui: &mut egui::Ui, sim_time: &mut SimulationTime) {
    let current_index = TOUR_SPEEDS
        .iter()
        .position(|&s| (sim_time.scale - s).abs() < 0.01);

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        for (i, &speed) in TOUR_SPEEDS.iter().enumerate() {
            let is_active = current_index == Some(i);
            let color = if is_active { colors::ACTIVE } else { colors::INACTIVE };

            let mut text = egui::RichText::new(format!("{speed}x")).size(14.0).color(color);
            if is_active {
                text = text.strong();
            }

            if ui
                .add(
                    egui::Button::new(text)
                        .frame(is_active)
                        .min_size(egui::vec2(40.0, 28.0)),
                )
                .on_hover_text(format!("{speed}x speed (press {})", i + 1))
                .clicked()
            {
                sim_time.scale = speed;
            }
        }
    });
}

fn render_trail_toggle(ui: &mut egui::Ui, trails: &mut OrbitTrailSettings) {
    let color = if trails.visible {
        colors::ACTIVE
    } else {
        colors::INACTIVE
    };
    let text = egui::RichText::new(format!("{} Orbits", icons::PLANET))
        .size(14.0)
        .color(color);
    if ui
        .add(egui::Button::new(text).frame(trails.visible))
        .on_hover_text("Show orbit trails (O)")
        .clicked()
    {
        trails.visible = !trails.visible;
    }
}

fn render_impact_sliders(ui: &mut egui::Ui, controls: &mut ImpactControls) {
    ui.add(
        egui::Slider::new(&mut controls.diameter_m, MIN_DIAMETER_M..=MAX_DIAMETER_M)
            .logarithmic(true)
            .suffix(" m")
            .text("Diameter"),
    );
    ui.add(
        egui::Slider::new(
            &mut controls.closing_speed_km_s,
            MIN_SPEED_KM_S..=MAX_SPEED_KM_S,
        )
        .suffix(" km/s")
        .text("Speed"),
    );
    ui.add(
        egui::Slider::new(&mut controls.density, 500.0..=8000.0)
            .suffix(" kg/m³")
            .text("Density"),
    );
}

/// Returns whether rewind was clicked.
fn render_rewind_button(ui: &mut egui::Ui) -> bool {
    let button = egui::Button::new(egui::RichText::new(icons::REWIND).size(18.0))
        .min_size(egui::vec2(36.0, 32.0));

    ui.add(button).on_hover_text("Rewind (R)").clicked()
}
