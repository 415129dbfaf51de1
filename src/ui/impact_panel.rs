//! Impact readout shown after contact.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::approach::{ApproachState, ImpactControls};
use crate::impact::{ImpactResult, Severity, Surface, closest_reference};
use crate::types::ViewMode;
use crate::ui::dock::colors;
use crate::ui::icons;

/// Expected damage for a surface and severity band.
pub fn damage_label(surface: Surface, severity: Severity) -> &'static str {
    match (surface, severity) {
        (Surface::Ocean, Severity::Minor) => "Small tsunami",
        (Surface::Ocean, Severity::Major) => "Major tsunami",
        (Surface::Ocean, Severity::Global) => "Global mega-tsunami",
        (Surface::Land, Severity::Minor) => "Light tremor",
        (Surface::Land, Severity::Major) => "Destructive local earthquake",
        (Surface::Land, Severity::Global) => "Global earthquake and massive crater",
    }
}

/// Readout rows as (label, value) pairs.
pub fn readout_rows(result: &ImpactResult) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Energy", format!("{:.2e} t TNT", result.energy_tons_tnt)),
        ("", format!("{:.2e} J", result.energy_joules)),
        ("Mass", format!("{:.2} thousand t", result.mass_kg / 1e6)),
        (
            "Speed",
            format!("{:.1} km/s", result.closing_speed_mps / 1000.0),
        ),
        (
            "Damage",
            damage_label(result.surface(), result.severity).to_string(),
        ),
        (
            "Crater",
            format!("~{:.0} m", result.transient_crater_diameter_m),
        ),
        ("Latitude", format!("{:.1}°", result.latitude_deg)),
        ("Longitude", format!("{:.1}°", result.longitude_deg)),
    ];
    if let Some(angle) = result.entry_angle_deg {
        rows.push(("Entry", format!("{angle:.0}° from vertical")));
    }
    let forces = &result.forces;
    rows.extend([
        ("Contact time", format!("{:.3} s", forces.contact_time_s)),
        ("Peak force", format!("{:.2e} N", forces.peak_force_n)),
        ("Earth Δv", format!("{:.2e} m/s", forces.earth_delta_v_mps)),
    ]);
    if let Some(reference) = closest_reference(result.energy_tons_tnt) {
        rows.push((
            "Closest to",
            format!("{} ({:.2e} t TNT)", reference.name, reference.energy_tons_tnt),
        ));
    }
    rows
}

pub fn impact_panel_system(
    mut contexts: EguiContexts,
    mode: Res<ViewMode>,
    state: Res<ApproachState>,
    controls: Res<ImpactControls>,
) {
    if *mode != ViewMode::Impact {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("impact_readout")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(20.0, 20.0))
        .frame(
            egui::Frame::new()
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::same(10))
                .corner_radius(8),
        )
        .show(ctx, |ui| {
            ui.set_max_width(350.0);

            let Some(impact) = &state.last_impact else {
                ui.label(
                    egui::RichText::new(format!(
                        "{} {:.0} m asteroid at {:.1} km/s",
                        icons::ASTEROID,
                        controls.diameter_m,
                        controls.closing_speed_km_s
                    ))
                    .color(colors::TEXT),
                );
                return;
            };

            let surface_icon = match impact.result.surface() {
                Surface::Ocean => icons::OCEAN,
                Surface::Land => icons::LAND,
            };
            ui.label(
                egui::RichText::new(format!("{} Impact on Earth! {surface_icon}", icons::IMPACT))
                    .strong()
                    .size(16.0)
                    .color(egui::Color32::YELLOW),
            );
            ui.separator();

            egui::Grid::new("impact_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for (label, value) in readout_rows(&impact.result) {
                        ui.label(egui::RichText::new(label).color(colors::INACTIVE));
                        ui.label(egui::RichText::new(value).color(colors::TEXT));
                        ui.end_row();
                    }
                });
        });
}
