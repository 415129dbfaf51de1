//! Phosphor icon font setup and the icons the panels use.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Whether the icon font has been installed into the egui context.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// Install the Phosphor icon font once the egui context exists.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
/// Rewind (circular arrow)
pub const REWIND: &str = egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE;
pub const SUN: &str = egui_phosphor::regular::SUN;
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
pub const ASTEROID: &str = egui_phosphor::regular::SHOOTING_STAR;
pub const IMPACT: &str = egui_phosphor::regular::WARNING_CIRCLE;
pub const OCEAN: &str = egui_phosphor::regular::WAVES;
pub const LAND: &str = egui_phosphor::regular::MOUNTAINS;
