//! egui control panel and impact readout.

mod dock;
pub mod icons;
pub mod impact_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::approach::RewindEvent;
use crate::render::OrbitTrailSettings;
use crate::types::{SimulationTime, ViewMode};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<icons::FontsInitialized>()
            // Keyboard shortcuts don't need egui context - can stay in Update
            .add_systems(Update, keyboard_shortcuts)
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                (dock::dock_system, impact_panel::impact_panel_system)
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}

fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut sim_time: ResMut<SimulationTime>,
    mut mode: ResMut<ViewMode>,
    mut trails: ResMut<OrbitTrailSettings>,
    mut rewind_events: MessageWriter<RewindEvent>,
) {
    if keys.just_pressed(KeyCode::Space) {
        sim_time.paused = !sim_time.paused;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        rewind_events.write(RewindEvent);
    }
    if keys.just_pressed(KeyCode::KeyO) {
        trails.visible = !trails.visible;
    }
    if keys.just_pressed(KeyCode::Tab) {
        let next = match *mode {
            ViewMode::Tour => ViewMode::Impact,
            ViewMode::Impact => ViewMode::Tour,
        };
        switch_view(next, &mut mode, &mut sim_time, &mut rewind_events);
    }

    let speeds = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4];
    if *mode == ViewMode::Tour {
        for (key, &scale) in speeds.iter().zip(dock::TOUR_SPEEDS.iter()) {
            if keys.just_pressed(*key) {
                sim_time.scale = scale;
            }
        }
    }
}

/// Change scene. The impact scene always starts from a fresh approach at
/// real-time speed.
fn switch_view(
    next: ViewMode,
    mode: &mut ViewMode,
    sim_time: &mut SimulationTime,
    rewind_events: &mut MessageWriter<RewindEvent>,
) {
    if *mode == next {
        return;
    }
    *mode = next;
    if next == ViewMode::Impact {
        sim_time.scale = 1.0;
        rewind_events.write(RewindEvent);
    }
}
