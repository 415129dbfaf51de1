//! Orrery - solar-system tour and asteroid impact simulator.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use clap::Parser;

use orrery::approach::ApproachPlugin;
use orrery::bodies::BodiesPlugin;
use orrery::camera::CameraPlugin;
use orrery::render::RenderPlugin;
use orrery::time::TimePlugin;
use orrery::trajectory::feed::TrajectorySlot;
use orrery::types::ViewMode;
use orrery::ui::UiPlugin;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Start in the impact scene instead of the tour.
    #[arg(long)]
    impact: bool,

    /// Trajectory message (JSON) to fly in the impact scene.
    #[arg(long, value_name = "FILE")]
    trajectory: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let mode = if args.impact {
        ViewMode::Impact
    } else {
        ViewMode::Tour
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orrery".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(mode)
        .insert_resource(TrajectorySlot::new())
        .insert_resource(TrajectoryFile(args.trajectory))
        .add_plugins((
            TimePlugin,
            BodiesPlugin,
            ApproachPlugin,
            CameraPlugin,
            RenderPlugin,
            UiPlugin,
        ))
        .add_systems(Startup, load_trajectory_file)
        .run();
}

#[derive(Resource)]
struct TrajectoryFile(Option<PathBuf>);

/// Read the trajectory file off the main thread and publish it.
///
/// Stands in for a network feed: the frame loop only ever sees the slot.
fn load_trajectory_file(file: Res<TrajectoryFile>, slot: Res<TrajectorySlot>) {
    let Some(path) = file.0.clone() else {
        return;
    };
    let source = slot.clone();
    std::thread::spawn(move || match std::fs::read_to_string(&path) {
        Ok(text) => {
            if source.publish_message(&text) {
                info!("Loaded trajectory from {}", path.display());
            }
        }
        Err(err) => warn!("Cannot read {}: {err}", path.display()),
    });
}
