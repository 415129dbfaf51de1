//! Orbit trails and the approach path, drawn with gizmos.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::approach::{Approach, ApproachSystems};
use crate::bodies::{BodyName, BodySystems, Orbiting, to_render};
use crate::orbit::presets::planet;
use crate::types::ViewMode;

pub struct OrbitTrailPlugin;

impl Plugin for OrbitTrailPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitTrailSettings>().add_systems(
            Update,
            (
                draw_orbit_trails
                    .after(BodySystems)
                    .run_if(|mode: Res<ViewMode>| *mode == ViewMode::Tour),
                draw_approach_path
                    .after(ApproachSystems)
                    .run_if(|mode: Res<ViewMode>| *mode == ViewMode::Impact),
            ),
        );
    }
}

/// Settings for orbit trail rendering.
#[derive(Resource)]
pub struct OrbitTrailSettings {
    pub visible: bool,
    /// Number of segments for drawing the ellipse (higher = smoother).
    pub segments: usize,
    pub alpha: f32,
    /// Dash pattern: draw N segments, then skip M segments, repeating.
    ///
    /// Set to (1, 0) for a solid line.
    pub dash_on: usize,
    pub dash_off: usize,
}

impl Default for OrbitTrailSettings {
    fn default() -> Self {
        Self {
            visible: true,
            segments: 128,
            alpha: 0.6,
            dash_on: 1,
            dash_off: 0,
        }
    }
}

/// Whether segment `i` is drawn under a dash pattern.
///
/// The pattern is indexed from the start of the trail so it stays put as
/// bodies move.
pub fn dash_visible(i: usize, on: usize, off: usize) -> bool {
    let on = on.max(1);
    i % (on + off) < on
}

fn trail_color(name: &str, alpha: f32) -> Color {
    match planet(name) {
        Some(preset) => {
            let [r, g, b] = preset.rgb();
            Color::srgba(r, g, b, alpha)
        }
        None => Color::srgba(0.5, 0.5, 0.5, alpha),
    }
}

fn draw_orbit_trails(
    mut gizmos: Gizmos,
    settings: Res<OrbitTrailSettings>,
    bodies: Query<(&Orbiting, Option<&BodyName>)>,
    mut points: Local<Vec<DVec3>>,
) {
    if !settings.visible {
        return;
    }

    for (orbit, name) in bodies.iter() {
        let color = trail_color(name.map_or("", |n| n.0), settings.alpha);
        orbit.elements.trail_into(settings.segments, &mut points);

        for (i, pair) in points.windows(2).enumerate() {
            if !dash_visible(i, settings.dash_on, settings.dash_off) {
                continue;
            }
            gizmos.line(
                to_render(orbit.center + pair[0]),
                to_render(orbit.center + pair[1]),
                color,
            );
        }
    }
}

/// Red line from the asteroid's start to Earth, or through the streamed
/// samples when a trajectory is loaded.
fn draw_approach_path(mut gizmos: Gizmos, approach: Res<Approach>) {
    let color = Color::srgb(1.0, 0.0, 0.0);
    match &approach.trajectory {
        Some(trajectory) => {
            gizmos.linestrip(
                trajectory
                    .samples()
                    .iter()
                    .map(|s| approach.scene_point(s.position).as_vec3()),
                color,
            );
        }
        None => {
            gizmos.line(
                approach.start.as_vec3(),
                approach.target_center.as_vec3(),
                color,
            );
        }
    }
}
