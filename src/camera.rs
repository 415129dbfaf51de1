//! Camera for both scenes.
//!
//! The tour view orbits the Sun from above Jupiter's orbit with scroll-wheel
//! zoom. The impact view trails the asteroid at a fixed offset.

use bevy::{input::mouse::AccumulatedMouseScroll, prelude::*};

use crate::approach::{Asteroid, ApproachSystems};
use crate::orbit::presets::SCENE_UNITS_PER_AU;
use crate::types::ViewMode;

/// Camera position for the tour, relative to the Sun.
pub fn tour_eye() -> Vec3 {
    let jupiter_orbit = (5.203 * SCENE_UNITS_PER_AU) as f32;
    Vec3::new(jupiter_orbit * 1.1, 50.0, jupiter_orbit * 0.5)
}

/// Offset from the asteroid to the camera in the impact view.
pub const FOLLOW_OFFSET: Vec3 = Vec3::new(5.0, 2.0, 7.0);

/// Fraction of the remaining distance covered each frame while following.
pub const FOLLOW_SMOOTHING: f32 = 0.1;

/// Minimum zoom factor (closest).
pub const MIN_ZOOM: f32 = 0.05;

/// Maximum zoom factor (furthest).
pub const MAX_ZOOM: f32 = 4.0;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Tour view zoom, as a multiple of [`tour_eye`].
#[derive(Resource)]
pub struct CameraState {
    pub zoom: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraState>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (camera_zoom, follow_view).chain().after(ApproachSystems),
            );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 45.0_f32.to_radians(),
            near: 0.1,
            far: 20_000.0,
            ..default()
        }),
        Transform::from_translation(tour_eye()).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

/// Scroll to move the tour camera in and out.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mode: Res<ViewMode>,
    mut camera_state: ResMut<CameraState>,
) {
    if mouse_scroll.delta.y == 0.0 || *mode != ViewMode::Tour {
        return;
    }

    // Logarithmic zoom: multiply by factor based on scroll direction
    let zoom_factor = 1.0 - mouse_scroll.delta.y * ZOOM_SPEED;
    camera_state.zoom = (camera_state.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
}

/// Ease the camera toward where the current view wants it.
fn follow_view(
    mode: Res<ViewMode>,
    camera_state: Res<CameraState>,
    asteroids: Query<&Transform, (With<Asteroid>, Without<MainCamera>)>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut camera) = camera_query.single_mut() else {
        return;
    };

    let (eye, focus) = match *mode {
        ViewMode::Tour => (tour_eye() * camera_state.zoom, Vec3::ZERO),
        ViewMode::Impact => {
            let Ok(asteroid) = asteroids.single() else {
                return;
            };
            (asteroid.translation + FOLLOW_OFFSET, asteroid.translation)
        }
    };

    camera.translation = camera.translation.lerp(eye, FOLLOW_SMOOTHING);
    camera.look_at(focus, Vec3::Y);
}
