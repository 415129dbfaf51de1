//! Spawning the meshes of both scenes.

use bevy::prelude::*;

use crate::approach::{
    APPROACH_START, Asteroid, EARTH_SCENE_CENTER, EARTH_SCENE_RADIUS, ImpactTarget,
};
use crate::bodies::{BodyName, Orbiting, Spin};
use crate::orbit::presets::{PLANETS, PlanetPreset, SUN_RADIUS};
use crate::types::ViewMode;

/// Root of everything shown in one [`ViewMode`].
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneRoot(pub ViewMode);

/// Spin rate for a relative speed of 1.0, radians per time unit.
const BASE_SPIN_RATE: f64 = 0.6;

pub struct SceneBodiesPlugin;

impl Plugin for SceneBodiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_tour_scene, spawn_impact_scene));
    }
}

fn preset_color(preset: &PlanetPreset) -> Color {
    let [r, g, b] = preset.rgb();
    Color::srgb(r, g, b)
}

fn spawn_tour_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let root = commands
        .spawn((
            SceneRoot(ViewMode::Tour),
            Transform::default(),
            Visibility::Inherited,
        ))
        .id();

    // Sun with its light
    let sun = commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(SUN_RADIUS).mesh().uv(64, 32))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 0.85, 0.4),
                emissive: LinearRgba::rgb(4.0, 2.8, 1.0),
                unlit: true,
                ..default()
            })),
            Transform::default(),
            BodyName("Sun"),
        ))
        .id();
    let light = commands
        .spawn((
            PointLight {
                intensity: 4.0e7,
                range: 3000.0,
                shadows_enabled: false,
                ..default()
            },
            Transform::default(),
        ))
        .id();
    commands.entity(root).add_children(&[sun, light]);

    let mut spawned = 0;
    for preset in PLANETS {
        let elements = match preset.elements() {
            Ok(elements) => elements,
            Err(err) => {
                warn!("Skipping {}: {err}", preset.name);
                continue;
            }
        };

        let planet = commands
            .spawn((
                Mesh3d(meshes.add(Sphere::new(preset.radius).mesh().uv(48, 24))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: preset_color(preset),
                    perceptual_roughness: 1.0,
                    metallic: 0.0,
                    ..default()
                })),
                Transform::from_translation(elements.position(0.0).as_vec3()),
                Orbiting::around_origin(elements),
                Spin(BASE_SPIN_RATE * preset.relative_speed),
                BodyName(preset.name),
            ))
            .id();

        if preset.has_rings {
            let tilt = (90.0 - preset.tilt_deg).to_radians() as f32;
            let ring = commands
                .spawn((
                    Mesh3d(meshes.add(Annulus::new(preset.radius * 1.2, preset.radius * 2.0))),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: Color::srgba(0.85, 0.75, 0.55, 0.7),
                        alpha_mode: AlphaMode::Blend,
                        cull_mode: None,
                        double_sided: true,
                        ..default()
                    })),
                    Transform::from_rotation(Quat::from_rotation_x(tilt)),
                ))
                .id();
            commands.entity(planet).add_child(ring);
        }

        commands.entity(root).add_child(planet);
        spawned += 1;
    }

    info!("Spawned Sun and {spawned} planets");
}

fn spawn_impact_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let root = commands
        .spawn((
            SceneRoot(ViewMode::Impact),
            Transform::default(),
            Visibility::Hidden,
        ))
        .id();

    let earth = commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(EARTH_SCENE_RADIUS as f32).mesh().uv(128, 64))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::WHITE,
                perceptual_roughness: 0.9,
                ..default()
            })),
            Transform::from_translation(EARTH_SCENE_CENTER.as_vec3()),
            ImpactTarget,
            BodyName("Earth"),
        ))
        .id();

    let asteroid = commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(1.0).mesh().uv(32, 16))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.45, 0.4, 0.35),
                perceptual_roughness: 0.8,
                metallic: 0.1,
                ..default()
            })),
            Transform::from_translation(APPROACH_START.as_vec3()),
            Asteroid,
            BodyName("Asteroid"),
        ))
        .id();

    let light = commands
        .spawn((
            DirectionalLight {
                illuminance: 8000.0,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_xyz(20.0, 20.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();

    commands.entity(root).add_children(&[earth, asteroid, light]);
}
