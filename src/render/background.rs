//! Starfield shared by both scenes.

use bevy::prelude::*;
use rand::Rng;

/// Stars are scattered in a cube of this half-width around the origin.
const STAR_FIELD_HALF_WIDTH: f32 = 4000.0;

/// Stars closer than this are pushed out so they never sit inside a scene.
const STAR_FIELD_INNER_RADIUS: f32 = 1500.0;

const STAR_COUNT: usize = 1500;

pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, spawn_starfield);
    }
}

fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.5,
        unlit: true,
        ..default()
    });
    let star_mesh = meshes.add(Sphere::new(1.5));

    let mut rng = rand::thread_rng();
    for _ in 0..STAR_COUNT {
        let mut p = Vec3::new(
            rng.gen_range(-STAR_FIELD_HALF_WIDTH..STAR_FIELD_HALF_WIDTH),
            rng.gen_range(-STAR_FIELD_HALF_WIDTH..STAR_FIELD_HALF_WIDTH),
            rng.gen_range(-STAR_FIELD_HALF_WIDTH..STAR_FIELD_HALF_WIDTH),
        );
        if p.length() < STAR_FIELD_INNER_RADIUS {
            p = p.normalize_or(Vec3::Z) * STAR_FIELD_INNER_RADIUS;
        }
        let scale = rng.gen_range(0.5..1.5);

        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(p).with_scale(Vec3::splat(scale)),
        ));
    }

    info!("Spawned {STAR_COUNT} background stars");
}
